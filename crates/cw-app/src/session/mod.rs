//! Session controller.
//!
//! ```text
//! LoggedOut --login--> Authenticating --ok--> Ready (balance refresh follows)
//!     |                      `--err--> LoggedOut
//!     `--resume--> Validating --ok--> Ready
//!                      `--err--> clear store --> LoggedOut
//! Ready --refresh/start/stop--> Busy --> Ready
//! Ready --logout--> LoggedOut
//! ```

mod busy;
mod controller;
mod error;

pub use controller::{ResumeOutcome, SessionController};
pub use error::SessionError;

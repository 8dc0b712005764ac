//! Session domain module.
//!
//! The in-memory login session and the states a front-end renders.

mod balance;
mod state;

pub use balance::Balance;
pub use state::{Session, SessionSnapshot, SessionState};

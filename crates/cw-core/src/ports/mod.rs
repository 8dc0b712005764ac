//! Port interfaces for the application layer
//!
//! Ports define the contract between the session controller and the
//! infrastructure implementations (SQLite, HTTP, system time). The core
//! stays independent of those dependencies and is tested against fakes.

pub mod app_dirs;
pub mod backend;
mod clock;
pub mod credential_store;
mod delay;
pub mod errors;
mod notifier;

pub use app_dirs::AppDirsPort;
pub use backend::BackendPort;
pub use clock::*;
pub use credential_store::CredentialStorePort;
pub use delay::*;
pub use errors::{AppDirsError, BackendError, CredentialStoreError, Endpoint};
pub use notifier::*;

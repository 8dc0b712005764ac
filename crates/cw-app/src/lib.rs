//! Campus water application orchestration layer
//!
//! This crate holds the session controller: login, resume-on-launch,
//! balance refresh, valve open/close and logout over the core ports.

pub mod deps;
pub mod session;

pub use deps::AppDeps;
pub use session::{ResumeOutcome, SessionController, SessionError};

//! # cw-core
//!
//! Core domain models and port interfaces for the campus water client.
//!
//! This crate contains pure business types without any infrastructure dependencies.

// Public module exports
pub mod app_dirs;
pub mod auth;
pub mod config;
pub mod credential;
pub mod notification;
pub mod ports;
pub mod session;
pub mod valve;

// Re-export commonly used types at the crate root
pub use auth::{LoginToken, Password};
pub use config::AppConfig;
pub use credential::{Credential, LoginProfile};
pub use notification::{Notification, NotificationLevel};
pub use session::{Balance, Session, SessionSnapshot, SessionState};
pub use valve::{OrderNo, StartOutcome};

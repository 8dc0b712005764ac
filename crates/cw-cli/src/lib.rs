//! # cw-cli
//!
//! Terminal front-end for the campus water client: configuration and
//! tracing bootstrap, dependency wiring, one-shot commands and the
//! interactive shell.

pub mod adapters;
pub mod bootstrap;
pub mod cli;
pub mod commands;

pub use bootstrap::run;

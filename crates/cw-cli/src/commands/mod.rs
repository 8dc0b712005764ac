//! Front-end commands over the session controller.

pub mod oneshot;
pub mod output;
pub mod prompt;
pub mod shell;

pub use oneshot::execute;
pub use shell::run_shell;

pub mod backend;
pub mod db;
pub mod fs;
pub mod time;

pub use backend::HttpBackendClient;
pub use time::{SystemClock, TokioDelay};

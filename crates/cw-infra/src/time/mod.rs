mod system_clock;
mod tokio_delay;

pub use system_clock::SystemClock;
pub use tokio_delay::TokioDelay;

pub mod fixtures;
pub mod tracing;

pub use fixtures::{LogDir, log_line};
pub use tracing::{CapturedEvent, captured_events};

mod analyzer;
mod error;
mod loader;


pub use analyzer::AnalyzerConfig;
pub use error::ConfigError;
pub use loader::{DEFAULT_CONFIG_PATH, load_config};

use crate::conf::analyzer::AnalyzerConfig;
use crate::conf::error::ConfigError;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "./config.json";

/// Load and validate a config file. `.toml` files are read as TOML, anything
/// else as JSON.
pub fn load_config(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let config = match path.extension().and_then(OsStr::to_str) {
        Some("toml") => {
            toml::from_str::<AnalyzerConfig>(&contents).map_err(|e| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: e,
            })?
        }
        _ => serde_json::from_str::<AnalyzerConfig>(&contents).map_err(|e| {
            ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: e,
            }
        })?,
    };

    //--------------------------------------------------------------------------
    // Semantic validation
    //--------------------------------------------------------------------------
    config.validate()?;

    Ok(config)
}

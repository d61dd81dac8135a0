use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;
use tracing::info;

use super::{types::Config, ConfigError};

/// Prefix for environment variable overrides (`DIRECTLINE_DATABASE_PATH`, ...).
pub const ENV_PREFIX: &str = "DIRECTLINE_";

/// Load configuration from an optional TOML file with environment variable overrides.
///
/// A missing file is not an error: every setting can come from the environment.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        info!("Config file {:?} not found, reading environment only", path);
    }

    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

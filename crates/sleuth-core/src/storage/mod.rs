mod config;

pub use config::{Config, DisclosureConfig, EpisodeConfig, TimerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable selecting the data directory and development mode.
pub const ENV_VAR: &str = "SLEUTH_ENV";

/// True when `SLEUTH_ENV=dev`.
pub fn is_dev_env() -> bool {
    std::env::var(ENV_VAR).is_ok_and(|env| env == "dev")
}

/// Returns `~/.config/sleuth[-dev]/` based on SLEUTH_ENV.
///
/// Set SLEUTH_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let dir = if is_dev_env() {
        base_dir.join("sleuth-dev")
    } else {
        base_dir.join("sleuth")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

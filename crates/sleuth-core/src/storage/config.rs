//! TOML-based application configuration.
//!
//! Stores host preferences including:
//! - Tick cadence and time-up penalties
//! - Episode time limit and starting trust
//! - Caveat text, diagnostics switch and tier palette
//!
//! Configuration is stored at `~/.config/sleuth/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{data_dir, is_dev_env};
use crate::disclosure::{DisplayOptions, PalettePolicy, TierPalette, TrustScore, DEFAULT_CAVEAT};
use crate::error::ConfigError;

/// Timer-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Wall-clock milliseconds per countdown second.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Trust lost when an episode runs out of time.
    #[serde(default = "default_time_up_trust_penalty")]
    pub time_up_trust_penalty: u32,
    /// Seconds removed from the clock for a wrong accusation.
    #[serde(default = "default_wrong_answer_penalty_secs")]
    pub wrong_answer_penalty_secs: u64,
}

/// Episode defaults supplied to the timer and the progress state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeConfig {
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: u64,
    #[serde(default)]
    pub initial_trust: TrustScore,
}

/// Disclosure configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisclosureConfig {
    #[serde(default = "default_caveat_message")]
    pub caveat_message: String,
    /// Surface diagnostic notes on shady responses. Always on with SLEUTH_ENV=dev.
    #[serde(default)]
    pub show_diagnostics: bool,
    #[serde(default)]
    pub palette: TierPalette,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/sleuth/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub episode: EpisodeConfig,
    #[serde(default)]
    pub disclosure: DisclosureConfig,
}

// Default functions
fn default_tick_millis() -> u64 {
    1000
}
fn default_time_up_trust_penalty() -> u32 {
    10
}
fn default_wrong_answer_penalty_secs() -> u64 {
    30
}
fn default_time_limit_secs() -> u64 {
    300
}
fn default_caveat_message() -> String {
    DEFAULT_CAVEAT.into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
            time_up_trust_penalty: default_time_up_trust_penalty(),
            wrong_answer_penalty_secs: default_wrong_answer_penalty_secs(),
        }
    }
}

impl TimerConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit_secs(),
            initial_trust: TrustScore::default(),
        }
    }
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            caveat_message: default_caveat_message(),
            show_diagnostics: false,
            palette: TierPalette::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                tracing::debug!(path = %path.display(), "config loaded");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                tracing::info!(path = %path.display(), "wrote default config");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse
    /// as the type already stored under that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    /// Display switches for response rendering.
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            caveat_message: self.disclosure.caveat_message.clone(),
            show_diagnostics: self.disclosure.show_diagnostics || is_dev_env(),
        }
    }

    pub fn render_policy(&self) -> PalettePolicy {
        PalettePolicy::new(self.disclosure.palette.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.tick_millis, 1000);
        assert_eq!(parsed.episode.initial_trust.value(), 50);
        assert_eq!(parsed.disclosure.palette, TierPalette::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[episode]\ntime_limit_secs = 90\n").unwrap();
        assert_eq!(parsed.episode.time_limit_secs, 90);
        assert_eq!(parsed.timer.time_up_trust_penalty, 10);
        assert_eq!(parsed.disclosure.caveat_message, DEFAULT_CAVEAT);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.tick_millis").as_deref(), Some("1000"));
        assert_eq!(cfg.get("disclosure.show_diagnostics").as_deref(), Some("false"));
        assert_eq!(cfg.get("disclosure.palette.alert").as_deref(), Some("#a855f7"));
        assert!(cfg.get("timer.missing_key").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("disclosure.show_diagnostics", "true").unwrap();
        cfg.set("episode.time_limit_secs", "125").unwrap();
        cfg.set("disclosure.palette.weak", "#FF5733").unwrap();
        assert!(cfg.disclosure.show_diagnostics);
        assert_eq!(cfg.episode.time_limit_secs, 125);
        assert_eq!(cfg.disclosure.palette.weak, "#FF5733");
    }

    #[test]
    fn set_clamps_trust() {
        let mut cfg = Config::default();
        cfg.set("episode.initial_trust", "180").unwrap();
        assert_eq!(cfg.episode.initial_trust.value(), 100);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("timer.nonexistent_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("disclosure.show_diagnostics", "not_a_bool"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("timer.tick_millis", "fast"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn tick_period_never_zero() {
        let cfg = TimerConfig {
            tick_millis: 0,
            ..TimerConfig::default()
        };
        assert_eq!(cfg.tick_period(), Duration::from_millis(1));
    }
}

//! Optional user configuration at ~/.armctl/config.toml.
//!
//! ```toml
//! az_bin = "/usr/local/bin/az"
//! default_location = "westeurope"
//! ```
//!
//! A missing file is normal. A malformed one logs a warning and falls back
//! to defaults. Explicit CLI flags always win over config values.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

/// Region used when neither --location nor the config provides one.
pub const DEFAULT_LOCATION: &str = "eastus";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmConfig {
    /// Path or name of the az binary.
    pub az_bin: Option<String>,
    /// Region used when --location is omitted.
    pub default_location: Option<String>,
}

impl ArmConfig {
    /// Config file path: ~/.armctl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".armctl")
            .join("config.toml")
    }

    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    warn!(path = %path.display(), %err, "ignoring malformed config");
                    Self::default()
                }
            },
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read config");
                Self::default()
            }
        }
    }

    /// Resolve the region: explicit flag > config > built-in default.
    pub fn location(&self, explicit: Option<String>) -> String {
        explicit
            .or_else(|| self.default_location.clone())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_resolution_order() {
        let config = ArmConfig {
            az_bin: None,
            default_location: Some("westeurope".into()),
        };
        assert_eq!(config.location(Some("japaneast".into())), "japaneast");
        assert_eq!(config.location(None), "westeurope");
        assert_eq!(ArmConfig::default().location(None), DEFAULT_LOCATION);
    }

    #[test]
    fn parses_partial_config() {
        let config: ArmConfig = toml::from_str("default_location = \"canadacentral\"").unwrap();
        assert_eq!(config.default_location.as_deref(), Some("canadacentral"));
        assert!(config.az_bin.is_none());
    }
}

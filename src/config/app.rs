use super::defaults::*;
use crate::consts::{CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH};
use crate::core::Result;
use crate::error::CoreError;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_store")]
    pub store: Store,
    #[serde(default = "default_display")]
    pub display: Display,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Store {
    /// Appended to filenames without an extension (no leading dot)
    #[serde(default = "default_extension")]
    pub default_extension: String,
    /// Total outer-blob decrypt attempts before giving up
    #[serde(default = "default_decrypt_attempts")]
    pub decrypt_attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Display {
    /// Percentage of the password left unmasked in summaries
    #[serde(default = "default_mask_percent")]
    pub mask_percent: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store: default_store(),
            display: default_display(),
        }
    }
}

impl Config {
    fn validate(self) -> Result<Self> {
        let ext = &self.store.default_extension;
        if ext.is_empty() || ext.starts_with('.') {
            return Err(CoreError::InvalidConfig(format!(
                "store.default_extension must be non-empty without a leading dot, got {ext:?}"
            )));
        }
        if self.store.decrypt_attempts == 0 {
            return Err(CoreError::InvalidConfig(
                "store.decrypt_attempts must be at least 1".into(),
            ));
        }
        if self.display.mask_percent > 100 {
            return Err(CoreError::InvalidConfig(format!(
                "display.mask_percent must be <= 100, got {}",
                self.display.mask_percent
            )));
        }
        Ok(self)
    }
}

/// Parse and validate a TOML document
pub fn from_toml_str(content: &str) -> Result<Config> {
    toml::from_str::<Config>(content)?.validate()
}

/// Read, parse and validate a TOML file
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path.as_ref())?;
    from_toml_str(&content)
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config at runtime, falling back to defaults if missing or invalid
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let config_path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if !Path::new(&config_path).exists() {
            debug!(path = %config_path, "no config file, using built-in defaults");
            return Config::default();
        }

        match from_path(&config_path) {
            Ok(conf) => conf,
            Err(err) => {
                warn!(path = %config_path, error = %err, "ignoring unusable config file");
                Config::default()
            }
        }
    })
}

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::warn;

use crate::provider::weatherapi::DEFAULT_BASE_URL;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "WEATHERAPI_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// show_raw_air_quality = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// weatherapi.com key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Override for the service base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Always print the raw `air_quality` block.
    #[serde(default)]
    pub show_raw_air_quality: bool,
}

impl Config {
    /// Non-blank API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Apply an override key taken from the environment, if non-blank.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Load config from disk (or defaults on first run) and apply
    /// `WEATHERAPI_KEY` on top.
    /// An unreadable or malformed file is logged and replaced by defaults.
    pub fn load() -> Self {
        Self::from_sources(Self::load_file(), std::env::var(API_KEY_ENV).ok())
    }

    /// Combine the outcome of reading the file with the environment key.
    pub fn from_sources(file: Result<Self>, env_key: Option<String>) -> Self {
        let cfg = file.unwrap_or_else(|err| {
            warn!(error = %format!("{err:#}"), "ignoring unusable config file");
            Self::default()
        });
        cfg.with_api_key_override(env_key)
    }

    /// Load config from disk only, or return an empty default if it doesn't
    /// exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skyview", "skyview")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_key_and_default_url() {
        let cfg = Config::default();
        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert!(!cfg.show_raw_air_quality);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn override_replaces_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let cfg = cfg.with_api_key_override(Some("ENV_KEY".into()));
        assert_eq!(cfg.api_key(), Some("ENV_KEY"));
    }

    #[test]
    fn blank_override_keeps_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let cfg = cfg.with_api_key_override(Some(" ".into())).with_api_key_override(None);
        assert_eq!(cfg.api_key(), Some("FILE_KEY"));
    }

    #[test]
    fn parses_partial_toml() {
        let cfg = Config::from_toml(
            r#"
            api_key = "abc"
            base_url = "http://localhost:9000/v1"
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.api_key(), Some("abc"));
        assert_eq!(cfg.base_url(), "http://localhost:9000/v1");
        assert!(!cfg.show_raw_air_quality);
    }

    #[test]
    fn toml_roundtrip_keeps_fields() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.show_raw_air_quality = true;

        let text = toml::to_string_pretty(&cfg).expect("serializable");
        let back = Config::from_toml(&text).expect("parsable");

        assert_eq!(back.api_key(), Some("KEY"));
        assert!(back.show_raw_air_quality);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults_and_env_key() {
        let cfg = Config::from_sources(Config::from_toml("api_key = "), Some("abc".into()));

        assert_eq!(cfg.api_key(), Some("abc"));
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn malformed_file_without_env_key_leaves_key_missing() {
        let cfg = Config::from_sources(Config::from_toml("[[[ nope"), None);
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn readable_file_is_kept_by_from_sources() {
        let cfg = Config::from_sources(Config::from_toml(r#"api_key = "FILE""#), None);
        assert_eq!(cfg.api_key(), Some("FILE"));
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(Config::from_toml("api_key = ").is_err());
    }
}

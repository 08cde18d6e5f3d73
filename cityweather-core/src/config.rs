use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::client::DEFAULT_BASE_URL;

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// City used when neither the command line nor the config names one.
pub const FALLBACK_CITY: &str = "London";

/// Configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Lisbon"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,

    /// Alternative API root, mostly for proxies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from the platform config directory, or an empty default if
    /// it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from `env_value` (normally `$OPENWEATHER_API_KEY`) or, failing
    /// that, from the config file. Blank values count as missing.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Result<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: set {API_KEY_ENV} or run `cityweather configure`."
                )
            })
    }

    /// Same as [`Config::resolve_api_key`], reading the environment.
    pub fn api_key_from_env_or_file(&self) -> Result<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    /// `explicit` city if given, else the configured default, else London.
    pub fn city_or_default(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .or_else(|| {
                self.default_city
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
            })
            .unwrap_or(FALLBACK_CITY)
            .to_string()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("SECRET".into()),
            default_city: Some("Lisbon".into()),
            base_url: None,
        };
        cfg.save_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("base_url"));

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn broken_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn env_key_wins_over_file() {
        let cfg = Config {
            api_key: Some("FILE".into()),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_api_key(Some("ENV".into())).unwrap(), "ENV");
        assert_eq!(cfg.resolve_api_key(None).unwrap(), "FILE");
        assert_eq!(cfg.resolve_api_key(Some("  ".into())).unwrap(), "FILE");
    }

    #[test]
    fn missing_key_error_has_hint() {
        let err = Config::default().resolve_api_key(None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains(API_KEY_ENV));
        assert!(msg.contains("cityweather configure"));
    }

    #[test]
    fn city_falls_back_to_config_then_london() {
        let empty = Config::default();
        assert_eq!(empty.city_or_default(None), "London");
        assert_eq!(empty.city_or_default(Some("  ")), "London");

        let cfg = Config {
            default_city: Some("Oslo".into()),
            ..Default::default()
        };
        assert_eq!(cfg.city_or_default(None), "Oslo");
        assert_eq!(cfg.city_or_default(Some("Paris")), "Paris");
    }

    #[test]
    fn base_url_defaults_to_openweather() {
        assert_eq!(Config::default().base_url(), DEFAULT_BASE_URL);
        let cfg = Config {
            base_url: Some("http://localhost:8080".into()),
            ..Default::default()
        };
        assert_eq!(cfg.base_url(), "http://localhost:8080");
    }
}

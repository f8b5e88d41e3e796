// SPDX-License-Identifier: MPL-2.0
//! User preferences stored in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[api]` - Image service location
//!
//! Loading never fails hard: a missing file yields defaults, an unreadable or
//! invalid one yields defaults plus a warning key the app turns into a toast.
//! The app only reads this file; users edit it by hand.
//!
//! ```no_run
//! use image_dashboard::config;
//!
//! let (config, warning) = config::load();
//! let (base_url, _) = config::resolve_api_base_url(None, &config);
//! println!("{base_url} {warning:?}");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Image service settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the image service, without the endpoint path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {other}"))),
    }
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load settings");
            (
                Config::default(),
                Some("notification-config-load-error".to_string()),
            )
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
}

/// Picks the API base URL: CLI, then environment, then `settings.toml`, then
/// the compiled-in default.
///
/// Returns the normalized URL (no trailing slash) and an optional warning key
/// when the chosen candidate was rejected in favour of the default.
pub fn resolve_api_base_url(cli: Option<&str>, config: &Config) -> (String, Option<String>) {
    let env = std::env::var(ENV_API_BASE_URL).ok();
    resolve_api_base_url_from(cli, env.as_deref(), config)
}

fn resolve_api_base_url_from(
    cli: Option<&str>,
    env: Option<&str>,
    config: &Config,
) -> (String, Option<String>) {
    let candidate = cli
        .or(env)
        .or(config.api.base_url.as_deref())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let Some(candidate) = candidate else {
        return (DEFAULT_API_BASE_URL.to_string(), None);
    };

    match normalize_base_url(candidate) {
        Some(url) => (url, None),
        None => {
            tracing::warn!(url = candidate, "ignoring invalid API base URL");
            (
                DEFAULT_API_BASE_URL.to_string(),
                Some("notification-config-invalid-api-url".to_string()),
            )
        }
    }
}

/// Accepts absolute http(s) URLs and strips trailing slashes.
fn normalize_base_url(raw: &str) -> Option<String> {
    let url = reqwest::Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    Some(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn written_settings_load_back() {
        let mut config = Config::default();
        config.general.language = Some("fr".to_string());
        config.general.theme_mode = ThemeMode::Dark;
        config.api.base_url = Some("https://images.example.com".to_string());

        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(load_from_path(&path).expect("failed to load"), config);
    }

    #[test]
    fn invalid_toml_yields_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "not = valid = toml").unwrap();

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn missing_file_yields_default_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn theme_mode_is_case_insensitive() {
        let config: Config = toml::from_str("[general]\ntheme_mode = \"LIGHT\"\n").unwrap();
        assert_eq!(config.general.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn cli_wins_over_env_and_file() {
        let mut config = Config::default();
        config.api.base_url = Some("http://file:1".to_string());
        let (url, warning) =
            resolve_api_base_url_from(Some("http://cli:3/"), Some("http://env:2"), &config);
        assert_eq!(url, "http://cli:3");
        assert!(warning.is_none());
    }

    #[test]
    fn env_wins_over_file() {
        let mut config = Config::default();
        config.api.base_url = Some("http://file:1".to_string());
        let (url, _) = resolve_api_base_url_from(None, Some("http://env:2"), &config);
        assert_eq!(url, "http://env:2");
    }

    #[test]
    fn falls_back_to_compiled_default() {
        let (url, warning) = resolve_api_base_url_from(None, None, &Config::default());
        assert_eq!(url, DEFAULT_API_BASE_URL);
        assert!(warning.is_none());
    }

    #[test]
    fn invalid_url_falls_back_with_warning() {
        let (url, warning) = resolve_api_base_url_from(Some("ftp://x"), None, &Config::default());
        assert_eq!(url, DEFAULT_API_BASE_URL);
        assert_eq!(warning.as_deref(), Some("notification-config-invalid-api-url"));
    }
}

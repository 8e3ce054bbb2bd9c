//! Configuration loading and root folder resolution
//!
//! Root folder priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable `READLOG_ROOT_FOLDER`
//! 3. TOML config file (`root_folder`)
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or broken config file is never fatal: defaults are used and the
//! problem is reported through [`ConfigSource`].

use crate::store::DEFAULT_DATA_FILE;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "READLOG_ROOT_FOLDER";

/// Environment variable holding the OpenAI API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Shown when a submit is attempted without an API key
pub const MISSING_API_KEY_MESSAGE: &str = "OpenAI API key not found. Please set OPENAI_API_KEY \
     environment variable or add openai_api_key to the config file.";

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset (e.g. "info", "readlog_ui=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Chat completion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// API base, without the trailing `/chat/completions`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_temperature() -> f64 {
    0.7
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// TOML config file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub root_folder: Option<PathBuf>,
    /// Entries file; relative paths are resolved against the root folder
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub openai: OpenAiSettings,
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }
}

/// Where the effective configuration came from
#[derive(Debug)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// No config file present; compiled defaults
    Defaults,
    /// File present but unreadable or invalid; compiled defaults
    Invalid(PathBuf, Error),
}

/// Load the explicit path if given, else the platform config file
///
/// Never fails: problems are reported through [`ConfigSource`] so the caller
/// can log them once tracing is up.
pub fn load_config(explicit: Option<&Path>) -> (TomlConfig, ConfigSource) {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_config_file() {
            Ok(path) => path,
            Err(_) => return (TomlConfig::default(), ConfigSource::Defaults),
        },
    };

    match TomlConfig::load(&path) {
        Ok(config) => (config, ConfigSource::File(path)),
        Err(e) => (TomlConfig::default(), ConfigSource::Invalid(path, e)),
    }
}

impl ConfigSource {
    /// Log how the configuration was obtained
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Defaults => info!("No config file found, using defaults"),
            ConfigSource::Invalid(path, e) => {
                warn!("Ignoring config file {}: {} - using defaults", path.display(), e)
            }
        }
    }
}

/// Locate the platform config file
///
/// Linux checks `~/.config/readlog/config.toml`, then `/etc/readlog/config.toml`.
pub fn find_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("readlog").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/readlog/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Resolve the root folder holding the entries file
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    // ~/.local/share/readlog, ~/Library/Application Support/readlog, %LOCALAPPDATA%\readlog
    dirs::data_local_dir()
        .map(|d| d.join("readlog"))
        .unwrap_or_else(|| PathBuf::from("./readlog_data"))
}

/// Entries file path for a resolved root folder
pub fn data_file_path(root_folder: &Path, toml_config: &TomlConfig) -> PathBuf {
    match &toml_config.data_file {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => root_folder.join(path),
        None => root_folder.join(DEFAULT_DATA_FILE),
    }
}

/// Resolve the OpenAI API key
///
/// **Priority:** ENV → TOML. Blank values are skipped.
pub fn resolve_openai_api_key(toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var(API_KEY_ENV).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_config
        .openai_api_key
        .clone()
        .filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!("OpenAI API key found in environment and TOML config. Using environment.");
    }

    if let Some(key) = env_key {
        info!("OpenAI API key loaded from environment variable");
        return Ok(key);
    }

    if let Some(key) = toml_key {
        info!("OpenAI API key loaded from TOML config");
        return Ok(key);
    }

    Err(Error::Config(MISSING_API_KEY_MESSAGE.to_string()))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_defaults() {
        let settings = OpenAiSettings::default();
        assert_eq!(settings.model, "gpt-4");
        assert_eq!(settings.max_tokens, 1500);
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_data_file_path_variants() {
        let root = Path::new("/srv/readlog");

        let config = TomlConfig::default();
        assert_eq!(
            data_file_path(root, &config),
            PathBuf::from("/srv/readlog/saved_entries.json")
        );

        let config = TomlConfig {
            data_file: Some(PathBuf::from("log.json")),
            ..Default::default()
        };
        assert_eq!(data_file_path(root, &config), PathBuf::from("/srv/readlog/log.json"));

        let config = TomlConfig {
            data_file: Some(PathBuf::from("/tmp/elsewhere.json")),
            ..Default::default()
        };
        assert_eq!(data_file_path(root, &config), PathBuf::from("/tmp/elsewhere.json"));
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("sk-abc"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   "));
    }
}

//! Persistent CLI configuration.

use std::path::{Path, PathBuf};

use notely_core::config::{DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE};
use notely_core::util::normalize_text_option;
use notely_core::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "cli-config.json";
const PINNED_FILE_NAME: &str = "pinnedNotes.json";

pub const API_BASE_URL_ENV: &str = "NOTELY_API_BASE_URL";
pub const PINNED_PATH_ENV: &str = "NOTELY_PINNED_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub pinned_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            api_base_url: None,
            page_size: None,
            pinned_path: None,
        }
    }
}

const fn default_config_version() -> u32 {
    1
}

/// Values that take precedence over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--api-url`
    pub api_url: Option<String>,
    pub env_api_url: Option<String>,
    pub env_pinned_path: Option<PathBuf>,
}

impl Overrides {
    pub fn from_env(api_url: Option<String>) -> Self {
        Self {
            api_url,
            env_api_url: std::env::var(API_BASE_URL_ENV).ok(),
            env_pinned_path: std::env::var_os(PINNED_PATH_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Effective settings after applying overrides and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub client: ClientConfig,
    pub pinned_path: PathBuf,
}

pub fn default_config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join("notely").join(CONFIG_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI config directory".to_string())
}

pub fn default_pinned_path() -> Result<PathBuf, String> {
    dirs::data_dir()
        .map(|dir| dir.join("notely").join(PINNED_FILE_NAME))
        .ok_or_else(|| "Failed to resolve CLI data directory".to_string())
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Base URL from the flag, then the environment, then this file, then the default.
    pub fn resolve_api_base_url(&self, overrides: &Overrides) -> String {
        normalize_text_option(overrides.api_url.clone())
            .or_else(|| normalize_text_option(overrides.env_api_url.clone()))
            .or_else(|| normalize_text_option(self.api_base_url.clone()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn resolve(&self, overrides: &Overrides) -> Result<Settings, CliError> {
        let client = ClientConfig::new(self.resolve_api_base_url(overrides))?
            .with_page_size(self.page_size.unwrap_or(DEFAULT_PAGE_SIZE))?;
        let pinned_path = match overrides
            .env_pinned_path
            .clone()
            .or_else(|| self.pinned_path.clone())
        {
            Some(path) => path,
            None => default_pinned_path().map_err(CliError::Config)?,
        };
        Ok(Settings {
            client,
            pinned_path,
        })
    }

    fn normalize(&mut self) {
        self.api_base_url = normalize_text_option(self.api_base_url.clone())
            .map(|url| url.trim_end_matches('/').to_string());
        self.page_size = self.page_size.filter(|size| *size > 0);
        self.pinned_path = self
            .pinned_path
            .take()
            .filter(|path| !path.as_os_str().is_empty());
    }
}

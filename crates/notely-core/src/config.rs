//! Client configuration for the remote notes service.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::is_http_url;

/// Base URL of the hosted notes service.
pub const DEFAULT_API_BASE_URL: &str = "https://notes-app-backend-b2wd.onrender.com/api";

/// Notes shown per board page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Seconds before an API request is abandoned.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings needed to talk to the notes service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Builds a config for `api_base_url` with default paging and timeout.
    pub fn new(api_base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url.as_ref())?,
            ..Self::default()
        })
    }

    /// Overrides the page size used by the note board.
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::Config("page size must be greater than zero".to_string()));
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Checks the config and returns it with a normalized base URL.
    pub fn validated(mut self) -> Result<Self> {
        self.api_base_url = normalize_base_url(&self.api_base_url)?;
        if self.page_size == 0 {
            return Err(Error::Config("page size must be greater than zero".to_string()));
        }
        Ok(self)
    }
}

/// Trims whitespace and trailing slashes and requires an HTTP scheme.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(Error::Config("API base URL must not be empty".to_string()));
    }
    if !is_http_url(&base) {
        return Err(Error::Config(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base)
}

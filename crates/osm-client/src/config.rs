use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::osm::DEFAULT_BASE_URL;

const APP_NAME: &str = "osm-client";
const CONFIG_FILE: &str = "config.json";

pub const API_ID_VAR: &str = "OSM_API_ID";
pub const API_TOKEN_VAR: &str = "OSM_API_TOKEN";
pub const BASE_URL_VAR: &str = "OSM_BASE_URL";
pub const USE_MOCK_DATA_VAR: &str = "USE_MOCK_DATA";

/// Settings a client is built from
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_id: String,
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Serve canned data instead of calling OSM
    #[serde(default)]
    pub use_mock_data: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_id: String::new(),
            api_token: String::new(),
            base_url: default_base_url(),
            use_mock_data: false,
        }
    }
}

// Keep the token out of logs
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.api_token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("ClientConfig")
            .field("api_id", &self.api_id)
            .field("api_token", &token)
            .field("base_url", &self.base_url)
            .field("use_mock_data", &self.use_mock_data)
            .finish()
    }
}

impl ClientConfig {
    /// Live configuration against the production host
    pub fn new(api_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_id: api_id.into(),
            api_token: api_token.into(),
            ..Self::default()
        }
    }

    /// Configuration that selects the offline client
    pub fn offline() -> Self {
        Self {
            use_mock_data: true,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns true if both the API identifier and token are set
    pub fn has_credentials(&self) -> bool {
        !self.api_id.is_empty() && !self.api_token.is_empty()
    }

    /// Builds a configuration from environment variables only
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Loads the config file, if any, then applies environment overrides
    pub fn load() -> Result<Self> {
        let config_file = Self::config_dir()?.join(CONFIG_FILE);
        let config = if config_file.exists() {
            Self::load_from(&config_file)?
        } else {
            Self::default()
        };

        Ok(config.overlay(|key| std::env::var(key).ok()))
    }

    /// Reads a JSON config file; unknown fields are ignored
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Applies overrides from a key lookup; empty values are ignored
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(api_id) = get(API_ID_VAR) {
            self.api_id = api_id;
        }
        if let Some(api_token) = get(API_TOKEN_VAR) {
            self.api_token = api_token;
        }
        if let Some(base_url) = get(BASE_URL_VAR) {
            self.base_url = base_url;
        }
        if let Some(flag) = get(USE_MOCK_DATA_VAR) {
            self.use_mock_data = flag == "true";
        }
        self
    }

    /// Returns the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join(APP_NAME))
    }
}

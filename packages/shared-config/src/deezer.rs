//! Deezer API configuration types

use crate::{get_env_or_default, parse_env, ConfigResult};

/// Public Deezer API endpoint; no key is needed for catalog lookups
const DEFAULT_DEEZER_API_URL: &str = "https://api.deezer.com";

/// Deezer API configuration
#[derive(Debug, Clone)]
pub struct DeezerConfig {
    /// Base URL of the Deezer API
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DeezerConfig {
    /// Load Deezer configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            api_url: get_env_or_default("DEEZER_API_URL", DEFAULT_DEEZER_API_URL),
            timeout_secs: parse_env("DEEZER_TIMEOUT_SECS", 10)?,
        })
    }

    /// Create a configuration pointing at a custom base URL (mock servers in tests)
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            api_url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for DeezerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_DEEZER_API_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

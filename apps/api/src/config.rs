//! API server configuration

use std::path::PathBuf;

use anyhow::{bail, Result};
use tunehub_shared_config::{
    get_env, get_env_or_default, get_required_env, parse_env, CommonConfig, DatabaseConfig,
    DeezerConfig, Environment,
};

use crate::services::auth::parse_duration_string;

/// Default session lifetime (7 days)
const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 3600;

/// Default upload body limit (50 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 5000)
    pub port: u16,

    /// Everything the router needs at runtime
    pub settings: AppSettings,
}

/// Runtime settings handed to the router
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Directory served under `/static`
    pub static_dir: PathBuf,

    /// Upload root containing `audio/` and `covers/`
    pub upload_dir: PathBuf,

    /// Maximum accepted upload body size in bytes
    pub max_upload_bytes: usize,

    /// Session lifetime in seconds
    pub session_ttl_secs: i64,

    /// Add the `Secure` attribute to the session cookie
    pub cookie_secure: bool,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,

    /// Running in production mode (strict CORS when no origins are set)
    pub production: bool,
}

impl AppSettings {
    /// Settings rooted at the given directories with default limits
    pub fn new(static_dir: impl Into<PathBuf>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
            upload_dir: upload_dir.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            cookie_secure: false,
            cors_allowed_origins: None,
            production: false,
        }
    }

    /// Directory uploaded audio files are written to
    pub fn audio_dir(&self) -> PathBuf {
        self.upload_dir.join("audio")
    }

    /// Directory uploaded cover images are written to
    pub fn covers_dir(&self) -> PathBuf {
        self.upload_dir.join("covers")
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode `DATABASE_URL` must be set explicitly and the
    /// session cookie defaults to `Secure`. In development/staging mode,
    /// sensible defaults are used for convenience.
    pub fn from_env() -> Result<Self> {
        let environment: Environment = get_env_or_default("ENVIRONMENT", "development")
            .parse()
            .unwrap_or_default();
        let is_production = environment.is_production();

        if is_production {
            Self::validate_database_url()?;
        }

        let common = CommonConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        let static_dir = PathBuf::from(get_env_or_default("STATIC_DIR", "static"));
        let upload_dir = get_env("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| static_dir.join("uploads"));

        let settings = AppSettings {
            static_dir,
            upload_dir,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            session_ttl_secs: Self::load_session_ttl()?,
            cookie_secure: Self::load_cookie_secure(is_production)?,
            cors_allowed_origins: get_env("CORS_ORIGINS").map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
            production: is_production,
        };

        Ok(Self {
            common,

            port: parse_env("PORT", 5000)?,

            settings,
        })
    }

    /// Parse SESSION_TTL ("12h", "7d", ...); unset means seven days
    fn load_session_ttl() -> Result<i64> {
        match get_env("SESSION_TTL") {
            Some(raw) if !raw.trim().is_empty() => match parse_duration_string(&raw) {
                Some(secs) if secs > 0 => Ok(secs),
                _ => bail!("Invalid SESSION_TTL value '{}' (expected e.g. 30m, 12h, 7d)", raw),
            },
            _ => Ok(DEFAULT_SESSION_TTL_SECS),
        }
    }

    /// COOKIE_SECURE overrides the per-environment default
    fn load_cookie_secure(is_production: bool) -> Result<bool> {
        match get_env("COOKIE_SECURE") {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => Ok(true),
                "0" | "false" | "no" => Ok(false),
                _ => bail!("Invalid COOKIE_SECURE value '{}'", raw),
            },
            None => Ok(is_production),
        }
    }

    /// Validate that DATABASE_URL is explicitly set in production
    fn validate_database_url() -> Result<()> {
        match get_required_env("DATABASE_URL") {
            Ok(_) => Ok(()),
            Err(_) => bail!(
                "DATABASE_URL environment variable is required in production. \
                 Please set the path of your SQLite database."
            ),
        }
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.common.database
    }

    /// Get Deezer configuration
    pub fn deezer(&self) -> &DeezerConfig {
        &self.common.deezer
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }
}

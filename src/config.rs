//! Runtime configuration sourced from the environment.
//!
//! Everything that tunes the extraction run lives here: the API base URL
//! and credential, the database location, and the retry/delay budget that
//! keeps the run inside the upstream requests-per-minute quota.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{FootdataError, Result};

pub const API_KEY_ENV_VAR: &str = "API_FOOTBALL_KEY";
pub const BASE_URL_ENV_VAR: &str = "API_FOOTBALL_BASE_URL";
pub const DB_PATH_ENV_VAR: &str = "FOOTDATA_DB";

/// Base path for the API-Football v3 API.
pub const API_BASE_URL: &str = "https://v3.football.api-sports.io";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub db_path: PathBuf,
    /// Retry budget shared by transport failures and 429 responses.
    pub max_retries: u32,
    /// Fixed backoff before retrying a failed connection.
    pub transport_backoff: Duration,
    /// Wait on a 429 without a usable `Retry-After` header.
    pub throttle_default: Duration,
    /// Wait between retries of a body-encoded quota error.
    pub quota_wait: Duration,
    /// Wait between successive pages of one resource.
    pub page_delay: Duration,
    /// Wait between teams in the player stage.
    pub team_delay: Duration,
    /// Cap on pages fetched per paginated resource.
    pub max_pages: u32,
}

impl Config {
    /// Read configuration from the environment, applying defaults for
    /// everything except the API key, which stays `None` until a command
    /// that talks to the API requires it.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| API_BASE_URL.to_string()),
            api_key: env::var(API_KEY_ENV_VAR).ok(),
            db_path: match env::var(DB_PATH_ENV_VAR) {
                Ok(path) => PathBuf::from(path),
                Err(_) => default_db_path()?,
            },
            max_retries: env_u64("FOOTDATA_MAX_RETRIES", 2)? as u32,
            transport_backoff: Duration::from_secs(env_u64("FOOTDATA_TRANSPORT_BACKOFF_SECS", 5)?),
            throttle_default: Duration::from_secs(env_u64("FOOTDATA_THROTTLE_DEFAULT_SECS", 60)?),
            quota_wait: Duration::from_secs(env_u64("FOOTDATA_QUOTA_WAIT_SECS", 10)?),
            page_delay: Duration::from_secs(env_u64("FOOTDATA_PAGE_DELAY_SECS", 10)?),
            team_delay: Duration::from_secs(env_u64("FOOTDATA_TEAM_DELAY_SECS", 10)?),
            max_pages: env_u64("FOOTDATA_MAX_PAGES", 20)? as u32,
        })
    }

    /// The API key, or the startup configuration error mandated for a
    /// missing credential.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| FootdataError::MissingApiKey {
                env_var: API_KEY_ENV_VAR.to_string(),
            })
    }
}

/// Parse an optional numeric env var. A present-but-malformed value is a
/// configuration error, not a silent fallback to the default.
fn env_u64(var: &str, default: u64) -> Result<u64> {
    match env::var(var) {
        Ok(raw) => raw.parse().map_err(|_| FootdataError::InvalidConfig {
            var: var.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

/// Default database file under the platform data directory.
fn default_db_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| FootdataError::Database {
        message: "Could not determine data directory".to_string(),
    })?;
    Ok(data_dir.join("footdata").join("footdata.db"))
}

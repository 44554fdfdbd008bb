//! Error types for the footdata CLI

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, FootdataError>;

#[derive(Error, Debug)]
pub enum FootdataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {endpoint}")]
    HttpStatus { status: u16, endpoint: String },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("API key not provided and {env_var} environment variable not set")]
    MissingApiKey { env_var: String },

    #[error("Invalid value for {var}: {value}")]
    InvalidConfig { var: String, value: String },

    #[error("Failed to parse numeric id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("API returned no league data for league {league_id} season {season}")]
    LeagueNotFound { league_id: u32, season: u16 },

    #[error("API returned no teams for league {league_id} season {season}")]
    NoTeams { league_id: u32, season: u16 },

    #[error("Database not ready at {path}: {message}")]
    DatabaseNotReady { path: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Run interrupted")]
    Interrupted,
}

impl From<anyhow::Error> for FootdataError {
    fn from(err: anyhow::Error) -> Self {
        FootdataError::Database {
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for FootdataError {
    fn from(err: rusqlite::Error) -> Self {
        FootdataError::Database {
            message: err.to_string(),
        }
    }
}

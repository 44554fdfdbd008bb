//! footdata: API-Football extraction CLI library
//!
//! Ingests hierarchical football data (leagues, seasons, venues, teams,
//! players, player statistics) from the rate-limited, paginated
//! API-Football v3 API and persists it into SQLite under idempotent
//! semantics.
//!
//! ## Features
//!
//! - **Resilient fetching**: bounded retry with `Retry-After` support for
//!   HTTP throttling, unbounded waits for body-encoded quota errors, and
//!   soft degradation on transport failures
//! - **Pagination**: page-capped, delay-throttled collection with plan
//!   restriction handling
//! - **Idempotent persistence**: key-gap filtering, last-write-wins
//!   deduplication, and conflict-targeted batch upserts inside a single
//!   run-scoped transaction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use footdata::{commands::extract::handle_extract, Config, LeagueId, Season};
//!
//! # async fn example() -> footdata::Result<()> {
//! let config = Config::from_env()?;
//! let summary = handle_extract(&config, LeagueId::new(71), Season::new(2024), false).await?;
//! println!("{} players written", summary.players);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set your API-Football key before extracting:
//! ```bash
//! export API_FOOTBALL_KEY=...
//! ```

pub mod apifootball;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{LeagueId, PlayerId, Season, TeamId};
pub use config::{Config, API_KEY_ENV_VAR};
pub use error::{FootdataError, Result};

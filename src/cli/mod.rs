//! CLI argument definitions and parsing.

pub mod types;

use clap::{Parser, Subcommand};
use types::{LeagueId, Season};

#[derive(Debug, Parser)]
#[clap(name = "footdata", about = "API-Football extraction CLI")]
pub struct Footdata {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch league, team, and player data for one season and persist it.
    ///
    /// Walks `/leagues`, `/teams`, and the paginated `/players` endpoint
    /// sequentially, then writes everything in a single transaction.
    Extract {
        /// League ID in API-Football (71 = Brasileirão Série A).
        #[clap(long, short, default_value_t = LeagueId::new(71))]
        league_id: LeagueId,

        /// Season year to extract (e.g. 2024).
        #[clap(long, short)]
        season: Season,

        /// Cap on pages fetched per team (overrides `FOOTDATA_MAX_PAGES`).
        #[clap(long)]
        max_pages: Option<u32>,

        /// Show detailed progress information.
        #[clap(long)]
        verbose: bool,
    },

    /// Create the database tables if they do not exist.
    InitDb {
        /// Print the database path when done.
        #[clap(long)]
        verbose: bool,
    },
}

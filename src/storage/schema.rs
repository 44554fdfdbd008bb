//! Database schema and connection management

use anyhow::{bail, Result};
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};

/// Tables of the relational contract, in FK-safe creation order.
pub const REQUIRED_TABLES: [&str; 6] = [
    "leagues",
    "seasons",
    "venues",
    "teams",
    "players",
    "player_statistics",
];

/// Database connection manager for extracted data.
///
/// One connection per run: opened at start, every batch write joins the
/// single transaction handed out by [`Database::transaction`], committed
/// once at the end. Dropping an uncommitted transaction rolls it back.
pub struct Database {
    pub(crate) conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open the database file, creating it and its parent directory if
    /// needed. The schema itself is not touched here.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: PathBuf::from(":memory:"),
        })
    }

    /// The connection target, safe to print in diagnostics.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read access for consumers and tests; the extraction pipeline itself
    /// never reads before writing.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the contract tables and supporting index if missing.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS leagues (
                id INTEGER PRIMARY KEY,
                name TEXT,
                type TEXT,
                logo TEXT,
                country_name TEXT,
                country_code TEXT,
                country_flag TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS seasons (
                league_id INTEGER,
                year INTEGER,
                start_date TEXT,
                end_date TEXT,
                current INTEGER,
                coverage_fixtures_events INTEGER,
                coverage_fixtures_lineups INTEGER,
                coverage_fixtures_statistics_fixtures INTEGER,
                coverage_fixtures_statistics_players INTEGER,
                coverage_injuries INTEGER,
                coverage_odds INTEGER,
                coverage_players INTEGER,
                coverage_predictions INTEGER,
                coverage_standings INTEGER,
                coverage_top_assists INTEGER,
                coverage_top_cards INTEGER,
                coverage_top_scorers INTEGER,
                PRIMARY KEY (league_id, year),
                FOREIGN KEY (league_id) REFERENCES leagues(id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS venues (
                id INTEGER PRIMARY KEY,
                name TEXT,
                address TEXT,
                city TEXT,
                capacity INTEGER,
                surface TEXT,
                image TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                id INTEGER PRIMARY KEY,
                name TEXT,
                code TEXT,
                country TEXT,
                founded INTEGER,
                national INTEGER,
                logo TEXT,
                venue_id INTEGER,
                FOREIGN KEY (venue_id) REFERENCES venues(id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY,
                firstname TEXT,
                lastname TEXT,
                name TEXT,
                age INTEGER,
                birth_date TEXT,
                birth_place TEXT,
                birth_country TEXT,
                nationality TEXT,
                height TEXT,
                weight TEXT,
                injured INTEGER,
                photo TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS player_statistics (
                player_id INTEGER,
                team_id INTEGER,
                league_id INTEGER,
                season INTEGER,
                position TEXT,
                number INTEGER,
                captain INTEGER,
                rating REAL,
                appearances INTEGER,
                lineups INTEGER,
                minutes INTEGER,
                goals_total INTEGER,
                goals_assists INTEGER,
                goals_conceded INTEGER,
                goals_saves INTEGER,
                shots_total INTEGER,
                shots_on INTEGER,
                passes_total INTEGER,
                passes_key INTEGER,
                passes_accuracy TEXT,
                tackles_total INTEGER,
                tackles_blocks INTEGER,
                tackles_interceptions INTEGER,
                duels_total INTEGER,
                duels_won INTEGER,
                dribbles_attempts INTEGER,
                dribbles_success INTEGER,
                dribbles_past INTEGER,
                fouls_committed INTEGER,
                fouls_drawn INTEGER,
                cards_yellow INTEGER,
                cards_yellowred INTEGER,
                cards_red INTEGER,
                penalty_won INTEGER,
                penalty_committed INTEGER,
                penalty_scored INTEGER,
                penalty_missed INTEGER,
                penalty_saved INTEGER,
                substitutes_in INTEGER,
                substitutes_out INTEGER,
                substitutes_bench INTEGER,
                PRIMARY KEY (player_id, team_id, league_id, season),
                FOREIGN KEY (player_id) REFERENCES players(id),
                FOREIGN KEY (team_id) REFERENCES teams(id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_player_statistics_league_season
             ON player_statistics(league_id, season)",
            [],
        )?;

        Ok(())
    }

    /// Probe connectivity and verify every contract table exists.
    pub fn check_ready(&self) -> Result<()> {
        self.conn.query_row("SELECT 1", [], |_| Ok(()))?;

        let mut missing = Vec::new();
        for table in REQUIRED_TABLES {
            let count: i64 = self.conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
                [table],
                |row| row.get(0),
            )?;
            if count == 0 {
                missing.push(table);
            }
        }

        if !missing.is_empty() {
            bail!("missing table(s): {}", missing.join(", "));
        }
        Ok(())
    }

    /// Row count for one contract table.
    pub fn count_rows(&self, table: &str) -> Result<i64> {
        if !REQUIRED_TABLES.contains(&table) {
            bail!("unknown table: {table}");
        }
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }

    /// Begin the run-scoped transaction every batch write joins.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }
}

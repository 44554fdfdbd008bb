//! Batch upsert operations
//!
//! Externally-sourced batches may carry duplicate or partial records, and
//! a single page can contain two rows for the same composite key. The
//! store must never be asked to arbitrate that: each batch is filtered
//! for key completeness and deduplicated (last occurrence wins) before
//! one conflict-targeted write per entity type. Writes join the caller's
//! ambient transaction and never commit on their own.

use anyhow::Result;
use rusqlite::{params_from_iter, Connection, ToSql};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use super::models::{LeagueRow, PlayerRow, PlayerStatisticsRow, SeasonRow, TeamRow, VenueRow};

/// A record that can participate in a batch upsert: a table, its key and
/// value columns, a typed key extraction, and parameter binding in
/// key-then-value column order.
pub(crate) trait UpsertRecord {
    const TABLE: &'static str;
    const KEY_COLUMNS: &'static [&'static str];
    const VALUE_COLUMNS: &'static [&'static str];
    type Key: Eq + Hash;

    /// The primary-key tuple, or `None` when any component is missing.
    fn key(&self) -> Option<Self::Key>;
    fn bind(&self) -> Vec<&dyn ToSql>;
}

/// Drop rows with an incomplete key (an upstream data gap, not a fault)
/// and deduplicate the rest by key, keeping the last occurrence in input
/// order (input order corresponds to most-recently-seen).
fn dedupe_last<R: UpsertRecord>(rows: Vec<R>) -> Vec<R> {
    let mut deduped: Vec<Option<R>> = Vec::with_capacity(rows.len());
    let mut slots: HashMap<R::Key, usize> = HashMap::new();

    for row in rows {
        let Some(key) = row.key() else { continue };
        match slots.entry(key) {
            Entry::Occupied(slot) => deduped[*slot.get()] = Some(row),
            Entry::Vacant(slot) => {
                slot.insert(deduped.len());
                deduped.push(Some(row));
            }
        }
    }

    deduped.into_iter().flatten().collect()
}

/// Build the conflict-targeted insert for one entity: key columns are the
/// conflict target, every value column is overwritten from the incoming
/// row. An entity with no value columns leaves conflicting rows untouched.
fn upsert_sql(table: &str, key_columns: &[&str], value_columns: &[&str]) -> String {
    let columns: Vec<&str> = key_columns.iter().chain(value_columns).copied().collect();
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");

    let conflict_action = if value_columns.is_empty() {
        "DO NOTHING".to_string()
    } else {
        let assignments = value_columns
            .iter()
            .map(|col| format!("{col} = excluded.{col}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("DO UPDATE SET {assignments}")
    };

    format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders}) ON CONFLICT({}) {conflict_action}",
        columns.join(", "),
        key_columns.join(", ")
    )
}

/// Write one batch through the caller's ambient transaction, returning
/// the number of rows written after filtering and deduplication.
pub(crate) fn upsert_batch<R: UpsertRecord>(conn: &Connection, rows: Vec<R>) -> Result<usize> {
    let rows = dedupe_last(rows);
    if rows.is_empty() {
        return Ok(0);
    }

    let sql = upsert_sql(R::TABLE, R::KEY_COLUMNS, R::VALUE_COLUMNS);
    let mut stmt = conn.prepare_cached(&sql)?;
    for row in &rows {
        stmt.execute(params_from_iter(row.bind()))?;
    }
    Ok(rows.len())
}

pub fn upsert_leagues(conn: &Connection, rows: Vec<LeagueRow>) -> Result<usize> {
    upsert_batch(conn, rows)
}

pub fn upsert_seasons(conn: &Connection, rows: Vec<SeasonRow>) -> Result<usize> {
    upsert_batch(conn, rows)
}

pub fn upsert_venues(conn: &Connection, rows: Vec<VenueRow>) -> Result<usize> {
    upsert_batch(conn, rows)
}

pub fn upsert_teams(conn: &Connection, rows: Vec<TeamRow>) -> Result<usize> {
    upsert_batch(conn, rows)
}

pub fn upsert_players(conn: &Connection, rows: Vec<PlayerRow>) -> Result<usize> {
    upsert_batch(conn, rows)
}

pub fn upsert_player_statistics(
    conn: &Connection,
    rows: Vec<PlayerStatisticsRow>,
) -> Result<usize> {
    upsert_batch(conn, rows)
}

impl UpsertRecord for LeagueRow {
    const TABLE: &'static str = "leagues";
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const VALUE_COLUMNS: &'static [&'static str] = &[
        "name",
        "type",
        "logo",
        "country_name",
        "country_code",
        "country_flag",
    ];
    type Key = u32;

    fn key(&self) -> Option<u32> {
        self.id
    }

    fn bind(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.id as &dyn ToSql,
            &self.name,
            &self.kind,
            &self.logo,
            &self.country_name,
            &self.country_code,
            &self.country_flag,
        ]
    }
}

impl UpsertRecord for SeasonRow {
    const TABLE: &'static str = "seasons";
    const KEY_COLUMNS: &'static [&'static str] = &["league_id", "year"];
    const VALUE_COLUMNS: &'static [&'static str] = &[
        "start_date",
        "end_date",
        "current",
        "coverage_fixtures_events",
        "coverage_fixtures_lineups",
        "coverage_fixtures_statistics_fixtures",
        "coverage_fixtures_statistics_players",
        "coverage_injuries",
        "coverage_odds",
        "coverage_players",
        "coverage_predictions",
        "coverage_standings",
        "coverage_top_assists",
        "coverage_top_cards",
        "coverage_top_scorers",
    ];
    type Key = (u32, u16);

    fn key(&self) -> Option<(u32, u16)> {
        Some((self.league_id?, self.year?))
    }

    fn bind(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.league_id as &dyn ToSql,
            &self.year,
            &self.start_date,
            &self.end_date,
            &self.current,
            &self.coverage_fixtures_events,
            &self.coverage_fixtures_lineups,
            &self.coverage_fixtures_statistics_fixtures,
            &self.coverage_fixtures_statistics_players,
            &self.coverage_injuries,
            &self.coverage_odds,
            &self.coverage_players,
            &self.coverage_predictions,
            &self.coverage_standings,
            &self.coverage_top_assists,
            &self.coverage_top_cards,
            &self.coverage_top_scorers,
        ]
    }
}

impl UpsertRecord for VenueRow {
    const TABLE: &'static str = "venues";
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const VALUE_COLUMNS: &'static [&'static str] =
        &["name", "address", "city", "capacity", "surface", "image"];
    type Key = u32;

    fn key(&self) -> Option<u32> {
        self.id
    }

    fn bind(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.id as &dyn ToSql,
            &self.name,
            &self.address,
            &self.city,
            &self.capacity,
            &self.surface,
            &self.image,
        ]
    }
}

impl UpsertRecord for TeamRow {
    const TABLE: &'static str = "teams";
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const VALUE_COLUMNS: &'static [&'static str] = &[
        "name", "code", "country", "founded", "national", "logo", "venue_id",
    ];
    type Key = u32;

    fn key(&self) -> Option<u32> {
        self.id
    }

    fn bind(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.id as &dyn ToSql,
            &self.name,
            &self.code,
            &self.country,
            &self.founded,
            &self.national,
            &self.logo,
            &self.venue_id,
        ]
    }
}

impl UpsertRecord for PlayerRow {
    const TABLE: &'static str = "players";
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const VALUE_COLUMNS: &'static [&'static str] = &[
        "firstname",
        "lastname",
        "name",
        "age",
        "birth_date",
        "birth_place",
        "birth_country",
        "nationality",
        "height",
        "weight",
        "injured",
        "photo",
    ];
    type Key = u32;

    fn key(&self) -> Option<u32> {
        self.id
    }

    fn bind(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.id as &dyn ToSql,
            &self.firstname,
            &self.lastname,
            &self.name,
            &self.age,
            &self.birth_date,
            &self.birth_place,
            &self.birth_country,
            &self.nationality,
            &self.height,
            &self.weight,
            &self.injured,
            &self.photo,
        ]
    }
}

impl UpsertRecord for PlayerStatisticsRow {
    const TABLE: &'static str = "player_statistics";
    const KEY_COLUMNS: &'static [&'static str] = &["player_id", "team_id", "league_id", "season"];
    const VALUE_COLUMNS: &'static [&'static str] = &[
        "position",
        "number",
        "captain",
        "rating",
        "appearances",
        "lineups",
        "minutes",
        "goals_total",
        "goals_assists",
        "goals_conceded",
        "goals_saves",
        "shots_total",
        "shots_on",
        "passes_total",
        "passes_key",
        "passes_accuracy",
        "tackles_total",
        "tackles_blocks",
        "tackles_interceptions",
        "duels_total",
        "duels_won",
        "dribbles_attempts",
        "dribbles_success",
        "dribbles_past",
        "fouls_committed",
        "fouls_drawn",
        "cards_yellow",
        "cards_yellowred",
        "cards_red",
        "penalty_won",
        "penalty_committed",
        "penalty_scored",
        "penalty_missed",
        "penalty_saved",
        "substitutes_in",
        "substitutes_out",
        "substitutes_bench",
    ];
    type Key = (u32, u32, u32, u16);

    fn key(&self) -> Option<(u32, u32, u32, u16)> {
        Some((self.player_id?, self.team_id?, self.league_id?, self.season?))
    }

    fn bind(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.player_id as &dyn ToSql,
            &self.team_id,
            &self.league_id,
            &self.season,
            &self.position,
            &self.number,
            &self.captain,
            &self.rating,
            &self.appearances,
            &self.lineups,
            &self.minutes,
            &self.goals_total,
            &self.goals_assists,
            &self.goals_conceded,
            &self.goals_saves,
            &self.shots_total,
            &self.shots_on,
            &self.passes_total,
            &self.passes_key,
            &self.passes_accuracy,
            &self.tackles_total,
            &self.tackles_blocks,
            &self.tackles_interceptions,
            &self.duels_total,
            &self.duels_won,
            &self.dribbles_attempts,
            &self.dribbles_success,
            &self.dribbles_past,
            &self.fouls_committed,
            &self.fouls_drawn,
            &self.cards_yellow,
            &self.cards_yellowred,
            &self.cards_red,
            &self.penalty_won,
            &self.penalty_committed,
            &self.penalty_scored,
            &self.penalty_missed,
            &self.penalty_saved,
            &self.substitutes_in,
            &self.substitutes_out,
            &self.substitutes_bench,
        ]
    }
}

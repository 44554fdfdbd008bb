//! Row structs for the six persisted entities.
//!
//! A mapped row mirrors the relational contract rather than the wire
//! format: key fields may still be absent (an upstream data gap, checked
//! at upsert time) and every non-key column is nullable. Rows are
//! immutable once mapped; repeated runs converge tables toward the most
//! recently fetched state.

use chrono::NaiveDate;

/// One row of `leagues`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeagueRow {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub logo: Option<String>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub country_flag: Option<String>,
}

/// One row of `seasons`, keyed by (league_id, year).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeasonRow {
    pub league_id: Option<u32>,
    pub year: Option<u16>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub current: Option<bool>,
    pub coverage_fixtures_events: Option<bool>,
    pub coverage_fixtures_lineups: Option<bool>,
    pub coverage_fixtures_statistics_fixtures: Option<bool>,
    pub coverage_fixtures_statistics_players: Option<bool>,
    pub coverage_injuries: Option<bool>,
    pub coverage_odds: Option<bool>,
    pub coverage_players: Option<bool>,
    pub coverage_predictions: Option<bool>,
    pub coverage_standings: Option<bool>,
    pub coverage_top_assists: Option<bool>,
    pub coverage_top_cards: Option<bool>,
    pub coverage_top_scorers: Option<bool>,
}

/// One row of `venues`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VenueRow {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<u32>,
    pub surface: Option<String>,
    pub image: Option<String>,
}

/// One row of `teams`. `venue_id` is a nullable reference to `venues`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TeamRow {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub country: Option<String>,
    pub founded: Option<u16>,
    pub national: Option<bool>,
    pub logo: Option<String>,
    pub venue_id: Option<u32>,
}

/// One row of `players`: biographical data only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerRow {
    pub id: Option<u32>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub name: Option<String>,
    pub age: Option<u16>,
    pub birth_date: Option<NaiveDate>,
    pub birth_place: Option<String>,
    pub birth_country: Option<String>,
    pub nationality: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub injured: Option<bool>,
    pub photo: Option<String>,
}

/// One row of `player_statistics`, keyed by
/// (player_id, team_id, league_id, season).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerStatisticsRow {
    pub player_id: Option<u32>,
    pub team_id: Option<u32>,
    pub league_id: Option<u32>,
    pub season: Option<u16>,
    pub position: Option<String>,
    pub number: Option<u16>,
    pub captain: Option<bool>,
    pub rating: Option<f64>,
    pub appearances: Option<u32>,
    pub lineups: Option<u32>,
    pub minutes: Option<u32>,
    pub goals_total: Option<u32>,
    pub goals_assists: Option<u32>,
    pub goals_conceded: Option<u32>,
    pub goals_saves: Option<u32>,
    pub shots_total: Option<u32>,
    pub shots_on: Option<u32>,
    pub passes_total: Option<u32>,
    pub passes_key: Option<u32>,
    pub passes_accuracy: Option<String>,
    pub tackles_total: Option<u32>,
    pub tackles_blocks: Option<u32>,
    pub tackles_interceptions: Option<u32>,
    pub duels_total: Option<u32>,
    pub duels_won: Option<u32>,
    pub dribbles_attempts: Option<u32>,
    pub dribbles_success: Option<u32>,
    pub dribbles_past: Option<u32>,
    pub fouls_committed: Option<u32>,
    pub fouls_drawn: Option<u32>,
    pub cards_yellow: Option<u32>,
    pub cards_yellowred: Option<u32>,
    pub cards_red: Option<u32>,
    pub penalty_won: Option<u32>,
    pub penalty_committed: Option<u32>,
    pub penalty_scored: Option<u32>,
    pub penalty_missed: Option<u32>,
    pub penalty_saved: Option<u32>,
    pub substitutes_in: Option<u32>,
    pub substitutes_out: Option<u32>,
    pub substitutes_bench: Option<u32>,
}

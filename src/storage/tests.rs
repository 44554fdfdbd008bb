//! Unit tests for storage functionality

use super::queries::{self, upsert_batch, UpsertRecord};
use super::*;

fn ready_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.ensure_schema().unwrap();
    db
}

fn league(id: Option<u32>, name: &str) -> LeagueRow {
    LeagueRow {
        id,
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn stats(player: u32, team: u32, league: u32, season: u16, goals: u32) -> PlayerStatisticsRow {
    PlayerStatisticsRow {
        player_id: Some(player),
        team_id: Some(team),
        league_id: Some(league),
        season: Some(season),
        goals_total: Some(goals),
        ..Default::default()
    }
}

#[test]
fn test_ensure_schema_then_check_ready() {
    let db = Database::open_in_memory().unwrap();

    // fresh database has no tables
    assert!(db.check_ready().is_err());

    db.ensure_schema().unwrap();
    db.check_ready().unwrap();

    // idempotent
    db.ensure_schema().unwrap();
    db.check_ready().unwrap();
}

#[test]
fn test_check_ready_names_missing_tables() {
    let db = Database::open_in_memory().unwrap();
    let err = db.check_ready().unwrap_err().to_string();
    assert!(err.contains("missing table(s)"));
    assert!(err.contains("player_statistics"));
}

#[test]
fn test_count_rows_rejects_unknown_table() {
    let db = ready_db();
    assert!(db.count_rows("sqlite_master").is_err());
    assert_eq!(db.count_rows("leagues").unwrap(), 0);
}

#[test]
fn test_upsert_drops_rows_with_incomplete_keys() {
    let db = ready_db();

    let written = queries::upsert_leagues(
        &db.conn,
        vec![league(None, "keyless"), league(Some(71), "Serie A")],
    )
    .unwrap();

    assert_eq!(written, 1);
    assert_eq!(db.count_rows("leagues").unwrap(), 1);
}

#[test]
fn test_upsert_statistics_drops_partial_composite_keys() {
    let db = ready_db();

    let mut missing_team = stats(10, 0, 71, 2024, 1);
    missing_team.team_id = None;

    let written = queries::upsert_player_statistics(
        &db.conn,
        vec![missing_team, stats(10, 127, 71, 2024, 2)],
    )
    .unwrap();

    assert_eq!(written, 1);
    assert_eq!(db.count_rows("player_statistics").unwrap(), 1);
}

#[test]
fn test_upsert_is_idempotent() {
    let db = ready_db();
    let rows = vec![league(Some(71), "Serie A"), league(Some(39), "Premier League")];

    assert_eq!(queries::upsert_leagues(&db.conn, rows.clone()).unwrap(), 2);
    assert_eq!(queries::upsert_leagues(&db.conn, rows).unwrap(), 2);

    assert_eq!(db.count_rows("leagues").unwrap(), 2);
}

#[test]
fn test_upsert_dedupes_last_occurrence_wins() {
    let db = ready_db();

    // one batch, same key twice: the later row's values must land
    let written = queries::upsert_leagues(
        &db.conn,
        vec![league(Some(71), "stale name"), league(Some(71), "fresh name")],
    )
    .unwrap();

    assert_eq!(written, 1);
    let name: String = db
        .conn
        .query_row("SELECT name FROM leagues WHERE id = 71", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "fresh name");
}

#[test]
fn test_upsert_overwrites_on_conflict_across_batches() {
    let db = ready_db();

    queries::upsert_leagues(&db.conn, vec![league(Some(71), "first run")]).unwrap();
    queries::upsert_leagues(&db.conn, vec![league(Some(71), "second run")]).unwrap();

    assert_eq!(db.count_rows("leagues").unwrap(), 1);
    let name: String = db
        .conn
        .query_row("SELECT name FROM leagues WHERE id = 71", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "second run");
}

#[test]
fn test_statistics_composite_key_separates_rows() {
    let db = ready_db();

    // same player, different team: two rows; same full key: last wins
    let written = queries::upsert_player_statistics(
        &db.conn,
        vec![
            stats(10, 127, 71, 2024, 1),
            stats(10, 131, 71, 2024, 4),
            stats(10, 127, 71, 2024, 7),
        ],
    )
    .unwrap();

    assert_eq!(written, 2);
    assert_eq!(db.count_rows("player_statistics").unwrap(), 2);

    let goals: u32 = db
        .conn
        .query_row(
            "SELECT goals_total FROM player_statistics
             WHERE player_id = 10 AND team_id = 127 AND league_id = 71 AND season = 2024",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(goals, 7);
}

#[test]
fn test_team_row_keeps_null_venue_reference() {
    let db = ready_db();

    let team = TeamRow {
        id: Some(127),
        name: Some("Flamengo".to_string()),
        venue_id: None,
        ..Default::default()
    };
    queries::upsert_teams(&db.conn, vec![team]).unwrap();

    let venue_id: Option<u32> = db
        .conn
        .query_row("SELECT venue_id FROM teams WHERE id = 127", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(venue_id, None);
}

#[test]
fn test_upsert_empty_batch_writes_nothing() {
    let db = ready_db();
    assert_eq!(queries::upsert_venues(&db.conn, Vec::new()).unwrap(), 0);
    assert_eq!(db.count_rows("venues").unwrap(), 0);
}

// Key-only entity: a conflicting row must be left untouched, not rewritten.
#[derive(Debug, Clone)]
struct Membership {
    league_id: Option<u32>,
    team_id: Option<u32>,
}

impl UpsertRecord for Membership {
    const TABLE: &'static str = "memberships";
    const KEY_COLUMNS: &'static [&'static str] = &["league_id", "team_id"];
    const VALUE_COLUMNS: &'static [&'static str] = &[];
    type Key = (u32, u32);

    fn key(&self) -> Option<(u32, u32)> {
        Some((self.league_id?, self.team_id?))
    }

    fn bind(&self) -> Vec<&dyn rusqlite::ToSql> {
        vec![&self.league_id as &dyn rusqlite::ToSql, &self.team_id]
    }
}

#[test]
fn test_upsert_key_only_entity_ignores_conflicts() {
    let db = Database::open_in_memory().unwrap();
    db.conn
        .execute(
            "CREATE TABLE memberships (league_id INTEGER, team_id INTEGER,
             PRIMARY KEY (league_id, team_id))",
            [],
        )
        .unwrap();

    let row = Membership {
        league_id: Some(71),
        team_id: Some(127),
    };
    upsert_batch(&db.conn, vec![row.clone()]).unwrap();
    upsert_batch(&db.conn, vec![row]).unwrap();

    let count: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM memberships", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

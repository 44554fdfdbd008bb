//! Integration tests for batch upsert semantics through the public API

use footdata::storage::{queries, Database, LeagueRow, PlayerStatisticsRow, TeamRow, VenueRow};

fn ready_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.ensure_schema().unwrap();
    db
}

fn league(id: u32, name: &str) -> LeagueRow {
    LeagueRow {
        id: Some(id),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn stats(player: u32, team: u32, goals: u32) -> PlayerStatisticsRow {
    PlayerStatisticsRow {
        player_id: Some(player),
        team_id: Some(team),
        league_id: Some(71),
        season: Some(2024),
        goals_total: Some(goals),
        ..Default::default()
    }
}

#[test]
fn test_upsert_twice_equals_upsert_once() {
    let mut db = ready_db();
    let batch = vec![
        stats(10, 127, 2),
        stats(11, 127, 0),
        stats(10, 131, 1),
    ];

    let tx = db.transaction().unwrap();
    let first = queries::upsert_player_statistics(&tx, batch.clone()).unwrap();
    tx.commit().unwrap();

    let tx = db.transaction().unwrap();
    let second = queries::upsert_player_statistics(&tx, batch).unwrap();
    tx.commit().unwrap();

    assert_eq!(first, 3);
    assert_eq!(second, 3);
    assert_eq!(db.count_rows("player_statistics").unwrap(), 3);
}

#[test]
fn test_later_duplicate_wins_within_one_batch() {
    let mut db = ready_db();

    let tx = db.transaction().unwrap();
    let written = queries::upsert_player_statistics(
        &tx,
        vec![stats(10, 127, 2), stats(10, 127, 5)],
    )
    .unwrap();
    tx.commit().unwrap();

    assert_eq!(written, 1);
    let goals: u32 = db
        .connection()
        .query_row(
            "SELECT goals_total FROM player_statistics WHERE player_id = 10",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(goals, 5);
}

#[test]
fn test_key_gaps_are_dropped_not_errors() {
    let mut db = ready_db();

    let keyless = VenueRow {
        id: None,
        name: Some("Maracanã".to_string()),
        ..Default::default()
    };
    let keyed = VenueRow {
        id: Some(204),
        name: Some("Morumbi".to_string()),
        ..Default::default()
    };

    let tx = db.transaction().unwrap();
    let written = queries::upsert_venues(&tx, vec![keyless, keyed]).unwrap();
    tx.commit().unwrap();

    assert_eq!(written, 1);
    assert_eq!(db.count_rows("venues").unwrap(), 1);
}

#[test]
fn test_team_with_null_venue_reference_is_written() {
    let mut db = ready_db();

    let team = TeamRow {
        id: Some(127),
        name: Some("Flamengo".to_string()),
        venue_id: None,
        ..Default::default()
    };

    let tx = db.transaction().unwrap();
    queries::upsert_teams(&tx, vec![team]).unwrap();
    tx.commit().unwrap();

    let venue_id: Option<u32> = db
        .connection()
        .query_row("SELECT venue_id FROM teams WHERE id = 127", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(venue_id, None);
}

#[test]
fn test_rerun_converges_to_latest_values() {
    let mut db = ready_db();

    let tx = db.transaction().unwrap();
    queries::upsert_leagues(&tx, vec![league(71, "old name")]).unwrap();
    tx.commit().unwrap();

    let tx = db.transaction().unwrap();
    queries::upsert_leagues(&tx, vec![league(71, "new name")]).unwrap();
    tx.commit().unwrap();

    assert_eq!(db.count_rows("leagues").unwrap(), 1);
    let name: String = db
        .connection()
        .query_row("SELECT name FROM leagues WHERE id = 71", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "new name");
}

#[test]
fn test_uncommitted_transaction_rolls_back_on_drop() {
    let mut db = ready_db();

    {
        let tx = db.transaction().unwrap();
        queries::upsert_leagues(&tx, vec![league(71, "Serie A")]).unwrap();
        // dropped without commit
    }

    assert_eq!(db.count_rows("leagues").unwrap(), 0);
}

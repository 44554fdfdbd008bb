//! Integration tests for API envelope and payload decoding

use footdata::apifootball::types::{Envelope, LeagueEntry, PlayerEntry, TeamEntry};
use serde_json::json;

#[test]
fn test_league_envelope_full_decode() {
    let body = json!({
        "get": "leagues",
        "parameters": {"id": "71", "season": "2024"},
        "errors": [],
        "results": 1,
        "paging": {"current": 1, "total": 1},
        "response": [{
            "league": {"id": 71, "name": "Serie A", "type": "League",
                       "logo": "https://media.api-sports.io/football/leagues/71.png"},
            "country": {"name": "Brazil", "code": "BR",
                        "flag": "https://media.api-sports.io/flags/br.svg"},
            "seasons": [
                {"year": 2023, "start": "2023-04-15", "end": "2023-12-07", "current": false},
                {"year": 2024, "start": "2024-04-13", "end": "2024-12-08", "current": true,
                 "coverage": {
                     "fixtures": {"events": true, "lineups": true,
                                  "statistics_fixtures": false, "statistics_players": false},
                     "standings": true, "players": true, "top_scorers": true,
                     "top_assists": true, "top_cards": true, "injuries": false,
                     "predictions": true, "odds": false
                 }}
            ]
        }]
    });

    let envelope: Envelope<LeagueEntry> = serde_json::from_value(body).unwrap();

    assert_eq!(envelope.results, 1);
    assert!(envelope.errors.is_empty());
    assert!(envelope.paging.is_last(1));

    let entry = &envelope.response[0];
    assert_eq!(entry.league_id(), Some(71));
    assert_eq!(entry.league_name(), Some("Serie A"));
    assert_eq!(entry.seasons.len(), 2);
    assert_eq!(entry.seasons[1].year, Some(2024));
    assert_eq!(entry.seasons[1].current, Some(true));
}

#[test]
fn test_teams_envelope_with_partial_venues() {
    let body = json!({
        "errors": [],
        "results": 2,
        "paging": {"current": 1, "total": 1},
        "response": [
            {"team": {"id": 127, "name": "Flamengo", "code": "FLA", "country": "Brazil",
                      "founded": 1895, "national": false},
             "venue": {"id": 1000, "name": "Maracanã", "city": "Rio de Janeiro",
                       "capacity": 78838, "surface": "grass"}},
            {"team": {"id": 131, "name": "Corinthians"},
             "venue": {"id": null, "name": null}}
        ]
    });

    let envelope: Envelope<TeamEntry> = serde_json::from_value(body).unwrap();

    assert_eq!(envelope.response.len(), 2);
    assert_eq!(envelope.response[0].venue_id(), Some(1000));
    assert_eq!(envelope.response[1].team_id(), Some(131));
    assert_eq!(envelope.response[1].venue_id(), None);
}

#[test]
fn test_players_envelope_rate_limit_errors_object() {
    // a throttled 200: empty response, errors delivered as an object
    let body = json!({
        "errors": {"rateLimit": "Too many requests. Your rate limit is 10 requests per minute."},
        "results": 0,
        "paging": {"current": 1, "total": 1},
        "response": []
    });

    let envelope: Envelope<PlayerEntry> = serde_json::from_value(body).unwrap();

    assert!(envelope.is_empty());
    assert!(envelope.errors.rate_limited());
    assert!(!envelope.errors.plan_restricted());
}

#[test]
fn test_players_envelope_statistics_with_mixed_value_shapes() {
    let body = json!({
        "errors": [],
        "results": 1,
        "paging": {"current": 1, "total": 1},
        "response": [{
            "player": {"id": 10, "name": "Gabriel Barbosa", "age": 27,
                       "birth": {"date": "1996-08-30", "country": "Brazil"}},
            "statistics": [{
                "team": {"id": 127, "name": "Flamengo"},
                "league": {"id": 71, "season": 2024},
                "games": {"appearences": 20, "lineups": 15, "minutes": 1400,
                          "number": null, "position": "Attacker",
                          "rating": 7.1, "captain": false},
                "substitutes": {"in": 5, "out": 2, "bench": 6},
                "passes": {"total": 320, "key": 18, "accuracy": 74},
                "penalty": {"won": 1, "commited": 0, "scored": 4, "missed": 1}
            }]
        }]
    });

    let envelope: Envelope<PlayerEntry> = serde_json::from_value(body).unwrap();
    let entry = &envelope.response[0];

    assert_eq!(entry.player_id(), Some(10));
    let stats = &entry.statistics[0];
    assert_eq!(stats.team_id(), Some(127));
    assert_eq!(stats.season(), Some(2024));

    let games = stats.games.as_ref().unwrap();
    // numeric rating normalized to text at the wire boundary
    assert_eq!(games.rating.as_deref(), Some("7.1"));

    let passes = stats.passes.as_ref().unwrap();
    assert_eq!(passes.accuracy.as_deref(), Some("74"));

    let penalty = stats.penalty.as_ref().unwrap();
    assert_eq!(penalty.committed, Some(0));

    let subs = stats.substitutes.as_ref().unwrap();
    assert_eq!(subs.subbed_in, Some(5));
}

#[test]
fn test_envelope_tolerates_missing_members() {
    let envelope: Envelope<PlayerEntry> = serde_json::from_value(json!({})).unwrap();

    assert!(envelope.is_empty());
    assert!(envelope.errors.is_empty());
    assert_eq!(envelope.results, 0);
    assert!(envelope.paging.is_last(1));
}

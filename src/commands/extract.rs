//! Extraction pipeline: league → season → teams/venues → players/stats.
//!
//! Stages run strictly in sequence on one task. Failures that prevent
//! establishing the root entities (league, teams) abort the run; a team
//! yielding no players is skipped. Everything successfully fetched is
//! written through batch upserts inside one transaction, committed once.

use tokio::time::sleep;

use crate::apifootball::ApiClient;
use crate::cli::types::{LeagueId, PlayerId, Season, TeamId};
use crate::config::Config;
use crate::error::{FootdataError, Result};
use crate::storage::{queries, Database};

use super::mappers::{
    map_league, map_player, map_player_statistics, map_seasons, map_team, map_venue, StatsContext,
};

/// Rows written per entity by a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub leagues: usize,
    pub seasons: usize,
    pub venues: usize,
    pub teams: usize,
    pub players: usize,
    pub statistics: usize,
}

/// Run the full extraction for one league and season.
pub async fn handle_extract(
    config: &Config,
    league_id: LeagueId,
    season: Season,
    verbose: bool,
) -> Result<ExtractSummary> {
    println!("Starting extraction for league {league_id} season {season}");

    let mut db = Database::open(&config.db_path)?;
    db.check_ready()
        .map_err(|err| FootdataError::DatabaseNotReady {
            path: config.db_path.display().to_string(),
            message: err.to_string(),
        })?;
    if verbose {
        println!("✓ Database ready at {}", config.db_path.display());
    }

    let client = ApiClient::new(config)?;

    // LEAGUE: nothing downstream relates to anything without it
    let league_envelope = client.league(league_id, season).await?;
    if league_envelope.is_empty() {
        println!(
            "⚠ League lookup came back empty (results={}, errors={})",
            league_envelope.results, league_envelope.errors
        );
        return Err(FootdataError::LeagueNotFound {
            league_id: league_id.as_u32(),
            season: season.as_u16(),
        });
    }
    let league_entry = &league_envelope.response[0];
    let league_row = map_league(league_entry);
    println!(
        "✓ League '{}' fetched",
        league_entry.league_name().unwrap_or("unknown")
    );

    // SEASON: coverage flags are non-essential, so a miss is only a warning
    let season_rows = map_seasons(league_row.id, league_entry, season);
    if season_rows.is_empty() {
        println!("⚠ Season {season} not present in the league payload");
    } else if verbose {
        println!("✓ {} season record(s) collected", season_rows.len());
    }

    // TEAMS_VENUES: teams scope every subsequent player query
    let teams_envelope = client.teams(league_id, season).await?;
    if teams_envelope.is_empty() {
        println!(
            "⚠ Teams lookup came back empty (results={}, errors={})",
            teams_envelope.results, teams_envelope.errors
        );
        return Err(FootdataError::NoTeams {
            league_id: league_id.as_u32(),
            season: season.as_u16(),
        });
    }

    let mut venue_rows = Vec::new();
    let mut team_rows = Vec::new();
    for entry in &teams_envelope.response {
        venue_rows.push(map_venue(entry));
        team_rows.push(map_team(entry));
    }
    println!("✓ {} team record(s) fetched", teams_envelope.response.len());

    // PLAYERS_STATS: sequential per team, inter-team delay even after an
    // empty team to preserve the global rate budget
    let team_ids: Vec<TeamId> = teams_envelope
        .response
        .iter()
        .filter_map(|entry| entry.team_id())
        .map(TeamId::new)
        .collect();

    let mut player_rows = Vec::new();
    let mut stats_rows = Vec::new();
    for team_id in team_ids {
        println!("Fetching players for team {team_id}...");
        let players = client.all_players(team_id, season).await?;

        if players.is_empty() {
            println!("⚠ No players returned for team {team_id}, skipping");
            sleep(config.team_delay).await;
            continue;
        }

        for entry in &players {
            let Some(player) = entry.player.as_ref() else {
                continue;
            };
            let Some(player_id) = player.id else { continue };

            player_rows.push(map_player(player));

            let ctx = StatsContext {
                player_id: PlayerId::new(player_id),
                team_id,
                league_id,
                season,
            };
            for stats in &entry.statistics {
                stats_rows.push(map_player_statistics(stats, &ctx));
            }
        }
        if verbose {
            println!("✓ Team {team_id}: {} player record(s)", players.len());
        }
        sleep(config.team_delay).await;
    }

    // DONE: all batches in one transaction, FK-safe order, single commit
    let tx = db.transaction()?;
    let summary = ExtractSummary {
        leagues: queries::upsert_leagues(&tx, vec![league_row])?,
        seasons: queries::upsert_seasons(&tx, season_rows)?,
        venues: queries::upsert_venues(&tx, venue_rows)?,
        teams: queries::upsert_teams(&tx, team_rows)?,
        players: queries::upsert_players(&tx, player_rows)?,
        statistics: queries::upsert_player_statistics(&tx, stats_rows)?,
    };
    tx.commit()?;

    println!(
        "✓ Extraction complete: {} league(s), {} season(s), {} venue(s), {} team(s), {} player(s), {} statistics row(s) written",
        summary.leagues,
        summary.seasons,
        summary.venues,
        summary.teams,
        summary.players,
        summary.statistics
    );
    Ok(summary)
}

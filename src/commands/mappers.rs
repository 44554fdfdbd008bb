//! Field mapping from API payloads to storage rows.
//!
//! Pure and stateless: one API-shaped record in, one persistence-shaped
//! row out. Key components the payload lacks stay `None`; they are either
//! resolved from the enclosing context (statistics) or dropped at upsert
//! time (key gaps). Coercion failures degrade the field, never the row.

use chrono::NaiveDate;

use crate::apifootball::types::{LeagueEntry, PlayerInfo, SeasonInfo, StatisticsEntry, TeamEntry};
use crate::cli::types::{LeagueId, PlayerId, Season, TeamId};
use crate::storage::models::{
    LeagueRow, PlayerRow, PlayerStatisticsRow, SeasonRow, TeamRow, VenueRow,
};

/// Parse an ISO `YYYY-MM-DD` date, treating failures as absence.
fn to_date(value: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value?, "%Y-%m-%d").ok()
}

/// Parse a decimal carried as text, treating failures as absence.
fn to_decimal(value: Option<&str>) -> Option<f64> {
    value?.trim().parse().ok()
}

pub fn map_league(entry: &LeagueEntry) -> LeagueRow {
    let league = entry.league.as_ref();
    let country = entry.country.as_ref();

    LeagueRow {
        id: league.and_then(|league| league.id),
        name: league.and_then(|league| league.name.clone()),
        kind: league.and_then(|league| league.kind.clone()),
        logo: league.and_then(|league| league.logo.clone()),
        country_name: country.and_then(|country| country.name.clone()),
        country_code: country.and_then(|country| country.code.clone()),
        country_flag: country.and_then(|country| country.flag.clone()),
    }
}

/// Map the league's embedded season list, keeping only the requested year.
pub fn map_seasons(league_id: Option<u32>, entry: &LeagueEntry, season: Season) -> Vec<SeasonRow> {
    entry
        .seasons
        .iter()
        .filter(|info| info.year == Some(season.as_u16()))
        .map(|info| map_season(league_id, info))
        .collect()
}

fn map_season(league_id: Option<u32>, info: &SeasonInfo) -> SeasonRow {
    let coverage = info.coverage.as_ref();
    let fixtures = coverage.and_then(|coverage| coverage.fixtures.as_ref());

    SeasonRow {
        league_id,
        year: info.year,
        start_date: to_date(info.start.as_deref()),
        end_date: to_date(info.end.as_deref()),
        current: info.current,
        coverage_fixtures_events: fixtures.and_then(|f| f.events),
        coverage_fixtures_lineups: fixtures.and_then(|f| f.lineups),
        coverage_fixtures_statistics_fixtures: fixtures.and_then(|f| f.statistics_fixtures),
        coverage_fixtures_statistics_players: fixtures.and_then(|f| f.statistics_players),
        coverage_injuries: coverage.and_then(|c| c.injuries),
        coverage_odds: coverage.and_then(|c| c.odds),
        coverage_players: coverage.and_then(|c| c.players),
        coverage_predictions: coverage.and_then(|c| c.predictions),
        coverage_standings: coverage.and_then(|c| c.standings),
        coverage_top_assists: coverage.and_then(|c| c.top_assists),
        coverage_top_cards: coverage.and_then(|c| c.top_cards),
        coverage_top_scorers: coverage.and_then(|c| c.top_scorers),
    }
}

pub fn map_venue(entry: &TeamEntry) -> VenueRow {
    let venue = entry.venue.as_ref();

    VenueRow {
        id: venue.and_then(|venue| venue.id),
        name: venue.and_then(|venue| venue.name.clone()),
        address: venue.and_then(|venue| venue.address.clone()),
        city: venue.and_then(|venue| venue.city.clone()),
        capacity: venue.and_then(|venue| venue.capacity),
        surface: venue.and_then(|venue| venue.surface.clone()),
        image: venue.and_then(|venue| venue.image.clone()),
    }
}

pub fn map_team(entry: &TeamEntry) -> TeamRow {
    let team = entry.team.as_ref();

    TeamRow {
        id: team.and_then(|team| team.id),
        name: team.and_then(|team| team.name.clone()),
        code: team.and_then(|team| team.code.clone()),
        country: team.and_then(|team| team.country.clone()),
        founded: team.and_then(|team| team.founded),
        national: team.and_then(|team| team.national),
        logo: team.and_then(|team| team.logo.clone()),
        venue_id: entry.venue_id(),
    }
}

pub fn map_player(info: &PlayerInfo) -> PlayerRow {
    let birth = info.birth.as_ref();

    PlayerRow {
        id: info.id,
        firstname: info.firstname.clone(),
        lastname: info.lastname.clone(),
        name: info.name.clone(),
        age: info.age,
        birth_date: to_date(birth.and_then(|birth| birth.date.as_deref())),
        birth_place: birth.and_then(|birth| birth.place.clone()),
        birth_country: birth.and_then(|birth| birth.country.clone()),
        nationality: info.nationality.clone(),
        height: info.height.clone(),
        weight: info.weight.clone(),
        injured: info.injured,
        photo: info.photo.clone(),
    }
}

/// The enclosing player/team/league/season, used for key components the
/// statistics block does not name itself.
#[derive(Debug, Clone, Copy)]
pub struct StatsContext {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub league_id: LeagueId,
    pub season: Season,
}

pub fn map_player_statistics(stats: &StatisticsEntry, ctx: &StatsContext) -> PlayerStatisticsRow {
    let games = stats.games.as_ref();
    let goals = stats.goals.as_ref();
    let shots = stats.shots.as_ref();
    let passes = stats.passes.as_ref();
    let tackles = stats.tackles.as_ref();
    let duels = stats.duels.as_ref();
    let dribbles = stats.dribbles.as_ref();
    let fouls = stats.fouls.as_ref();
    let cards = stats.cards.as_ref();
    let penalty = stats.penalty.as_ref();
    let substitutes = stats.substitutes.as_ref();

    PlayerStatisticsRow {
        player_id: Some(ctx.player_id.as_u32()),
        team_id: stats.team_id().or(Some(ctx.team_id.as_u32())),
        league_id: stats.league_id().or(Some(ctx.league_id.as_u32())),
        season: stats.season().or(Some(ctx.season.as_u16())),
        position: games.and_then(|g| g.position.clone()),
        number: games.and_then(|g| g.number),
        captain: games.and_then(|g| g.captain),
        rating: to_decimal(games.and_then(|g| g.rating.as_deref())),
        appearances: games.and_then(|g| g.appearences),
        lineups: games.and_then(|g| g.lineups),
        minutes: games.and_then(|g| g.minutes),
        goals_total: goals.and_then(|g| g.total),
        goals_assists: goals.and_then(|g| g.assists),
        goals_conceded: goals.and_then(|g| g.conceded),
        goals_saves: goals.and_then(|g| g.saves),
        shots_total: shots.and_then(|s| s.total),
        shots_on: shots.and_then(|s| s.on),
        passes_total: passes.and_then(|p| p.total),
        passes_key: passes.and_then(|p| p.key),
        passes_accuracy: passes.and_then(|p| p.accuracy.clone()),
        tackles_total: tackles.and_then(|t| t.total),
        tackles_blocks: tackles.and_then(|t| t.blocks),
        tackles_interceptions: tackles.and_then(|t| t.interceptions),
        duels_total: duels.and_then(|d| d.total),
        duels_won: duels.and_then(|d| d.won),
        dribbles_attempts: dribbles.and_then(|d| d.attempts),
        dribbles_success: dribbles.and_then(|d| d.success),
        dribbles_past: dribbles.and_then(|d| d.past),
        fouls_committed: fouls.and_then(|f| f.committed),
        fouls_drawn: fouls.and_then(|f| f.drawn),
        cards_yellow: cards.and_then(|c| c.yellow),
        cards_yellowred: cards.and_then(|c| c.yellowred),
        cards_red: cards.and_then(|c| c.red),
        penalty_won: penalty.and_then(|p| p.won),
        penalty_committed: penalty.and_then(|p| p.committed),
        penalty_scored: penalty.and_then(|p| p.scored),
        penalty_missed: penalty.and_then(|p| p.missed),
        penalty_saved: penalty.and_then(|p| p.saved),
        substitutes_in: substitutes.and_then(|s| s.subbed_in),
        substitutes_out: substitutes.and_then(|s| s.subbed_out),
        substitutes_bench: substitutes.and_then(|s| s.bench),
    }
}

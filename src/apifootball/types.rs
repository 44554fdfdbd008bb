//! Typed views of API-Football v3 response payloads.
//!
//! Every endpoint wraps its records in the same envelope:
//! `{get, parameters, errors, results, paging, response}`. The `errors`
//! member is an empty JSON array when the call is clean and an object
//! keyed by error class (`rateLimit`, `plan`, ...) when it is not, so it
//! gets a custom deserializer. Nested payload members are all optional on
//! the wire; lookups the pipeline depends on are exposed as named
//! accessors instead of chained `Option` plumbing at call sites.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;


/// Body-encoded quota error key (request budget exhausted despite a 200).
pub const RATE_LIMIT_KEY: &str = "rateLimit";
/// Subscription-tier restriction key (no further pages will be served).
pub const PLAN_KEY: &str = "plan";
/// Synthetic key for transport failures that exhausted the retry budget.
pub const NETWORK_KEY: &str = "network";

/// Accept a JSON string or number, normalized to a string.
///
/// API-Football is inconsistent here: `rating` arrives as `"6.35"`,
/// `passes.accuracy` as a bare number, and both may be null.
fn de_stringish<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(_) => None,
    })
}

/// Normalized result of one fetch: records, pagination state, error signals.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "Vec::new")]
    pub response: Vec<T>,
    #[serde(default)]
    pub paging: Paging,
    #[serde(default)]
    pub errors: ApiErrors,
    #[serde(default)]
    pub results: u32,
}

impl<T> Envelope<T> {
    /// Soft envelope returned when the transport retry budget runs out.
    pub(crate) fn transport_failure(detail: String) -> Self {
        Self {
            response: Vec::new(),
            paging: Paging::default(),
            errors: ApiErrors::network(detail),
            results: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.response.is_empty()
    }
}

/// Pagination block; both members default to 0 when the API omits them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub total: u32,
}

impl Paging {
    /// The page the API says it served, falling back to the requested one.
    pub fn current_or(&self, requested: u32) -> u32 {
        if self.current == 0 {
            requested
        } else {
            self.current
        }
    }

    /// Whether the page at `requested` was the final one. A missing total
    /// means the API does not paginate this resource.
    pub fn is_last(&self, requested: u32) -> bool {
        let current = self.current_or(requested);
        let total = if self.total == 0 { current } else { self.total };
        current >= total
    }
}

/// The envelope's `errors` member, keyed by upstream error class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiErrors(BTreeMap<String, String>);

impl ApiErrors {
    pub(crate) fn network(detail: String) -> Self {
        let mut map = BTreeMap::new();
        map.insert(NETWORK_KEY.to_string(), detail);
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Quota exceeded despite status 200; the request is valid but must wait.
    pub fn rate_limited(&self) -> bool {
        self.0.contains_key(RATE_LIMIT_KEY)
    }

    /// Subscription tier refuses further pages of this resource.
    pub fn plan_restricted(&self) -> bool {
        self.0.contains_key(PLAN_KEY)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl fmt::Display for ApiErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "none");
        }
        let mut first = true;
        for (key, detail) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{key}: {detail}")?;
            first = false;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for ApiErrors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Map(BTreeMap<String, Value>),
            // the API sends [] when there is nothing to report
            List(Vec<Value>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Map(map) => ApiErrors(
                map.into_iter()
                    .map(|(key, detail)| {
                        let text = match detail {
                            Value::String(s) => s,
                            other => other.to_string(),
                        };
                        (key, text)
                    })
                    .collect(),
            ),
            Raw::List(_) => ApiErrors::default(),
        })
    }
}

/// One record of `/leagues?id&season`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueEntry {
    pub league: Option<LeagueInfo>,
    pub country: Option<CountryInfo>,
    #[serde(default)]
    pub seasons: Vec<SeasonInfo>,
}

impl LeagueEntry {
    pub fn league_id(&self) -> Option<u32> {
        self.league.as_ref().and_then(|league| league.id)
    }

    pub fn league_name(&self) -> Option<&str> {
        self.league
            .as_ref()
            .and_then(|league| league.name.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueInfo {
    pub id: Option<u32>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryInfo {
    pub name: Option<String>,
    pub code: Option<String>,
    pub flag: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonInfo {
    pub year: Option<u16>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub current: Option<bool>,
    pub coverage: Option<CoverageInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverageInfo {
    pub fixtures: Option<FixturesCoverage>,
    pub injuries: Option<bool>,
    pub odds: Option<bool>,
    pub players: Option<bool>,
    pub predictions: Option<bool>,
    pub standings: Option<bool>,
    pub top_assists: Option<bool>,
    pub top_cards: Option<bool>,
    pub top_scorers: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixturesCoverage {
    pub events: Option<bool>,
    pub lineups: Option<bool>,
    pub statistics_fixtures: Option<bool>,
    pub statistics_players: Option<bool>,
}

/// One record of `/teams?league&season`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamEntry {
    pub team: Option<TeamInfo>,
    pub venue: Option<VenueInfo>,
}

impl TeamEntry {
    pub fn team_id(&self) -> Option<u32> {
        self.team.as_ref().and_then(|team| team.id)
    }

    /// The referenced venue id, absent when the payload carries
    /// `venue: null` or `venue: {id: null}`.
    pub fn venue_id(&self) -> Option<u32> {
        self.venue.as_ref().and_then(|venue| venue.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamInfo {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub country: Option<String>,
    pub founded: Option<u16>,
    pub national: Option<bool>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueInfo {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<u32>,
    pub surface: Option<String>,
    pub image: Option<String>,
}

/// One record of `/players?team&season&page`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerEntry {
    pub player: Option<PlayerInfo>,
    #[serde(default)]
    pub statistics: Vec<StatisticsEntry>,
}

impl PlayerEntry {
    pub fn player_id(&self) -> Option<u32> {
        self.player.as_ref().and_then(|player| player.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerInfo {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub age: Option<u16>,
    pub birth: Option<BirthInfo>,
    pub nationality: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub injured: Option<bool>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BirthInfo {
    pub date: Option<String>,
    pub place: Option<String>,
    pub country: Option<String>,
}

/// One statistics block attached to a player record. Team/league/season
/// here override the enclosing query context when present.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsEntry {
    pub team: Option<TeamRef>,
    pub league: Option<LeagueRef>,
    pub games: Option<GamesStats>,
    pub substitutes: Option<SubstitutesStats>,
    pub shots: Option<ShotsStats>,
    pub goals: Option<GoalsStats>,
    pub passes: Option<PassesStats>,
    pub tackles: Option<TacklesStats>,
    pub duels: Option<DuelsStats>,
    pub dribbles: Option<DribblesStats>,
    pub fouls: Option<FoulsStats>,
    pub cards: Option<CardsStats>,
    pub penalty: Option<PenaltyStats>,
}

impl StatisticsEntry {
    pub fn team_id(&self) -> Option<u32> {
        self.team.as_ref().and_then(|team| team.id)
    }

    pub fn league_id(&self) -> Option<u32> {
        self.league.as_ref().and_then(|league| league.id)
    }

    pub fn season(&self) -> Option<u16> {
        self.league.as_ref().and_then(|league| league.season)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamRef {
    pub id: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueRef {
    pub id: Option<u32>,
    pub season: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GamesStats {
    // upstream spells it this way
    pub appearences: Option<u32>,
    pub lineups: Option<u32>,
    pub minutes: Option<u32>,
    pub number: Option<u16>,
    pub position: Option<String>,
    #[serde(default, deserialize_with = "de_stringish")]
    pub rating: Option<String>,
    pub captain: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubstitutesStats {
    #[serde(rename = "in")]
    pub subbed_in: Option<u32>,
    #[serde(rename = "out")]
    pub subbed_out: Option<u32>,
    pub bench: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShotsStats {
    pub total: Option<u32>,
    pub on: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalsStats {
    pub total: Option<u32>,
    pub assists: Option<u32>,
    pub conceded: Option<u32>,
    pub saves: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PassesStats {
    pub total: Option<u32>,
    pub key: Option<u32>,
    #[serde(default, deserialize_with = "de_stringish")]
    pub accuracy: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TacklesStats {
    pub total: Option<u32>,
    pub blocks: Option<u32>,
    pub interceptions: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DuelsStats {
    pub total: Option<u32>,
    pub won: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DribblesStats {
    pub attempts: Option<u32>,
    pub success: Option<u32>,
    pub past: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoulsStats {
    pub committed: Option<u32>,
    pub drawn: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardsStats {
    pub yellow: Option<u32>,
    pub yellowred: Option<u32>,
    pub red: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PenaltyStats {
    pub won: Option<u32>,
    // upstream spells it this way
    #[serde(rename = "commited")]
    pub committed: Option<u32>,
    pub scored: Option<u32>,
    pub missed: Option<u32>,
    pub saved: Option<u32>,
}

//! HTTP client for the API-Football v3 API.
//!
//! One logical GET may take several attempts: transport failures and 429
//! responses retry against a bounded budget carried as an explicit
//! counter, while body-encoded quota errors (a 200 whose `errors` object
//! says the request must wait) retry without touching that budget. The
//! asymmetry is deliberate: status-coded throttling and body-coded quota
//! exhaustion are distinct upstream failure modes.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;

use super::types::{Envelope, LeagueEntry, PlayerEntry, TeamEntry};
use crate::cli::types::{LeagueId, Season, TeamId};
use crate::config::Config;
use crate::error::{FootdataError, Result};


const API_KEY_HEADER: &str = "x-apisports-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
    transport_backoff: Duration,
    throttle_default: Duration,
    quota_wait: Duration,
    page_delay: Duration,
    max_pages: u32,
}

impl ApiClient {
    /// Build a client carrying the static auth header. Fails only when the
    /// credential is missing or unusable as a header value.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?;

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(api_key)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            transport_backoff: config.transport_backoff,
            throttle_default: config.throttle_default,
            quota_wait: config.quota_wait,
            page_delay: config.page_delay,
            max_pages: config.max_pages,
        })
    }

    /// Issue one logical GET, absorbing throttling and transient failures.
    ///
    /// Per attempt, in priority order: a transport failure retries while
    /// the budget lasts, then degrades to an envelope tagged `network`;
    /// a 429 retries honoring `Retry-After` (or the configured default)
    /// while the budget lasts, then falls through to the fatal branch;
    /// any remaining status >= 400 is fatal for this call; a 200 carrying
    /// the body-encoded rate-limit marker sleeps and retries without
    /// consuming the budget. An empty 200 with no marker is returned
    /// as-is with a warning line.
    pub async fn fetch<T>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Envelope<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        let mut retries_left = self.max_retries;

        loop {
            let response = match self.http.get(&url).query(params).send().await {
                Ok(response) => response,
                Err(err) => {
                    if retries_left > 0 {
                        retries_left -= 1;
                        println!(
                            "⚠ {endpoint}: {err}; retrying in {}s",
                            self.transport_backoff.as_secs()
                        );
                        sleep(self.transport_backoff).await;
                        continue;
                    }
                    println!("⚠ {endpoint}: giving up after repeated transport failures: {err}");
                    return Ok(Envelope::transport_failure(err.to_string()));
                }
            };

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS && retries_left > 0 {
                let wait = retry_after(response.headers()).unwrap_or(self.throttle_default);
                retries_left -= 1;
                println!(
                    "⚠ {endpoint}: HTTP 429, waiting {}s before retrying",
                    wait.as_secs()
                );
                sleep(wait).await;
                continue;
            }
            if status.is_client_error() || status.is_server_error() {
                return Err(FootdataError::HttpStatus {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                });
            }

            let envelope: Envelope<T> = response.json().await?;

            if envelope.errors.rate_limited() {
                println!(
                    "⚠ {endpoint}: request quota exceeded, waiting {}s",
                    self.quota_wait.as_secs()
                );
                sleep(self.quota_wait).await;
                continue;
            }
            if envelope.is_empty() {
                println!(
                    "⚠ {endpoint}: empty response (results={}, errors={})",
                    envelope.results, envelope.errors
                );
            }
            return Ok(envelope);
        }
    }

    /// Collect every page of a paginated resource, capped at `max_pages`.
    ///
    /// Stops on the first of: the page cap, a plan restriction reported in
    /// the envelope (already-collected records are kept), or the paging
    /// block saying the current page is the last. Sleeps the inter-page
    /// delay between pages, never after the final one.
    pub async fn fetch_all<T>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        max_pages: u32,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut collected = Vec::new();
        let mut page: u32 = 1;

        loop {
            if page > max_pages {
                println!("⚠ {endpoint}: page cap of {max_pages} reached, stopping");
                break;
            }
            if page > 1 {
                sleep(self.page_delay).await;
            }

            let mut page_params = params.to_vec();
            page_params.push(("page", page.to_string()));
            let envelope: Envelope<T> = self.fetch(endpoint, &page_params).await?;

            if envelope.errors.plan_restricted() {
                println!(
                    "⚠ {endpoint}: plan restriction at page {page} ({}), stopping",
                    envelope.errors
                );
                break;
            }

            let paging = envelope.paging;
            collected.extend(envelope.response);

            if paging.is_last(page) {
                break;
            }
            page += 1;
        }

        Ok(collected)
    }

    /// `GET /leagues?id&season`: one league with its season list.
    pub async fn league(&self, league_id: LeagueId, season: Season) -> Result<Envelope<LeagueEntry>> {
        self.fetch(
            "leagues",
            &[("id", league_id.to_string()), ("season", season.to_string())],
        )
        .await
    }

    /// `GET /teams?league&season`: every team (with venue) in the league.
    pub async fn teams(&self, league_id: LeagueId, season: Season) -> Result<Envelope<TeamEntry>> {
        self.fetch(
            "teams",
            &[
                ("league", league_id.to_string()),
                ("season", season.to_string()),
            ],
        )
        .await
    }

    /// All pages of `GET /players?team&season` for one team.
    pub async fn all_players(&self, team_id: TeamId, season: Season) -> Result<Vec<PlayerEntry>> {
        self.fetch_all(
            "players",
            &[
                ("team", team_id.to_string()),
                ("season", season.to_string()),
            ],
            self.max_pages,
        )
        .await
    }
}

/// Parse a `Retry-After` header carrying whole seconds.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

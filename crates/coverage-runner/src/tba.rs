//! The Blue Alliance API v3 client.
//!
//! Fetches a district's events and the teams entered in each one, skipping
//! district championships, and folds the result into a [`Roster`]. All
//! requests are authenticated GETs carrying `X-TBA-Auth-Key`.
//!
//! Response payloads are decoded as-is; the client does not second-guess
//! what the API returns beyond the HTTP status.

use std::time::Duration;

use coverage_types::Event;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::TbaConfig;
use crate::error::RunnerError;
use crate::roster::{Roster, TeamRecord, is_district_championship};

/// One entry of `/district/{district_key}/events` or `/events/{year}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TbaEvent {
    /// Event name.
    pub name: String,
    /// Event key (e.g. `2025miket`).
    pub key: String,
    /// Competition week, zero-based. Absent for offseason events.
    #[serde(default)]
    pub week: Option<u8>,
}

/// Client for the endpoints the coverage analysis needs.
pub struct TbaClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    user_agent: String,
    request_delay: Duration,
}

impl TbaClient {
    /// Create a client from `config`, authenticating with `api_key`.
    pub fn new(config: &TbaConfig, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            api_key,
            user_agent: config.user_agent.clone(),
            request_delay: Duration::from_millis(config.request_delay_ms),
        }
    }

    /// GET `path` under the base URL and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RunnerError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url, "TBA request");

        let response = self
            .client
            .get(&url)
            .header("X-TBA-Auth-Key", &self.api_key)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| RunnerError::Tba(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(RunnerError::Tba(format!(
                "{url} returned {status}: {error_body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RunnerError::Tba(format!("{url} response parse failed: {e}")))
    }

    /// Every event in `{year}{district}`, championships included.
    pub async fn district_events(
        &self,
        year: u16,
        district: &str,
    ) -> Result<Vec<TbaEvent>, RunnerError> {
        self.get(&format!("/district/{year}{district}/events")).await
    }

    /// Every event of the `year` season, across all districts and regions.
    pub async fn year_events(&self, year: u16) -> Result<Vec<TbaEvent>, RunnerError> {
        let events: Vec<TbaEvent> = self.get(&format!("/events/{year}")).await?;
        info!(year, total = events.len(), "fetched season events");
        Ok(events)
    }

    /// Teams entered in `event_key`.
    pub async fn event_teams(&self, event_key: &str) -> Result<Vec<TeamRecord>, RunnerError> {
        self.get(&format!("/event/{event_key}/teams/simple")).await
    }

    /// Fetch the full roster for a district, excluding championships.
    pub async fn fetch_district(&self, year: u16, district: &str) -> Result<Roster, RunnerError> {
        let district = district.to_lowercase();
        let events = self.district_events(year, &district).await?;
        info!(
            year,
            district,
            total = events.len(),
            "fetched district events"
        );

        let mut roster = Roster::new();
        for event in events {
            if is_district_championship(&event.key) {
                info!(key = event.key, name = event.name, "skipping championship event");
                continue;
            }

            let teams = self.event_teams(&event.key).await?;
            info!(key = event.key, teams = teams.len(), "fetched event teams");
            roster.add_event(Event::new(event.key, event.name), teams);

            tokio::time::sleep(self.request_delay).await;
        }

        info!(
            events = roster.events().len(),
            teams = roster.teams().len(),
            "district roster assembled"
        );
        Ok(roster)
    }
}

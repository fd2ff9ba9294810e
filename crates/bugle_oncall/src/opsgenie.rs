//! OpsGenie schedule timeline client.

use crate::{DutyPeriod, DutyProvider, OncallError, OncallErrorKind, OncallResult};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.opsgenie.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// OpsGenie-backed [`DutyProvider`].
///
/// Fetches the final timeline of a schedule and flattens its rotation
/// periods into [`DutyPeriod`]s in local wall-clock time.
pub struct OpsGenieProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpsGenieProvider {
    /// Create a provider authenticating with `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl DutyProvider for OpsGenieProvider {
    #[tracing::instrument(skip(self), fields(schedule_id = %schedule_id))]
    async fn users_on_duty(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        schedule_id: &str,
    ) -> OncallResult<Vec<DutyPeriod>> {
        let url = format!("{}/v2/schedules/{}/timeline", self.base_url, schedule_id);
        let interval = interval_days(from, to).to_string();
        let date = from.format("%Y-%m-%dT%H:%M:%S").to_string();

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("GenieKey {}", self.api_key))
            .query(&[
                ("intervalUnit", "days"),
                ("interval", interval.as_str()),
                ("date", date.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OncallError::new(OncallErrorKind::Api { status, message }));
        }

        let timeline: TimelineResponse = response.json().await?;
        let periods = flatten_timeline(timeline);
        debug!(periods = periods.len(), "Fetched on-call timeline");
        Ok(periods)
    }
}

/// Whole days covering the window, for the timeline interval query.
fn interval_days(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    ((to - from).num_seconds() + 86_399).div_euclid(86_400).max(1)
}

#[derive(Debug, Default, Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    data: TimelineData,
}

#[derive(Debug, Default, Deserialize)]
struct TimelineData {
    #[serde(rename = "finalTimeline", default)]
    final_timeline: Timeline,
}

#[derive(Debug, Default, Deserialize)]
struct Timeline {
    #[serde(default)]
    rotations: Vec<Rotation>,
}

#[derive(Debug, Default, Deserialize)]
struct Rotation {
    #[serde(default)]
    periods: Vec<Period>,
}

#[derive(Debug, Deserialize)]
struct Period {
    #[serde(rename = "startDate")]
    start_date: Option<DateTime<FixedOffset>>,
    #[serde(rename = "endDate")]
    end_date: Option<DateTime<FixedOffset>>,
    recipient: Option<Recipient>,
}

#[derive(Debug, Deserialize)]
struct Recipient {
    name: Option<String>,
}

fn flatten_timeline(response: TimelineResponse) -> Vec<DutyPeriod> {
    let mut periods = Vec::new();
    for rotation in response.data.final_timeline.rotations {
        for period in rotation.periods {
            let (Some(start), Some(end), Some(recipient)) =
                (period.start_date, period.end_date, period.recipient)
            else {
                warn!("Skipping timeline period with missing fields");
                continue;
            };
            let Some(name) = recipient.name else {
                warn!("Skipping timeline period with unnamed recipient");
                continue;
            };
            let start = start.with_timezone(&Local).naive_local();
            let end = end.with_timezone(&Local).naive_local();
            if start >= end {
                warn!(user = %name, %start, %end, "Skipping timeline period with inverted bounds");
                continue;
            }
            periods.push(DutyPeriod::new(name, start, end));
        }
    }
    periods
}

//! Jira worklog search client.

use crate::{Worklog, WorklogError, WorklogErrorKind, WorklogProvider, WorklogResult};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RESULTS: u32 = 200;

/// Jira-backed [`WorklogProvider`] using the issue search API.
///
/// Searches issues by `worklogDate` and `worklogAuthor`, then walks the
/// embedded worklog entries, keeping those started inside the window by
/// one of the requested authors.
pub struct JiraWorklogs {
    client: Client,
    base_url: String,
    token: String,
}

impl JiraWorklogs {
    /// Create a client for the Jira instance at `base_url`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl WorklogProvider for JiraWorklogs {
    #[tracing::instrument(skip(self))]
    async fn logged_time(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        authors: &[String],
    ) -> WorklogResult<Vec<Worklog>> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/rest/api/2/search", self.base_url);
        let jql = search_jql(from, to, authors);
        let max_results = MAX_RESULTS.to_string();

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("jql", jql.as_str()),
                ("fields", "worklog"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(WorklogError::new(WorklogErrorKind::Api { status, message }));
        }

        let search: SearchResponse = response.json().await?;
        let worklogs = collect_worklogs(search, from, to, authors);
        debug!(worklogs = worklogs.len(), "Fetched worklogs");
        Ok(worklogs)
    }
}

fn search_jql(from: NaiveDateTime, to: NaiveDateTime, authors: &[String]) -> String {
    let quoted: Vec<String> = authors.iter().map(|author| format!("\"{author}\"")).collect();
    format!(
        "worklogDate >= \"{}\" AND worklogDate <= \"{}\" AND worklogAuthor in ({})",
        from.format("%Y-%m-%d"),
        to.format("%Y-%m-%d"),
        quoted.join(", ")
    )
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<Issue>,
}

#[derive(Debug, Default, Deserialize)]
struct Issue {
    #[serde(default)]
    fields: IssueFields,
}

#[derive(Debug, Default, Deserialize)]
struct IssueFields {
    #[serde(default)]
    worklog: WorklogField,
}

#[derive(Debug, Default, Deserialize)]
struct WorklogField {
    #[serde(default)]
    worklogs: Vec<WorklogEntry>,
}

#[derive(Debug, Deserialize)]
struct WorklogEntry {
    author: Option<Author>,
    started: Option<String>,
    #[serde(rename = "timeSpentSeconds")]
    time_spent_seconds: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Author {
    name: Option<String>,
}

/// Jira emits `+0000` style offsets, which RFC 3339 parsing rejects.
fn parse_started(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.3f%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

fn collect_worklogs(
    search: SearchResponse,
    from: NaiveDateTime,
    to: NaiveDateTime,
    authors: &[String],
) -> Vec<Worklog> {
    let mut collected = Vec::new();
    for issue in search.issues {
        for entry in issue.fields.worklog.worklogs {
            let Some(name) = entry.author.and_then(|author| author.name) else {
                warn!("Skipping worklog entry without an author");
                continue;
            };
            if !authors.iter().any(|author| *author == name) {
                continue;
            }
            let Some(started) = entry.started.as_deref().and_then(parse_started) else {
                warn!(author = %name, "Skipping worklog entry with unparseable start");
                continue;
            };
            if started < from || started >= to {
                continue;
            }
            let Some(seconds) = entry.time_spent_seconds else {
                warn!(author = %name, "Skipping worklog entry without a duration");
                continue;
            };
            collected.push(Worklog::new(name, seconds));
        }
    }
    collected
}

//! The timelogs command: yesterday's logged time per team member.

use crate::{CommandError, CommandResult, CommandTask};
use async_trait::async_trait;
use bugle_core::{Command, Team};
use bugle_worklog::{WorklogProvider, total_seconds_by_author};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Answers the `timelogs` command from the issue tracker's worklogs.
pub struct TimelogTask {
    provider: Arc<dyn WorklogProvider>,
    team: Team,
    minimum_minutes: u64,
}

impl TimelogTask {
    /// Create a timelog task for `team`, flagging totals under `minimum_minutes`.
    pub fn new(provider: Arc<dyn WorklogProvider>, team: Team, minimum_minutes: u64) -> Self {
        Self {
            provider,
            team,
            minimum_minutes,
        }
    }
}

#[async_trait]
impl CommandTask for TimelogTask {
    fn name(&self) -> &str {
        "timelogs"
    }

    #[tracing::instrument(skip(self, _command))]
    async fn execute(&self, _command: &Command) -> CommandResult<String> {
        let (from, to) = report_window(Local::now().naive_local());
        let authors: Vec<String> = self
            .team
            .tracker_logins()
            .into_iter()
            .map(String::from)
            .collect();

        let worklogs = self
            .provider
            .logged_time(from, to, &authors)
            .await
            .map_err(|e| CommandError::task_failed(self.name(), e))?;
        tracing::debug!(worklogs = worklogs.len(), "Fetched worklogs");

        let totals = total_seconds_by_author(&worklogs);
        Ok(render(&self.team, &totals, self.minimum_minutes))
    }
}

/// The reporting window: all of the previous day.
fn report_window(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let to = now.date().and_time(NaiveTime::MIN);
    (to - Duration::days(1), to)
}

/// One line per member with a tracker login, flagged when under the minimum.
///
/// Members are sorted by display name so the report reads the same on
/// every run. A member without any worklogs shows `0h 0m`.
fn render(team: &Team, totals: &BTreeMap<String, u64>, minimum_minutes: u64) -> String {
    let mut members: Vec<_> = team
        .members()
        .iter()
        .filter(|member| !member.tracker_login.is_empty())
        .collect();
    members.sort_by(|a, b| a.name.cmp(&b.name));

    let minimum_seconds = minimum_minutes * 60;
    let mut lines = Vec::with_capacity(members.len());
    for member in members {
        let seconds = totals.get(&member.tracker_login).copied().unwrap_or(0);
        let mut line = format!(
            "{}: {}h {}m",
            member.name,
            seconds / 3600,
            seconds % 3600 / 60
        );
        if seconds < minimum_seconds {
            line.push_str(" (below minimum)");
        }
        lines.push(line);
    }
    lines.join("\n")
}

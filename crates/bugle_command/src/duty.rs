//! The duty command: who is on call now and next.

use crate::{CommandError, CommandResult, CommandTask};
use async_trait::async_trait;
use bugle_chat::TIMESTAMP_FORMAT;
use bugle_core::Command;
use bugle_oncall::{DutyPeriod, DutyProvider, merge, split_current_and_next};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use std::sync::Arc;

/// How far ahead duty assignments are fetched.
const LOOKAHEAD_HOURS: i64 = 75;

/// Answers the `duty` command from the on-call provider's timeline.
pub struct DutyTask {
    provider: Arc<dyn DutyProvider>,
    schedule_id: String,
}

impl DutyTask {
    /// Create a duty task reading one schedule from `provider`.
    pub fn new(provider: Arc<dyn DutyProvider>, schedule_id: impl Into<String>) -> Self {
        Self {
            provider,
            schedule_id: schedule_id.into(),
        }
    }
}

#[async_trait]
impl CommandTask for DutyTask {
    fn name(&self) -> &str {
        "duty"
    }

    #[tracing::instrument(skip(self, _command), fields(schedule_id = %self.schedule_id))]
    async fn execute(&self, _command: &Command) -> CommandResult<String> {
        let now = Local::now().naive_local();
        let (from, to) = fetch_window(now);

        let periods = self
            .provider
            .users_on_duty(from, to, &self.schedule_id)
            .await
            .map_err(|e| CommandError::task_failed(self.name(), e))?;
        tracing::debug!(periods = periods.len(), "Fetched duty periods");

        let merged = merge(&periods);
        let (current, next) = split_current_and_next(now, &merged);
        Ok(render(current.as_ref(), &next))
    }
}

/// The fetch window: start of `now`'s day through the lookahead horizon.
fn fetch_window(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let from = now.date().and_time(NaiveTime::MIN);
    (from, from + Duration::hours(LOOKAHEAD_HOURS))
}

/// Render the assignment timeline as inline reply text.
fn render(current: Option<&DutyPeriod>, next: &[DutyPeriod]) -> String {
    if current.is_none() && next.is_empty() {
        return "Nobody is on duty right now.".to_string();
    }

    let mut lines = Vec::with_capacity(1 + next.len());
    if let Some(period) = current {
        lines.push(format!(
            "now: {} till {}",
            period.user,
            period.end.format(TIMESTAMP_FORMAT)
        ));
    }
    for period in next {
        lines.push(format!(
            "next: {} from {} to {}",
            period.user,
            period.start.format(TIMESTAMP_FORMAT),
            period.end.format(TIMESTAMP_FORMAT)
        ));
    }
    lines.join("\n")
}

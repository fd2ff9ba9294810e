//! The scheduled duty call job.

use async_trait::async_trait;
use bugle_chat::{ChatSender, TIMESTAMP_FORMAT, first_name, mention};
use bugle_core::Team;
use bugle_cron::{Job, ScheduleError, ScheduleResult};
use bugle_oncall::{DutyPeriod, DutyProvider, group_by_user, merge, split_current_and_next};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use std::sync::Arc;

/// How far ahead duty assignments are fetched.
const LOOKAHEAD_HOURS: i64 = 75;

const JOB_NAME: &str = "duty-call";

/// Sounds the daily duty call.
///
/// One firing fetches the assignments for the next few days, sends each
/// upcoming assignee a private reminder, and posts the rota summary to
/// the broadcast channel. Reminders go out on their own spawned tasks,
/// so one failed delivery never blocks or fails the others.
#[derive(derive_builder::Builder)]
#[builder(setter(into))]
pub struct DutyCallJob {
    /// Source of on-call assignments.
    provider: Arc<dyn DutyProvider>,
    /// Delivery for the broadcast and the reminders.
    sender: Arc<dyn ChatSender>,
    /// Roster translating provider names into chat logins.
    team: Team,
    /// Schedule queried at the provider.
    schedule_id: String,
    /// Channel the rota summary goes to.
    broadcast_channel: String,
}

#[async_trait]
impl Job for DutyCallJob {
    fn name(&self) -> &str {
        JOB_NAME
    }

    #[tracing::instrument(skip(self), fields(schedule_id = %self.schedule_id))]
    async fn run(&self, now: NaiveDateTime) -> ScheduleResult<()> {
        let (from, to) = call_window(now);
        let periods = self
            .provider
            .users_on_duty(from, to, &self.schedule_id)
            .await
            .map_err(|e| ScheduleError::job_failed(JOB_NAME, e))?;

        if periods.is_empty() {
            tracing::info!("No duty periods in the call window");
            return Ok(());
        }

        let merged = merge(&periods);
        let (current, next) = split_current_and_next(now, &merged);

        self.send_private_reminders(&next).await;

        let text = self.render_duty_call(current.as_ref(), &next);
        if let Err(e) = self
            .sender
            .send_message(&self.broadcast_channel, &text)
            .await
        {
            tracing::warn!(
                error = %e,
                channel = %self.broadcast_channel,
                "Failed to send the duty call"
            );
        }
        Ok(())
    }
}

impl DutyCallJob {
    /// Remind each upcoming assignee in a direct message.
    ///
    /// Provider names missing from the roster are logged and skipped.
    async fn send_private_reminders(&self, upcoming: &[DutyPeriod]) {
        let mut handles = Vec::new();
        for (name, duties) in group_by_user(upcoming) {
            let Some(user) = self.team.by_name(&name) else {
                tracing::warn!(name = %name, "No roster entry for provider name, skipping reminder");
                continue;
            };

            let text = render_reminder(first_name(&user.name), &duties);
            let destination = mention(&user.chat_login);
            let sender = Arc::clone(&self.sender);
            handles.push(tokio::spawn(async move {
                if let Err(e) = sender.send_message(&destination, &text).await {
                    tracing::warn!(
                        error = %e,
                        destination = %destination,
                        "Failed to send duty reminder"
                    );
                }
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Duty reminder task panicked");
            }
        }
    }

    /// Render the broadcast summary of the rota.
    fn render_duty_call(&self, current: Option<&DutyPeriod>, upcoming: &[DutyPeriod]) -> String {
        let mut text = String::from(":phone: On duty:\nNow:\n");
        match current {
            Some(period) => text.push_str(&format!(
                "\t{} till {}\n",
                self.mention_for(&period.user),
                period.end.format(TIMESTAMP_FORMAT)
            )),
            None => text.push_str("\tnobody is on duty right now\n"),
        }

        text.push_str("Next:\n");
        for period in upcoming {
            text.push_str(&format!(
                "\t{} from {} to {}\n",
                self.mention_for(&period.user),
                period.start.format(TIMESTAMP_FORMAT),
                period.end.format(TIMESTAMP_FORMAT)
            ));
        }
        text
    }

    /// Mention for a provider name, falling back to the raw name.
    fn mention_for(&self, name: &str) -> String {
        match self.team.chat_login(name) {
            Some(login) => mention(login),
            None => {
                tracing::warn!(name = %name, "No roster entry for provider name");
                name.to_string()
            }
        }
    }
}

/// The fetch window: start of `now`'s day through the lookahead horizon.
fn call_window(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let from = now.date().and_time(NaiveTime::MIN);
    (from, from + Duration::hours(LOOKAHEAD_HOURS))
}

/// The private reminder text, listing every upcoming span.
fn render_reminder(first_name: &str, duties: &[DutyPeriod]) -> String {
    let spans: Vec<String> = duties
        .iter()
        .map(|duty| {
            format!(
                "from {} to {}",
                duty.start.format(TIMESTAMP_FORMAT),
                duty.end.format(TIMESTAMP_FORMAT)
            )
        })
        .collect();

    format!(
        "Hello, {}! You are on duty {}. Enjoy!",
        first_name,
        spans.join(" and ")
    )
}

//! Tests for the duty call firing from the scheduler.

use async_trait::async_trait;
use bugle_chat::{ChatResult, ChatSender};
use bugle_core::{Team, User};
use bugle_cron::{Schedule, Scheduler};
use bugle_notify::DutyCallJobBuilder;
use bugle_oncall::{DutyPeriod, DutyProvider, OncallResult};
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Due immediately on registration, then not for another day.
struct DueOnce {
    armed: AtomicBool,
}

impl DueOnce {
    fn new() -> Self {
        Self {
            armed: AtomicBool::new(true),
        }
    }
}

impl Schedule for DueOnce {
    fn next_fire(&self, now: NaiveDateTime) -> NaiveDateTime {
        if self.armed.swap(false, Ordering::SeqCst) {
            now
        } else {
            now + chrono::Duration::hours(24)
        }
    }
}

/// Provider answering with periods anchored to the requested window.
struct AnchoredProvider {
    windows: Mutex<Vec<(NaiveDateTime, NaiveDateTime)>>,
}

impl AnchoredProvider {
    fn new() -> Self {
        Self {
            windows: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DutyProvider for AnchoredProvider {
    async fn users_on_duty(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        _schedule_id: &str,
    ) -> OncallResult<Vec<DutyPeriod>> {
        self.windows.lock().push((from, to));
        Ok(vec![
            DutyPeriod::new("Alice Cooper", from, from + chrono::Duration::hours(24)),
            DutyPeriod::new(
                "Bob Dylan",
                from + chrono::Duration::hours(24),
                from + chrono::Duration::hours(48),
            ),
        ])
    }
}

/// Sender recording every delivery.
struct RecordingSender {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSender {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatSender for RecordingSender {
    async fn send_message(&self, destination: &str, text: &str) -> ChatResult<()> {
        self.sent
            .lock()
            .push((destination.to_string(), text.to_string()));
        Ok(())
    }
}

fn member(name: &str, chat_login: &str) -> User {
    User {
        name: name.to_string(),
        chat_login: chat_login.to_string(),
        tracker_login: String::new(),
    }
}

#[tokio::test]
async fn test_scheduler_fires_the_duty_call_once() {
    let provider = Arc::new(AnchoredProvider::new());
    let sender = Arc::new(RecordingSender::new());
    let job = DutyCallJobBuilder::default()
        .provider(Arc::clone(&provider) as Arc<dyn DutyProvider>)
        .sender(Arc::clone(&sender) as Arc<dyn ChatSender>)
        .team(Team::new(vec![
            member("Alice Cooper", "alice"),
            member("Bob Dylan", "bob"),
        ]))
        .schedule_id("rota-1")
        .broadcast_channel("C-duty")
        .build()
        .unwrap();

    let mut scheduler = Scheduler::new().with_poll_interval(Duration::from_millis(10));
    scheduler.add_job(Box::new(DueOnce::new()), Arc::new(job));

    let handle = tokio::spawn(scheduler.run());
    tokio::time::sleep(Duration::from_millis(150)).await;
    handle.abort();

    let windows = provider.windows.lock().clone();
    assert_eq!(windows.len(), 1);
    let (from, to) = windows[0];
    assert_eq!(to - from, chrono::Duration::hours(75));

    let sent = sender.sent.lock().clone();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].0, "@bob");
    assert!(sent[0].1.starts_with("Hello, Bob! You are on duty from "));
    assert_eq!(sent[1].0, "C-duty");
    assert!(sent[1].1.starts_with(":phone: On duty:\nNow:\n\t@alice till "));
    assert!(sent[1].1.contains("\nNext:\n\t@bob from "));
}

//! Tests for the full command pipeline: registry dispatch through the
//! postponing handler, cache, and out-of-band delivery.

use async_trait::async_trait;
use bugle_cache::TtlCache;
use bugle_chat::{ChatResult, ChatSender};
use bugle_command::{
    CommandErrorKind, CommandHandler, CommandRegistry, CommandResult, CommandTask,
    PostponedHandler, PostponedHandlerBuilder,
};
use bugle_core::Command;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Task returning a fixed text, counting how often it ran.
struct CountingTask {
    name: String,
    text: String,
    calls: AtomicUsize,
}

impl CountingTask {
    fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CommandTask for CountingTask {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, _command: &Command) -> CommandResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
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

fn postponing(
    task: Arc<dyn CommandTask>,
    sender: Arc<dyn ChatSender>,
    cache: Arc<TtlCache<String>>,
    token: &str,
) -> PostponedHandler {
    PostponedHandlerBuilder::default()
        .task(task)
        .token(token)
        .cache(cache)
        .ttl(Duration::from_secs(60))
        .sender(sender)
        .fallback_channel("C-team")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_dispatch_postpones_then_answers_from_cache() {
    let task = Arc::new(CountingTask::new("duty", "now: alice till tomorrow"));
    let sender = Arc::new(RecordingSender::new());
    let handler = Arc::new(postponing(
        Arc::clone(&task) as Arc<dyn CommandTask>,
        Arc::clone(&sender) as Arc<dyn ChatSender>,
        Arc::new(TtlCache::new(8)),
        "secret",
    ));

    let mut registry = CommandRegistry::new();
    registry
        .register("duty", Arc::clone(&handler) as Arc<dyn CommandHandler>)
        .unwrap();

    let command = Command::new("duty", "secret");
    let first = registry.dispatch(&command).await.unwrap();
    assert!(first.postponed);
    assert!(first.text.is_empty());

    handler.drain().await;

    let second = registry.dispatch(&command).await.unwrap();
    assert!(!second.postponed);
    assert_eq!(second.text, "now: alice till tomorrow");
    assert_eq!(task.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        sender.sent.lock().clone(),
        vec![(
            "C-team".to_string(),
            "now: alice till tomorrow".to_string()
        )]
    );
}

#[tokio::test]
async fn test_rejected_token_never_reaches_the_task() {
    let task = Arc::new(CountingTask::new("duty", "now: alice till tomorrow"));
    let sender = Arc::new(RecordingSender::new());
    let handler = Arc::new(postponing(
        Arc::clone(&task) as Arc<dyn CommandTask>,
        Arc::clone(&sender) as Arc<dyn ChatSender>,
        Arc::new(TtlCache::new(8)),
        "secret",
    ));

    let mut registry = CommandRegistry::new();
    registry
        .register("duty", Arc::clone(&handler) as Arc<dyn CommandHandler>)
        .unwrap();

    let err = registry
        .dispatch(&Command::new("duty", "stolen"))
        .await
        .unwrap_err();

    assert!(matches!(err.kind, CommandErrorKind::Unauthorized(_)));
    handler.drain().await;
    assert_eq!(task.calls.load(Ordering::SeqCst), 0);
    assert!(sender.sent.lock().is_empty());
}

#[tokio::test]
async fn test_unknown_command_is_reported_by_name() {
    let registry = CommandRegistry::new();

    let err = registry
        .dispatch(&Command::new("standup", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err.kind, CommandErrorKind::UnknownCommand(name) if name == "standup"));
}

#[tokio::test]
async fn test_commands_share_the_cache_without_collisions() {
    let duty_task = Arc::new(CountingTask::new("duty", "now: alice till tomorrow"));
    let timelog_task = Arc::new(CountingTask::new("timelogs", "Alice Cooper: 6h 30m"));
    let sender = Arc::new(RecordingSender::new());
    let cache = Arc::new(TtlCache::new(8));

    let duty = Arc::new(postponing(
        Arc::clone(&duty_task) as Arc<dyn CommandTask>,
        Arc::clone(&sender) as Arc<dyn ChatSender>,
        Arc::clone(&cache),
        "duty-secret",
    ));
    let timelogs = Arc::new(postponing(
        Arc::clone(&timelog_task) as Arc<dyn CommandTask>,
        Arc::clone(&sender) as Arc<dyn ChatSender>,
        Arc::clone(&cache),
        "timelogs-secret",
    ));

    let mut registry = CommandRegistry::new();
    registry
        .register("duty", Arc::clone(&duty) as Arc<dyn CommandHandler>)
        .unwrap();
    registry
        .register("timelogs", Arc::clone(&timelogs) as Arc<dyn CommandHandler>)
        .unwrap();
    assert_eq!(registry.len(), 2);

    let duty_command = Command::new("duty", "duty-secret");
    let timelog_command = Command::new("timelogs", "timelogs-secret");
    assert!(registry.dispatch(&duty_command).await.unwrap().postponed);
    assert!(registry.dispatch(&timelog_command).await.unwrap().postponed);

    duty.drain().await;
    timelogs.drain().await;
    assert_eq!(cache.len(), 2);

    let duty_reply = registry.dispatch(&duty_command).await.unwrap();
    let timelog_reply = registry.dispatch(&timelog_command).await.unwrap();
    assert_eq!(duty_reply.text, "now: alice till tomorrow");
    assert_eq!(timelog_reply.text, "Alice Cooper: 6h 30m");
    assert_eq!(duty_task.calls.load(Ordering::SeqCst), 1);
    assert_eq!(timelog_task.calls.load(Ordering::SeqCst), 1);
}

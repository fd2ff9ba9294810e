//! The postponing handler wrapping slow command tasks.

use crate::{CommandError, CommandErrorKind, CommandHandler, CommandResult, CommandTask};
use async_trait::async_trait;
use bugle_cache::TtlCache;
use bugle_chat::ChatSender;
use bugle_core::{Command, CommandReply};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Handler that answers from cache or defers the work to the background.
///
/// On a cache hit the reply carries the cached text inline. On a miss the
/// wrapped task runs on a spawned tokio task and the caller immediately
/// gets a postponed reply; once the task finishes, its text is cached and
/// delivered through the chat sender to the command's reply channel, or
/// the fallback channel when the platform sent none.
///
/// At most one computation per fingerprint is in flight at a time. A
/// request arriving while its fingerprint is being computed spawns
/// nothing and is answered postponed; the winning computation's delivery
/// satisfies both callers.
#[derive(derive_builder::Builder)]
#[builder(setter(into))]
pub struct PostponedHandler {
    /// The computation this handler defers.
    task: Arc<dyn CommandTask>,
    /// Token every incoming command must present.
    token: String,
    /// Cache holding recently computed reply texts.
    cache: Arc<TtlCache<String>>,
    /// How long a computed text stays answerable from cache.
    ttl: Duration,
    /// Out-of-band delivery for postponed texts.
    sender: Arc<dyn ChatSender>,
    /// Channel used when a command carries no reply channel.
    fallback_channel: String,
    /// Fingerprints with a computation currently in flight.
    #[builder(setter(skip), default)]
    in_flight: Arc<Mutex<HashSet<u64>>>,
    /// Handles of spawned computations, so tests can await them.
    #[builder(setter(skip), default)]
    handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl PostponedHandler {
    /// Await every background computation spawned so far.
    ///
    /// Tests call this to observe caching and delivery. The request path
    /// never waits on background work.
    pub async fn drain(&self) {
        let drained: Vec<JoinHandle<()>> = std::mem::take(&mut *self.handles.lock());
        for handle in drained {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Background command task panicked");
            }
        }
    }
}

#[async_trait]
impl CommandHandler for PostponedHandler {
    #[tracing::instrument(skip(self, command), fields(command = %command.name))]
    async fn handle(&self, command: &Command) -> CommandResult<CommandReply> {
        if command.token != self.token {
            tracing::warn!("Rejecting command with invalid token");
            return Err(CommandError::new(CommandErrorKind::Unauthorized(
                command.name.clone(),
            )));
        }

        let key = fingerprint(command);
        if let Some(text) = self.cache.get(key) {
            tracing::debug!(key, "Answering from cache");
            return Ok(CommandReply::text(text));
        }

        if !self.in_flight.lock().insert(key) {
            tracing::debug!(key, "Computation already in flight, postponing");
            return Ok(CommandReply::postponed());
        }

        let destination = command
            .reply_channel()
            .unwrap_or(&self.fallback_channel)
            .to_string();
        let task = Arc::clone(&self.task);
        let cache = Arc::clone(&self.cache);
        let sender = Arc::clone(&self.sender);
        let in_flight = Arc::clone(&self.in_flight);
        let ttl = self.ttl;
        let command = command.clone();

        tracing::debug!(key, "Spawning background computation");
        let handle = tokio::spawn(async move {
            match task.execute(&command).await {
                Ok(text) => {
                    cache.insert(key, text.clone(), ttl);
                    in_flight.lock().remove(&key);
                    if let Err(e) = sender.send_message(&destination, &text).await {
                        tracing::warn!(
                            error = %e,
                            channel = %destination,
                            "Failed to deliver postponed reply"
                        );
                    }
                }
                Err(e) => {
                    in_flight.lock().remove(&key);
                    tracing::warn!(task = task.name(), error = %e, "Background task failed");
                }
            }
        });

        let mut handles = self.handles.lock();
        handles.retain(|h| !h.is_finished());
        handles.push(handle);

        Ok(CommandReply::postponed())
    }
}

/// Stable digest of a command's name and arguments.
///
/// Argument pairs are hashed in key order, so argument maps that compare
/// equal fingerprint equal regardless of insertion order.
fn fingerprint(command: &Command) -> u64 {
    let mut hasher = DefaultHasher::new();
    command.name.hash(&mut hasher);

    let mut pairs: Vec<(&str, &str)> = command
        .arguments
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    pairs.sort_unstable();
    for pair in pairs {
        pair.hash(&mut hasher);
    }

    hasher.finish()
}

//! Command routing.

use crate::{CommandError, CommandErrorKind, CommandHandler, CommandResult};
use bugle_core::{Command, CommandReply};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry routing command names to their handlers.
///
/// Pure routing: the registry performs no caching and no business logic,
/// so handlers stay independently testable.
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        tracing::debug!("Creating new CommandRegistry");
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind a command name to a handler.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateCommand` when the name is already taken. That
    /// is a wiring mistake, so callers treat it as fatal at startup.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> CommandResult<()> {
        let name = name.into();
        if self.handlers.contains_key(&name) {
            return Err(CommandError::new(CommandErrorKind::DuplicateCommand(name)));
        }

        tracing::info!(command = %name, "Registering command handler");
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Get the handler for a command name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Route a command to its handler and return the reply verbatim.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownCommand` when no handler is registered under
    /// `command.name`, or with whatever the handler itself reports.
    #[tracing::instrument(skip(self, command), fields(command = %command.name))]
    pub async fn dispatch(&self, command: &Command) -> CommandResult<CommandReply> {
        let handler = self.get(&command.name).ok_or_else(|| {
            tracing::warn!(available = ?self.names(), "Command not found in registry");
            CommandError::new(CommandErrorKind::UnknownCommand(command.name.clone()))
        })?;

        handler.handle(command).await
    }

    /// List all registered command names.
    pub fn names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

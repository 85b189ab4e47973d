//! Cache of user-defined named commands

use std::collections::HashMap;

use super::command::{Command, NamedCommand};
use super::config::KeymapError;

/// Named commands keyed by name.
///
/// Owned by a session rather than stored in a static, so every editor context
/// (and every test) gets its own instance.
pub struct CommandRegistry<E> {
    commands: HashMap<String, NamedCommand<E>>,
}

impl<E> CommandRegistry<E> {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Build and register a named command, replacing any command with the same name
    pub fn register_named(
        &mut self,
        name: impl Into<String>,
        function: impl Fn(&mut E) + 'static,
    ) -> Result<NamedCommand<E>, KeymapError> {
        let command = NamedCommand::new(name, function)?;
        self.register(command.clone());
        Ok(command)
    }

    /// Register a command, returning the one it replaced
    pub fn register(&mut self, command: NamedCommand<E>) -> Option<NamedCommand<E>> {
        let replaced = self.commands.insert(command.name().to_string(), command);
        if let Some(ref old) = replaced {
            tracing::debug!(name = old.name(), "Replaced registered command");
        }
        replaced
    }

    /// Remove a command. Blank or unknown names are ignored.
    pub fn unregister(&mut self, name: &str) -> Option<NamedCommand<E>> {
        if name.trim().is_empty() {
            return None;
        }
        self.commands.remove(name)
    }

    /// Look up a command by name, `None` for unknown or blank names
    pub fn lookup(&self, name: &str) -> Option<Command<E>> {
        self.get(name).cloned().map(Command::Named)
    }

    pub fn get(&self, name: &str) -> Option<&NamedCommand<E>> {
        if name.trim().is_empty() {
            return None;
        }
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<E> Default for CommandRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

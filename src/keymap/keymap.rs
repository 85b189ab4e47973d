//! The keymap set: named tables and fallthrough resolution

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::command::Command;
use super::registry::CommandRegistry;
use super::stroke::Stroke;
use super::table::{BindingKind, KeyMapTable, KeyMapValue, FALLTHROUGH};

/// All known keymaps by name
pub struct KeymapSet<E> {
    tables: HashMap<String, KeyMapTable<E>>,
}

impl<E> KeymapSet<E> {
    /// Create an empty keymap set
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Create a set from named tables
    pub fn with_tables(tables: impl IntoIterator<Item = (String, KeyMapTable<E>)>) -> Self {
        let mut set = Self::new();
        for (name, table) in tables {
            set.insert(name, table);
        }
        set
    }

    /// Add or replace a keymap, returning the replaced table
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        table: KeyMapTable<E>,
    ) -> Option<KeyMapTable<E>> {
        self.tables.insert(name.into(), table)
    }

    pub fn get(&self, name: &str) -> Option<&KeyMapTable<E>> {
        self.tables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut KeyMapTable<E>> {
        self.tables.get_mut(name)
    }

    /// Get a keymap, creating an empty one if missing
    pub fn entry(&mut self, name: &str) -> &mut KeyMapTable<E> {
        self.tables.entry(name.to_string()).or_default()
    }

    pub fn remove(&mut self, name: &str) -> Option<KeyMapTable<E>> {
        self.tables.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Keymap names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// All strokes bound in a keymap, including inherited ones.
    ///
    /// Own keys come first in declaration order, then the bindings of each
    /// fallthrough parent in listed order, recursively. Each keymap is expanded
    /// at most once per call, so fallthrough cycles terminate. Duplicate strokes
    /// from different keymaps are kept.
    pub fn resolve_bindings(&self, name: &str) -> Vec<Stroke> {
        let mut strokes = Vec::new();
        let mut visited = HashSet::new();
        self.collect_strokes(name, &mut visited, &mut strokes);
        strokes
    }

    fn collect_strokes<'a>(
        &'a self,
        name: &'a str,
        visited: &mut HashSet<&'a str>,
        strokes: &mut Vec<Stroke>,
    ) {
        if !visited.insert(name) {
            tracing::debug!(keymap = name, "Keymap already expanded, stopping fallthrough");
            return;
        }
        let Some(table) = self.tables.get(name) else {
            tracing::debug!(keymap = name, "Unknown keymap");
            return;
        };

        for key in table.keys().filter(|k| *k != FALLTHROUGH) {
            match Stroke::parse(key) {
                Ok(stroke) => strokes.push(stroke),
                Err(e) => tracing::warn!(keymap = name, key, "Skipping key: {}", e),
            }
        }

        for parent in table.fallthrough() {
            self.collect_strokes(parent, visited, strokes);
        }
    }

    /// Find the raw value for a stroke in a keymap or along its fallthrough chain
    pub fn value_for(&self, name: &str, stroke: &Stroke) -> Option<&KeyMapValue<E>> {
        let mut visited = HashSet::new();
        self.find_value(name, stroke, &mut visited)
    }

    fn find_value<'a: 'n, 'n>(
        &'a self,
        name: &'n str,
        stroke: &Stroke,
        visited: &mut HashSet<&'n str>,
    ) -> Option<&'a KeyMapValue<E>> {
        if !visited.insert(name) {
            return None;
        }
        let table = self.tables.get(name)?;
        if let Some(value) = table.value_for(stroke) {
            return Some(value);
        }
        table
            .fallthrough()
            .iter()
            .find_map(|parent| self.find_value(parent, stroke, visited))
    }

    /// Shape of the value bound to a stroke, `Unknown` if unbound
    pub fn classify_binding(&self, name: &str, stroke: &Stroke) -> BindingKind {
        self.value_for(name, stroke)
            .map(KeyMapValue::kind)
            .unwrap_or(BindingKind::Unknown)
    }

    /// Build the command bound to a stroke.
    ///
    /// Command names are looked up in `registry`; an unknown name yields `None`.
    pub fn command_for(
        &self,
        name: &str,
        stroke: &Stroke,
        registry: &CommandRegistry<E>,
    ) -> Option<Command<E>> {
        let mut visited = HashSet::new();
        let value = self.find_value(name, stroke, &mut visited)?;
        match value {
            KeyMapValue::Command(command) => {
                let found = registry.lookup(command);
                if found.is_none() {
                    tracing::debug!(keymap = name, command = %command, "Command not registered");
                }
                found
            }
            KeyMapValue::Bool(_) => Some(Command::Disabled),
            KeyMapValue::Function(function) => Some(Command::Functional(function.clone())),
            KeyMapValue::Names(_) | KeyMapValue::Other => None,
        }
    }
}

impl<E> Default for KeymapSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for KeymapSet<E> {
    fn clone(&self) -> Self {
        Self {
            tables: self.tables.clone(),
        }
    }
}

impl<E> fmt::Debug for KeymapSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.tables.iter()).finish()
    }
}

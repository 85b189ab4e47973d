//! Raw keymap tables
//!
//! A table maps key strings to raw values in declaration order. Values are
//! command names, booleans (`false` leaves the key unbound), callbacks, or, for
//! the reserved `fallthrough` key, the names of parent keymaps to inherit from.

use std::fmt;
use std::rc::Rc;

use super::command::{Command, CommandFn, NamedCommand};
use super::stroke::Stroke;

/// Reserved key naming the parent keymaps of a table
pub const FALLTHROUGH: &str = "fallthrough";

/// A raw value stored in a keymap table
pub enum KeyMapValue<E> {
    /// Name of a command
    Command(String),
    Bool(bool),
    Function(CommandFn<E>),
    /// List of names (only meaningful for `fallthrough`)
    Names(Vec<String>),
    /// Any other shape found in a keymap source
    Other,
}

/// Shape of the value bound to a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    String,
    Boolean,
    Function,
    Unknown,
}

impl<E> KeyMapValue<E> {
    pub fn kind(&self) -> BindingKind {
        match self {
            KeyMapValue::Command(_) => BindingKind::String,
            KeyMapValue::Bool(_) => BindingKind::Boolean,
            KeyMapValue::Function(_) => BindingKind::Function,
            KeyMapValue::Names(_) | KeyMapValue::Other => BindingKind::Unknown,
        }
    }

    /// Parent keymap names when used as a `fallthrough` value
    pub fn parent_names(&self) -> &[String] {
        match self {
            KeyMapValue::Command(name) => std::slice::from_ref(name),
            KeyMapValue::Names(names) => names,
            _ => &[],
        }
    }
}

impl<E> Clone for KeyMapValue<E> {
    fn clone(&self) -> Self {
        match self {
            KeyMapValue::Command(name) => KeyMapValue::Command(name.clone()),
            KeyMapValue::Bool(b) => KeyMapValue::Bool(*b),
            KeyMapValue::Function(function) => KeyMapValue::Function(Rc::clone(function)),
            KeyMapValue::Names(names) => KeyMapValue::Names(names.clone()),
            KeyMapValue::Other => KeyMapValue::Other,
        }
    }
}

impl<E> fmt::Debug for KeyMapValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMapValue::Command(name) => f.debug_tuple("Command").field(name).finish(),
            KeyMapValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            KeyMapValue::Function(_) => write!(f, "Function(<fn>)"),
            KeyMapValue::Names(names) => f.debug_tuple("Names").field(names).finish(),
            KeyMapValue::Other => write!(f, "Other"),
        }
    }
}

/// An ordered keymap table
pub struct KeyMapTable<E> {
    entries: Vec<(String, KeyMapValue<E>)>,
}

impl<E> KeyMapTable<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a raw entry. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: KeyMapValue<E>) -> &mut Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, key: impl Into<String>, value: KeyMapValue<E>) -> Self {
        self.set(key, value);
        self
    }

    /// Bind a stroke to a command name
    pub fn bind_name(&mut self, stroke: &Stroke, name: impl Into<String>) -> &mut Self {
        self.set(stroke.value(), KeyMapValue::Command(name.into()))
    }

    /// Bind a stroke to a named command's name
    pub fn bind_command(&mut self, stroke: &Stroke, command: &NamedCommand<E>) -> &mut Self {
        self.bind_name(stroke, command.name())
    }

    /// Bind a stroke directly to a callback
    pub fn bind_function(
        &mut self,
        stroke: &Stroke,
        function: impl Fn(&mut E) + 'static,
    ) -> &mut Self {
        self.set(stroke.value(), KeyMapValue::Function(Rc::new(function)))
    }

    /// Mark a stroke explicitly unbound
    pub fn disable(&mut self, stroke: &Stroke) -> &mut Self {
        self.set(stroke.value(), KeyMapValue::Bool(false))
    }

    /// Replace the parent keymaps of this table
    pub fn set_fallthrough<S: Into<String>>(
        &mut self,
        parents: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        let mut names: Vec<String> = parents.into_iter().map(Into::into).collect();
        if names.len() == 1 {
            let name = names.remove(0);
            self.set(FALLTHROUGH, KeyMapValue::Command(name))
        } else {
            self.set(FALLTHROUGH, KeyMapValue::Names(names))
        }
    }

    /// Parent keymap names, in listed order
    pub fn fallthrough(&self) -> &[String] {
        self.get(FALLTHROUGH)
            .map(KeyMapValue::parent_names)
            .unwrap_or(&[])
    }

    pub fn get(&self, key: &str) -> Option<&KeyMapValue<E>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Value bound to a stroke.
    ///
    /// Keys match verbatim against the canonical value first, then by parsing
    /// each key, so `ctrl-a` in a table matches the stroke `Ctrl-A`.
    pub fn value_for(&self, stroke: &Stroke) -> Option<&KeyMapValue<E>> {
        let canonical = stroke.value();
        self.get(&canonical).or_else(|| {
            self.entries
                .iter()
                .filter(|(k, _)| k != FALLTHROUGH)
                .find(|(k, _)| Stroke::parse(k).is_ok_and(|s| s == *stroke))
                .map(|(_, v)| v)
        })
    }

    /// Remove the entry bound to a stroke
    pub fn remove_stroke(&mut self, stroke: &Stroke) -> Option<KeyMapValue<E>> {
        let canonical = stroke.value();
        let idx = self.entries.iter().position(|(k, _)| {
            *k == canonical
                || (k != FALLTHROUGH && Stroke::parse(k).is_ok_and(|s| s == *stroke))
        })?;
        Some(self.entries.remove(idx).1)
    }

    pub fn has_stroke(&self, stroke: &Stroke) -> bool {
        self.value_for(stroke).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<KeyMapValue<E>> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn entries(&self) -> &[(String, KeyMapValue<E>)] {
        &self.entries
    }

    /// Turn the value bound to `stroke` into a command.
    ///
    /// Strings resolve through `lookup`; booleans give `Disabled` and callbacks
    /// give `Functional`.
    pub fn command_for(
        &self,
        stroke: &Stroke,
        lookup: impl FnOnce(&str) -> Option<Command<E>>,
    ) -> Option<Command<E>> {
        match self.value_for(stroke)? {
            KeyMapValue::Command(name) => lookup(name),
            KeyMapValue::Bool(_) => Some(Command::Disabled),
            KeyMapValue::Function(function) => Some(Command::Functional(Rc::clone(function))),
            KeyMapValue::Names(_) | KeyMapValue::Other => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for KeyMapTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for KeyMapTable<E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<E> fmt::Debug for KeyMapTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

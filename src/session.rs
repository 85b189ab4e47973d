//! Editor session: the registries a host editor dispatches keys through
//!
//! A session owns the named-command registry, the keymap set, a per-session
//! table of extra keys and the name of the active keymap. Strokes are looked up
//! in this order:
//!
//! ```text
//! added keymaps (last added first, `bottom` ones last) ─► extra keys ─► active keymap
//! ```

use crate::config::BridgeConfig;
use crate::keymap::{
    default_keymaps, Command, CommandKind, CommandRegistry, EditorAccessor, KeyMapTable,
    KeyMapValue, KeyStroke, KeymapError, KeymapSet, NamedCommand, Stroke, DEFAULT_KEYMAP,
};

/// Result of handling a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A command of this kind ran (or was skipped for lack of an editor)
    Executed(CommandKind),
    /// The stroke is explicitly unbound
    Disabled,
    /// Keystroke is part of a chord, await more input
    AwaitMore,
    /// No binding matches this keystroke
    NoMatch,
}

pub struct EditorSession<E> {
    commands: CommandRegistry<E>,
    keymaps: KeymapSet<E>,
    extra_keys: KeyMapTable<E>,
    keymap: String,
    /// Keymaps layered above the extra keys, highest precedence first
    added: Vec<String>,
    /// Chords typed so far toward a multi-stroke binding
    pending: Vec<KeyStroke>,
}

impl<E> EditorSession<E> {
    /// Create a session over `keymaps` with the `default` keymap active
    pub fn new(keymaps: KeymapSet<E>) -> Self {
        Self {
            commands: CommandRegistry::new(),
            keymaps,
            extra_keys: KeyMapTable::new(),
            keymap: DEFAULT_KEYMAP.to_string(),
            added: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Create a session over the embedded default keymaps
    pub fn with_defaults() -> Self {
        Self::new(default_keymaps())
    }

    /// Create a session from persisted configuration.
    ///
    /// Fails if the configured keymap is unknown or an extra key does not parse.
    pub fn from_config(config: &BridgeConfig, keymaps: KeymapSet<E>) -> Result<Self, KeymapError> {
        let mut session = Self::new(keymaps);
        session.set_active_keymap(&config.keymap)?;
        for (key, command) in &config.extra_keys {
            let stroke = Stroke::parse(key)?;
            session.set_extra_key(&stroke, KeyMapValue::Command(command.clone()));
        }
        Ok(session)
    }

    pub fn commands(&self) -> &CommandRegistry<E> {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandRegistry<E> {
        &mut self.commands
    }

    pub fn keymaps(&self) -> &KeymapSet<E> {
        &self.keymaps
    }

    pub fn keymaps_mut(&mut self) -> &mut KeymapSet<E> {
        &mut self.keymaps
    }

    pub fn extra_keys(&self) -> &KeyMapTable<E> {
        &self.extra_keys
    }

    /// Register a named command with this session
    pub fn define_command(
        &mut self,
        name: impl Into<String>,
        function: impl Fn(&mut E) + 'static,
    ) -> Result<NamedCommand<E>, KeymapError> {
        self.commands.register_named(name, function)
    }

    pub fn active_keymap(&self) -> &str {
        &self.keymap
    }

    /// Switch the active keymap. Unknown names are rejected.
    pub fn set_active_keymap(&mut self, name: &str) -> Result<(), KeymapError> {
        if !self.keymaps.contains(name) {
            return Err(KeymapError::InvalidKeymap(format!("Unknown keymap: {}", name)));
        }
        tracing::debug!(from = %self.keymap, to = name, "Switching keymap");
        self.keymap = name.to_string();
        self.pending.clear();
        Ok(())
    }

    /// Layer a keymap above the extra keys and the active keymap.
    ///
    /// Later additions take precedence over earlier ones, unless `bottom` is
    /// set, in which case the keymap goes below every other added keymap.
    pub fn add_keymap(&mut self, name: &str, bottom: bool) -> Result<(), KeymapError> {
        if !self.keymaps.contains(name) {
            return Err(KeymapError::InvalidKeymap(format!("Unknown keymap: {}", name)));
        }
        if bottom {
            self.added.push(name.to_string());
        } else {
            self.added.insert(0, name.to_string());
        }
        tracing::debug!(keymap = name, bottom, "Added keymap");
        self.pending.clear();
        Ok(())
    }

    /// Remove a keymap added with [`add_keymap`](Self::add_keymap).
    /// Returns false if it was not added.
    pub fn remove_keymap(&mut self, name: &str) -> bool {
        let Some(idx) = self.added.iter().position(|added| added == name) else {
            return false;
        };
        self.added.remove(idx);
        self.pending.clear();
        true
    }

    /// Added keymaps, highest precedence first
    pub fn added_keymaps(&self) -> &[String] {
        &self.added
    }

    /// Bind a raw value in the extra keys
    pub fn set_extra_key(&mut self, stroke: &Stroke, value: KeyMapValue<E>) {
        self.extra_keys.set(stroke.value(), value);
    }

    /// Bind a named command in the extra keys, registering it as well
    pub fn bind_extra_key(&mut self, stroke: &Stroke, command: NamedCommand<E>) {
        self.extra_keys.bind_command(stroke, &command);
        self.commands.register(command);
    }

    /// Bind a callback in the extra keys
    pub fn bind_extra_function(&mut self, stroke: &Stroke, function: impl Fn(&mut E) + 'static) {
        self.extra_keys.bind_function(stroke, function);
    }

    /// Remove an extra key. Returns false if it was not bound.
    pub fn remove_extra_key(&mut self, stroke: &Stroke) -> bool {
        self.extra_keys.remove_stroke(stroke).is_some()
    }

    pub fn has_extra_key(&self, stroke: &Stroke) -> bool {
        self.extra_keys.has_stroke(stroke)
    }

    /// Command bound to a stroke, from the added keymaps, the extra keys or
    /// the active keymap. The first layer binding the stroke decides.
    pub fn command_for(&self, stroke: &Stroke) -> Option<Command<E>> {
        if let Some(layer) = self
            .added
            .iter()
            .find(|name| self.keymaps.value_for(name, stroke).is_some())
        {
            return self.keymaps.command_for(layer, stroke, &self.commands);
        }
        if self.extra_keys.has_stroke(stroke) {
            return self
                .extra_keys
                .command_for(stroke, |name| self.commands.lookup(name));
        }
        self.keymaps.command_for(&self.keymap, stroke, &self.commands)
    }

    /// Every stroke the session responds to, in lookup order: added keymaps,
    /// extra keys, then the active keymap with its fallthrough chain
    pub fn bindings(&self) -> Vec<Stroke> {
        let mut strokes: Vec<Stroke> = self
            .added
            .iter()
            .flat_map(|name| self.keymaps.resolve_bindings(name))
            .collect();
        strokes.extend(
            self.extra_keys
                .keys()
                .filter_map(|key| Stroke::parse(key).ok()),
        );
        strokes.extend(self.keymaps.resolve_bindings(&self.keymap));
        strokes
    }

    /// Run a registered command by name. Returns false if no command has
    /// that name.
    pub fn exec_command<A>(&self, name: &str, accessor: &mut A) -> bool
    where
        A: EditorAccessor<Editor = E> + ?Sized,
    {
        match self.commands.lookup(name) {
            Some(command) => {
                command.execute(accessor);
                true
            }
            None => {
                tracing::debug!(command = name, "Command not registered");
                false
            }
        }
    }

    /// Look up and run the command bound to a complete stroke
    pub fn handle_stroke<A>(&self, stroke: &Stroke, accessor: &mut A) -> KeyAction
    where
        A: EditorAccessor<Editor = E> + ?Sized,
    {
        match self.command_for(stroke) {
            Some(Command::Disabled) => KeyAction::Disabled,
            Some(command) => {
                command.execute(accessor);
                KeyAction::Executed(command.kind())
            }
            None => KeyAction::NoMatch,
        }
    }

    /// Feed one chord, completing multi-stroke bindings across calls
    pub fn handle_keystroke<A>(&mut self, keystroke: KeyStroke, accessor: &mut A) -> KeyAction
    where
        A: EditorAccessor<Editor = E> + ?Sized,
    {
        self.pending.push(keystroke);
        let candidate = match Stroke::from_keystrokes(self.pending.clone()) {
            Ok(stroke) => stroke,
            Err(_) => {
                self.pending.clear();
                return KeyAction::NoMatch;
            }
        };

        let action = self.handle_stroke(&candidate, accessor);
        if action != KeyAction::NoMatch {
            self.pending.clear();
            return action;
        }

        if self.bindings().iter().any(|bound| candidate.is_prefix_of(bound)) {
            tracing::trace!(chord = %candidate, "Awaiting more keys");
            return KeyAction::AwaitMore;
        }

        if candidate.is_multi() {
            tracing::debug!(chord = %candidate, "Chord has no binding");
        }
        self.pending.clear();
        KeyAction::NoMatch
    }

    /// Clear pending chord state
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    pub fn has_pending_chord(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The pending chord keystrokes (for status bar display)
    pub fn pending_chord_display(&self) -> Option<String> {
        Stroke::from_keystrokes(self.pending.clone())
            .ok()
            .map(|stroke| stroke.value())
    }
}

impl<E> std::fmt::Debug for EditorSession<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("commands", &self.commands.names())
            .field("keymaps", &self.keymaps.names())
            .field("extra_keys", &self.extra_keys)
            .field("keymap", &self.keymap)
            .field("added", &self.added)
            .field("pending", &self.pending)
            .finish()
    }
}

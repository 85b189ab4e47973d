//! Keyboard strokes, commands and keymaps
//!
//! This module provides:
//! - Stroke parsing for single chords (`Ctrl-A`) and chains (`Ctrl-X Ctrl-S`)
//! - Disabled, functional and named commands, plus a registry of named commands
//! - Keymap tables with `fallthrough` inheritance and a resolver over them
//! - YAML keymap files and embedded defaults
//!
//! # Architecture
//!
//! ```text
//! keymap name ─► KeymapSet::resolve_bindings() ─► Vec<Stroke>
//! Stroke ─► KeymapSet::command_for() ─► Command ─► execute(editor)
//! ```
//!
//! # Loading Keymaps
//!
//! ```ignore
//! // Load from embedded defaults
//! let keymaps: KeymapSet<MyEditor> = default_keymaps();
//!
//! // Or load from a YAML file
//! let keymaps: KeymapSet<MyEditor> = load_keymaps_file(Path::new("keymaps.yaml"))?;
//! ```

mod command;
mod config;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod registry;
mod stroke;
mod table;
mod types;

pub use command::{Command, CommandFn, CommandKind, EditorAccessor, NamedCommand};
pub use config::{load_keymaps_file, merge_keymaps, parse_keymaps_yaml, KeymapError};
pub use defaults::{
    default_keymaps, get_default_keymaps_yaml, load_default_keymaps, platform_keymap,
    DEFAULT_KEYMAP,
};
pub use keymap::KeymapSet;
pub use registry::CommandRegistry;
pub use stroke::{MultiStroke, Stroke, CHAIN_SEPARATOR};
pub use table::{BindingKind, KeyMapTable, KeyMapValue, FALLTHROUGH};
pub use types::{KeyName, KeyStroke, Modifiers, MODIFIER_SEPARATOR};

#[cfg(test)]
mod tests;

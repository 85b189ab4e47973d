//! Keybridge - keymaps and event plumbing for an embedded code editor
//!
//! This crate sits between host code and a native editor widget:
//! - [`keymap`]: strokes, named commands and keymap tables with fallthrough
//! - [`events`]: many host handlers per event type, one native listener
//! - [`session`]: the registries a host dispatches keys through
//!
//! Everything is single-threaded; shared state uses `Rc` and `RefCell`.

pub mod config;
pub mod config_paths;
pub mod events;
pub mod keymap;
pub mod session;
pub mod tracing;

// Re-export commonly used types
pub use config::BridgeConfig;
pub use events::{EventManager, HandlerType};
pub use keymap::{Command, CommandRegistry, KeymapError, KeymapSet, Stroke};
pub use session::{EditorSession, KeyAction};

//! Default keymaps
//!
//! The standard keymaps ship embedded from `keymaps.yaml` at the project root.
//! A user file at `~/.config/keybridge/keymaps.yaml` is merged on top.

use super::config::{load_keymaps_file, merge_keymaps, parse_keymaps_yaml};
use super::keymap::KeymapSet;
use super::table::{KeyMapTable, KeyMapValue, FALLTHROUGH};

/// Default keymaps YAML embedded at compile time
const DEFAULT_KEYMAPS_YAML: &str = include_str!("../../keymaps.yaml");

/// Name of the keymap selected when nothing else is configured
pub const DEFAULT_KEYMAP: &str = "default";

/// Get the embedded default keymaps YAML (for reference/export)
pub fn get_default_keymaps_yaml() -> &'static str {
    DEFAULT_KEYMAPS_YAML
}

/// Platform keymap that `default` falls through to
pub fn platform_keymap() -> &'static str {
    if cfg!(target_os = "macos") {
        "macDefault"
    } else {
        "pcDefault"
    }
}

/// The embedded keymaps plus the platform `default` alias
pub fn default_keymaps<E>() -> KeymapSet<E> {
    let mut set = match parse_keymaps_yaml(DEFAULT_KEYMAPS_YAML) {
        Ok(set) => set,
        Err(e) => {
            tracing::warn!("Failed to parse embedded keymaps: {}", e);
            KeymapSet::new()
        }
    };

    if !set.contains(DEFAULT_KEYMAP) {
        set.insert(
            DEFAULT_KEYMAP,
            KeyMapTable::new().with(
                FALLTHROUGH,
                KeyMapValue::Command(platform_keymap().to_string()),
            ),
        );
    }
    set
}

/// Load and merge keymaps: embedded defaults + user overrides
pub fn load_default_keymaps<E>() -> KeymapSet<E> {
    let mut set = default_keymaps();
    tracing::info!("Loaded embedded keymaps ({} keymaps)", set.len());

    if let Some(user_path) = crate::config_paths::keymaps_file() {
        if user_path.exists() {
            match load_keymaps_file(&user_path) {
                Ok(user) => {
                    tracing::info!(
                        "Merging user keymaps from {} ({} keymaps)",
                        user_path.display(),
                        user.len()
                    );
                    set = merge_keymaps(set, user);
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to load user keymaps from {}: {}",
                        user_path.display(),
                        e
                    );
                }
            }
        }
    }

    set
}

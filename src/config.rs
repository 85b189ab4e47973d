//! Bridge configuration persistence
//!
//! Stores the active keymap and per-user extra keys in
//! `~/.config/keybridge/config.yaml`:
//!
//! ```yaml
//! keymap: emacs
//! extra_keys:
//!   Ctrl-Alt-F: formatDocument
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::keymap::DEFAULT_KEYMAP;

/// Bridge configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Active keymap name (e.g., "default", "emacs")
    #[serde(default = "default_keymap")]
    pub keymap: String,

    /// Stroke -> command name bindings consulted before the keymap
    #[serde(default)]
    pub extra_keys: BTreeMap<String, String>,
}

fn default_keymap() -> String {
    DEFAULT_KEYMAP.to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            keymap: default_keymap(),
            extra_keys: BTreeMap::new(),
        }
    }
}

impl BridgeConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults if unusable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Update the active keymap and save
    pub fn set_keymap(&mut self, name: &str) -> Result<(), String> {
        self.keymap = name.to_string();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: BridgeConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.keymap, "default");
    }

    #[test]
    fn test_parse_extra_keys() {
        let config: BridgeConfig =
            serde_yaml::from_str("keymap: emacs\nextra_keys:\n  Ctrl-Alt-F: format\n").unwrap();
        assert_eq!(config.keymap, "emacs");
        assert_eq!(
            config.extra_keys.get("Ctrl-Alt-F").map(String::as_str),
            Some("format")
        );
    }
}

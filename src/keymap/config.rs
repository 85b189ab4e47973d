//! YAML configuration parsing for keymaps
//!
//! A keymap file holds named tables. Values are command names, `false`, or for
//! `fallthrough`, one parent name or a list of them:
//!
//! ```yaml
//! keymaps:
//!   markdown:
//!     Ctrl-B: bold
//!     Ctrl-X Ctrl-S: save
//!     Tab: false
//!     fallthrough: [default]
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use super::keymap::KeymapSet;
use super::stroke::Stroke;
use super::table::{KeyMapTable, KeyMapValue, FALLTHROUGH};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapsConfig {
    #[serde(default)]
    pub keymaps: serde_yaml::Mapping,
}

/// Load keymaps from a YAML file
pub fn load_keymaps_file<E>(path: &Path) -> Result<KeymapSet<E>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymaps_yaml(&content)
}

/// Parse keymaps from a YAML string
pub fn parse_keymaps_yaml<E>(yaml: &str) -> Result<KeymapSet<E>, KeymapError> {
    let config: KeymapsConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let mut set = KeymapSet::new();
    for (name, table) in config.keymaps {
        let name = name
            .as_str()
            .ok_or_else(|| {
                KeymapError::InvalidKeymap(format!("Keymap name is not a string: {:?}", name))
            })?
            .to_string();
        let table = parse_table(&name, table)?;
        set.insert(name, table);
    }
    Ok(set)
}

/// Parse one keymap table, validating every stroke key
fn parse_table<E>(name: &str, value: Value) -> Result<KeyMapTable<E>, KeymapError> {
    let Value::Mapping(mapping) = value else {
        return Err(KeymapError::InvalidKeymap(format!(
            "Keymap '{}' is not a mapping",
            name
        )));
    };

    let mut table = KeyMapTable::new();
    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            return Err(KeymapError::InvalidKey(format!(
                "Non-string key in keymap '{}': {:?}",
                name, key
            )));
        };

        if key == FALLTHROUGH {
            table.set(key, parse_fallthrough(name, value)?);
            continue;
        }

        // validate now so bad files fail at load time
        Stroke::parse(key)?;
        table.set(key, parse_value(value));
    }
    Ok(table)
}

fn parse_value<E>(value: Value) -> KeyMapValue<E> {
    match value {
        Value::String(command) => KeyMapValue::Command(command),
        Value::Bool(b) => KeyMapValue::Bool(b),
        _ => KeyMapValue::Other,
    }
}

fn parse_fallthrough<E>(name: &str, value: Value) -> Result<KeyMapValue<E>, KeymapError> {
    match value {
        Value::String(parent) => Ok(KeyMapValue::Command(parent)),
        Value::Sequence(parents) => parents
            .into_iter()
            .map(|parent| match parent {
                Value::String(parent) => Ok(parent),
                other => Err(KeymapError::InvalidKeymap(format!(
                    "Fallthrough of '{}' lists a non-string: {:?}",
                    name, other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(KeyMapValue::Names),
        other => Err(KeymapError::InvalidKeymap(format!(
            "Fallthrough of '{}' must be a name or a list: {:?}",
            name, other
        ))),
    }
}

/// Merge `overlay` into `base`.
///
/// Tables present in both are merged entry by entry, overlay entries replacing
/// base entries with the same key. Other overlay tables are added as-is.
pub fn merge_keymaps<E>(mut base: KeymapSet<E>, overlay: KeymapSet<E>) -> KeymapSet<E> {
    for name in overlay.names() {
        let Some(table) = overlay.get(name) else {
            continue;
        };
        let target = base.entry(name);
        for (key, value) in table.entries() {
            target.set(key.clone(), value.clone());
        }
    }
    base
}

/// Errors that can occur when parsing strokes, commands and keymaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidCommandName(String),
    InvalidKeymap(String),
    EmptyComposition,
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidCommandName(c) => write!(f, "Invalid command name: {:?}", c),
            KeymapError::InvalidKeymap(m) => write!(f, "Invalid keymap: {}", m),
            KeymapError::EmptyComposition => write!(f, "Cannot compose zero strokes"),
        }
    }
}

impl std::error::Error for KeymapError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::table::BindingKind;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
keymaps:
  A:
    Ctrl-A: bold
    fallthrough: B
  B:
    Ctrl-B: italic
    Tab: false
"#;

        let set = parse_keymaps_yaml::<()>(yaml).unwrap();
        assert_eq!(set.names(), vec!["A", "B"]);

        let strokes: Vec<String> = set.resolve_bindings("A").iter().map(Stroke::value).collect();
        assert_eq!(strokes, vec!["Ctrl-A", "Ctrl-B", "Tab"]);
    }

    #[test]
    fn test_parse_fallthrough_list() {
        let yaml = r#"
keymaps:
  top:
    fallthrough: [left, right]
"#;
        let set = parse_keymaps_yaml::<()>(yaml).unwrap();
        assert_eq!(
            set.get("top").unwrap().fallthrough(),
            ["left".to_string(), "right".to_string()]
        );
    }

    #[test]
    fn test_unusable_values_are_kept_as_other() {
        let yaml = r#"
keymaps:
  m:
    Ctrl-1: 42
"#;
        let set = parse_keymaps_yaml::<()>(yaml).unwrap();
        let stroke = Stroke::parse("Ctrl-1").unwrap();
        assert_eq!(set.classify_binding("m", &stroke), BindingKind::Unknown);
        assert!(set.get("m").unwrap().has_stroke(&stroke));
    }

    #[test]
    fn test_invalid_key_fails_load() {
        let yaml = r#"
keymaps:
  m:
    Hyper-Q: quit
"#;
        assert!(matches!(
            parse_keymaps_yaml::<()>(yaml),
            Err(KeymapError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_invalid_fallthrough_fails_load() {
        let yaml = r#"
keymaps:
  m:
    fallthrough: 3
"#;
        assert!(matches!(
            parse_keymaps_yaml::<()>(yaml),
            Err(KeymapError::InvalidKeymap(_))
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            parse_keymaps_yaml::<()>("keymaps: [unclosed"),
            Err(KeymapError::ParseError(_))
        ));
    }

    #[test]
    fn test_merge_overrides_entries() {
        let base = parse_keymaps_yaml::<()>(
            "keymaps:\n  m:\n    Ctrl-A: bold\n    Ctrl-B: italic\n",
        )
        .unwrap();
        let overlay = parse_keymaps_yaml::<()>(
            "keymaps:\n  m:\n    Ctrl-B: false\n  extra:\n    F1: help\n",
        )
        .unwrap();

        let merged = merge_keymaps(base, overlay);
        let m = merged.get("m").unwrap();
        assert_eq!(m.keys().collect::<Vec<_>>(), vec!["Ctrl-A", "Ctrl-B"]);
        assert!(matches!(m.get("Ctrl-B"), Some(KeyMapValue::Bool(false))));
        assert!(merged.contains("extra"));
    }
}

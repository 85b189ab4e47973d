//! Core types for the keymap system: KeyStroke, Modifiers, KeyName

use std::fmt;
use std::str::FromStr;

use super::config::KeymapError;

/// Separator between modifiers and the key inside a single stroke
pub const MODIFIER_SEPARATOR: char = '-';

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(0b0001);
    pub const CMD: Modifiers = Modifiers(0b0010);
    pub const CTRL: Modifiers = Modifiers(0b0100);
    pub const ALT: Modifiers = Modifiers(0b1000);

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn cmd(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b1000 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// The platform "Mod" key (Cmd on macOS, Ctrl elsewhere)
    pub fn platform() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::CMD
        } else {
            Modifiers::CTRL
        }
    }

    /// Parse a single modifier name (case-insensitive)
    pub fn parse_one(name: &str) -> Option<Modifiers> {
        match name.to_ascii_lowercase().as_str() {
            "shift" => Some(Modifiers::SHIFT),
            "cmd" | "meta" => Some(Modifiers::CMD),
            "ctrl" | "control" => Some(Modifiers::CTRL),
            "alt" => Some(Modifiers::ALT),
            "mod" => Some(Modifiers::platform()),
            _ => None,
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Writes each held modifier followed by the separator, in canonical order
/// (`Shift-Cmd-Ctrl-Alt-`).
impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shift() {
            write!(f, "Shift{}", MODIFIER_SEPARATOR)?;
        }
        if self.cmd() {
            write!(f, "Cmd{}", MODIFIER_SEPARATOR)?;
        }
        if self.ctrl() {
            write!(f, "Ctrl{}", MODIFIER_SEPARATOR)?;
        }
        if self.alt() {
            write!(f, "Alt{}", MODIFIER_SEPARATOR)?;
        }
        Ok(())
    }
}

/// A key name as used in keymap tables
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyName {
    /// A printable character key (letters normalized to uppercase)
    Char(char),

    Pause,
    Backspace,
    Tab,
    Enter,
    CapsLock,
    Esc,
    Space,

    PageUp,
    PageDown,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,

    PrintScrn,
    Insert,
    Delete,
    ScrollLock,

    // Function keys
    F(u8), // F1-F24
}

impl KeyName {
    /// Create a character key, upper-casing letters
    pub fn char(c: char) -> Self {
        KeyName::Char(c.to_ascii_uppercase())
    }
}

impl FromStr for KeyName {
    type Err = KeymapError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_whitespace() || c.is_control() {
                return Err(KeymapError::InvalidKey(format!("Unknown key: {:?}", key)));
            }
            return Ok(KeyName::char(c));
        }

        let lower = key.to_ascii_lowercase();
        match lower.as_str() {
            "pause" => Ok(KeyName::Pause),
            "backspace" => Ok(KeyName::Backspace),
            "tab" => Ok(KeyName::Tab),
            "enter" => Ok(KeyName::Enter),
            "capslock" => Ok(KeyName::CapsLock),
            "esc" | "escape" => Ok(KeyName::Esc),
            "space" => Ok(KeyName::Space),

            "pageup" => Ok(KeyName::PageUp),
            "pagedown" => Ok(KeyName::PageDown),
            "end" => Ok(KeyName::End),
            "home" => Ok(KeyName::Home),
            "left" => Ok(KeyName::Left),
            "up" => Ok(KeyName::Up),
            "right" => Ok(KeyName::Right),
            "down" => Ok(KeyName::Down),

            "printscrn" => Ok(KeyName::PrintScrn),
            "insert" => Ok(KeyName::Insert),
            "delete" => Ok(KeyName::Delete),
            "scrolllock" => Ok(KeyName::ScrollLock),

            _ => lower
                .strip_prefix('f')
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=24).contains(n))
                .map(KeyName::F)
                .ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key: {}", key))),
        }
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyName::Char(c) => write!(f, "{}", c),
            KeyName::Pause => write!(f, "Pause"),
            KeyName::Backspace => write!(f, "Backspace"),
            KeyName::Tab => write!(f, "Tab"),
            KeyName::Enter => write!(f, "Enter"),
            KeyName::CapsLock => write!(f, "CapsLock"),
            KeyName::Esc => write!(f, "Esc"),
            KeyName::Space => write!(f, "Space"),
            KeyName::PageUp => write!(f, "PageUp"),
            KeyName::PageDown => write!(f, "PageDown"),
            KeyName::End => write!(f, "End"),
            KeyName::Home => write!(f, "Home"),
            KeyName::Left => write!(f, "Left"),
            KeyName::Up => write!(f, "Up"),
            KeyName::Right => write!(f, "Right"),
            KeyName::Down => write!(f, "Down"),
            KeyName::PrintScrn => write!(f, "PrintScrn"),
            KeyName::Insert => write!(f, "Insert"),
            KeyName::Delete => write!(f, "Delete"),
            KeyName::ScrollLock => write!(f, "ScrollLock"),
            KeyName::F(n) => write!(f, "F{}", n),
        }
    }
}

/// A single keystroke: a key with modifiers.
///
/// Always in canonical form: letters are upper-case, whitespace and control
/// characters are rejected and function keys stay within F1-F24.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    key: KeyName,
    mods: Modifiers,
}

impl KeyStroke {
    /// Create a keystroke, normalizing the key to its canonical form
    pub fn new(key: KeyName, mods: Modifiers) -> Result<Self, KeymapError> {
        let key = match key {
            KeyName::Char(c) if c.is_whitespace() || c.is_control() => {
                return Err(KeymapError::InvalidKey(format!("Unknown key: {:?}", c)));
            }
            KeyName::Char(c) => KeyName::char(c),
            KeyName::F(n) if !(1..=24).contains(&n) => {
                return Err(KeymapError::InvalidKey(format!("Unknown key: F{}", n)));
            }
            key => key,
        };
        Ok(Self { key, mods })
    }

    pub fn key_name(&self) -> KeyName {
        self.key
    }

    pub fn mods(&self) -> Modifiers {
        self.mods
    }

    /// Canonical keymap form, e.g. `Shift-Ctrl-A`
    pub fn value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.mods, self.key)
    }
}

/// Parses one chord such as `Ctrl-Alt-Space` or `Ctrl--`
impl FromStr for KeyStroke {
    type Err = KeymapError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(KeymapError::InvalidKey("Key is empty".to_string()));
        }

        if value.len() == 1 || !value.contains(MODIFIER_SEPARATOR) {
            return KeyStroke::new(value.parse()?, Modifiers::NONE);
        }

        // A trailing separator names the minus key itself, so it must be doubled
        let (modifiers, key) = if let Some(prefix) = value.strip_suffix(MODIFIER_SEPARATOR) {
            let Some(prefix) = prefix.strip_suffix(MODIFIER_SEPARATOR) else {
                return Err(KeymapError::InvalidKey(format!(
                    "Key is not correctly formatted: {}",
                    raw
                )));
            };
            (prefix, KeyName::Char(MODIFIER_SEPARATOR))
        } else {
            match value.rsplit_once(MODIFIER_SEPARATOR) {
                Some((prefix, key)) => (prefix, key.parse()?),
                None => ("", value.parse()?),
            }
        };

        // every segment before the key must be a modifier, so `-A` is rejected
        let mut mods = Modifiers::NONE;
        for part in modifiers.split(MODIFIER_SEPARATOR) {
            let modifier = Modifiers::parse_one(part).ok_or_else(|| {
                KeymapError::InvalidKey(format!("Key '{}' is not a modifier in {}", part, raw))
            })?;
            mods = mods | modifier;
        }

        KeyStroke::new(key, mods)
    }
}

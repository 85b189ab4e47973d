//! Strokes as keymap keys: a single chord or a chain of chords

use std::fmt;
use std::str::FromStr;

use super::config::KeymapError;
use super::types::KeyStroke;

/// Separator between the chords of a chained stroke
pub const CHAIN_SEPARATOR: char = ' ';

/// A keymap key: one chord, or a sequence of chords matched in order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stroke {
    Single(KeyStroke),
    Multi(MultiStroke),
}

impl Stroke {
    /// Parse a raw keymap key such as `Ctrl-A` or `Ctrl-X Ctrl-S`
    pub fn parse(raw: &str) -> Result<Stroke, KeymapError> {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Err(KeymapError::InvalidKey("Key is empty".to_string())),
            [single] => Ok(Stroke::Single(single.parse()?)),
            many => {
                let strokes = many
                    .iter()
                    .map(|token| token.parse::<KeyStroke>())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Stroke::Multi(MultiStroke { strokes }))
            }
        }
    }

    /// Chain strokes into a composite, splicing in the chords of composites
    pub fn compose(strokes: &[Stroke]) -> Result<MultiStroke, KeymapError> {
        if strokes.is_empty() {
            return Err(KeymapError::EmptyComposition);
        }
        let mut items = Vec::with_capacity(strokes.len());
        for stroke in strokes {
            items.extend_from_slice(stroke.keystrokes());
        }
        Ok(MultiStroke { strokes: items })
    }

    /// Build a stroke from chords: one chord gives `Single`, more give `Multi`
    pub fn from_keystrokes(strokes: Vec<KeyStroke>) -> Result<Stroke, KeymapError> {
        match strokes.len() {
            0 => Err(KeymapError::EmptyComposition),
            1 => Ok(Stroke::Single(strokes[0])),
            _ => Ok(Stroke::Multi(MultiStroke { strokes })),
        }
    }

    /// Canonical string form, as used for keymap keys
    pub fn value(&self) -> String {
        self.to_string()
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Stroke::Multi(_))
    }

    /// The chords of this stroke (one for a single stroke)
    pub fn keystrokes(&self) -> &[KeyStroke] {
        match self {
            Stroke::Single(stroke) => std::slice::from_ref(stroke),
            Stroke::Multi(multi) => multi.items(),
        }
    }

    /// Check if this stroke is a strict prefix of `other`
    pub fn is_prefix_of(&self, other: &Stroke) -> bool {
        let mine = self.keystrokes();
        let theirs = other.keystrokes();
        theirs.len() > mine.len() && theirs[..mine.len()] == *mine
    }
}

impl From<KeyStroke> for Stroke {
    fn from(stroke: KeyStroke) -> Self {
        Stroke::Single(stroke)
    }
}

impl From<MultiStroke> for Stroke {
    fn from(multi: MultiStroke) -> Self {
        Stroke::Multi(multi)
    }
}

impl FromStr for Stroke {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stroke::parse(s)
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stroke::Single(stroke) => fmt::Display::fmt(stroke, f),
            Stroke::Multi(multi) => fmt::Display::fmt(multi, f),
        }
    }
}

/// An ordered, non-empty chain of chords. Never contains another chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiStroke {
    strokes: Vec<KeyStroke>,
}

impl MultiStroke {
    pub fn items(&self) -> &[KeyStroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MultiStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stroke) in self.strokes.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", CHAIN_SEPARATOR)?;
            }
            write!(f, "{}", stroke)?;
        }
        Ok(())
    }
}

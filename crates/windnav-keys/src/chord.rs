//! Hotkey chords and their textual form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Key, Modifier, ModifierSet, ParseError};

/// A hotkey chord: a set of modifiers plus a single key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Chord {
    /// Modifier keys held down for this chord.
    pub modifiers: ModifierSet,
    /// The non-modifier key for this chord.
    pub key: Key,
}

impl Chord {
    /// Parses a hotkey of the form `"cmd-left"` or `"ctrl+opt+k"`.
    ///
    /// - Case-insensitive; whitespace is ignored.
    /// - Components are separated by `-` or `+`; the last component is the key.
    /// - At least one modifier component is required.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        let mut parts: Vec<&str> = normalized.split(['-', '+']).collect();
        if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(ParseError::InvalidFormat(s.to_string()));
        }
        let key_raw = parts.pop().unwrap_or_default();
        let key = Key::from_spec(key_raw).ok_or_else(|| ParseError::InvalidKey(key_raw.into()))?;
        let mut modifiers = ModifierSet::EMPTY;
        for raw in parts {
            let m = Modifier::from_spec(raw)
                .ok_or_else(|| ParseError::InvalidModifier(raw.to_string()))?;
            modifiers.insert(m);
        }
        Ok(Self { modifiers, key })
    }

    /// Returns the canonical string form of this chord (`cmd-opt-left`).
    pub fn to_string_canonical(&self) -> String {
        let mut out: Vec<String> = self.modifiers.iter().map(|m| m.to_spec().into()).collect();
        out.push(self.key.to_spec());
        out.join("-")
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_canonical())
    }
}

//! Modifier keys and modifier sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Modifier keys that can participate in a navigation hotkey.
///
/// Variant order is the canonical rendering order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Modifier {
    /// Command (⌘).
    Command,
    /// Control (⌃).
    Control,
    /// Option/Alt (⌥).
    Option,
    /// Shift (⇧).
    Shift,
}

impl Modifier {
    /// All modifiers in canonical order.
    pub const ALL: [Self; 4] = [Self::Command, Self::Control, Self::Option, Self::Shift];

    /// Parse a modifier spec, accepting common aliases
    /// (`cmd|command`, `ctrl|control|ctl`, `opt|option|alt`, `shift`).
    pub fn from_spec(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cmd" | "command" => Some(Self::Command),
            "ctrl" | "control" | "ctl" => Some(Self::Control),
            "opt" | "option" | "alt" => Some(Self::Option),
            "shift" => Some(Self::Shift),
            _ => None,
        }
    }

    /// Canonical short spec string.
    pub const fn to_spec(self) -> &'static str {
        match self {
            Self::Command => "cmd",
            Self::Control => "ctrl",
            Self::Option => "opt",
            Self::Shift => "shift",
        }
    }

    /// Bit used for this modifier inside a [`ModifierSet`].
    const fn bit(self) -> u8 {
        match self {
            Self::Command => 1,
            Self::Control => 1 << 1,
            Self::Option => 1 << 2,
            Self::Shift => 1 << 3,
        }
    }
}

/// A compact set of held modifiers.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ModifierSet(u8);

impl ModifierSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Build a set from a list of modifiers.
    pub fn from_modifiers(mods: &[Modifier]) -> Self {
        mods.iter().fold(Self::EMPTY, |acc, m| acc.with(*m))
    }

    /// Return a copy of this set with `m` added.
    #[must_use]
    pub const fn with(self, m: Modifier) -> Self {
        Self(self.0 | m.bit())
    }

    /// Add `m` to the set.
    pub fn insert(&mut self, m: Modifier) {
        self.0 |= m.bit();
    }

    /// True when `m` is in the set.
    pub const fn contains(self, m: Modifier) -> bool {
        self.0 & m.bit() != 0
    }

    /// True when every modifier in `other` is also in `self`.
    pub const fn contains_all(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when no modifier is held.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate modifiers in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.iter().map(Modifier::to_spec).collect();
        if parts.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&parts.join("-"))
        }
    }
}

/// Construct a modifier set from platform event flag bits.
///
/// Only the primary device-independent bits are considered:
/// - Shift (1 << 17)
/// - Control (1 << 18)
/// - Option/Alternate (1 << 19)
/// - Command (1 << 20)
pub fn modifiers_from_flags(flags: u64) -> ModifierSet {
    let mut set = ModifierSet::EMPTY;
    if flags & (1 << 17) != 0 {
        set.insert(Modifier::Shift);
    }
    if flags & (1 << 18) != 0 {
        set.insert(Modifier::Control);
    }
    if flags & (1 << 19) != 0 {
        set.insert(Modifier::Option);
    }
    if flags & (1 << 20) != 0 {
        set.insert(Modifier::Command);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve() {
        assert_eq!(Modifier::from_spec("Command"), Some(Modifier::Command));
        assert_eq!(Modifier::from_spec("ctl"), Some(Modifier::Control));
        assert_eq!(Modifier::from_spec("alt"), Some(Modifier::Option));
        assert_eq!(Modifier::from_spec("hyper"), None);
    }

    #[test]
    fn flags_decode() {
        let set = modifiers_from_flags((1 << 20) | (1 << 17));
        assert!(set.contains(Modifier::Command));
        assert!(set.contains(Modifier::Shift));
        assert!(!set.contains(Modifier::Option));
        assert_eq!(set.to_string(), "cmd-shift");
        assert!(modifiers_from_flags(0).is_empty());
    }

    #[test]
    fn superset_check() {
        let held = ModifierSet::from_modifiers(&[Modifier::Command, Modifier::Option]);
        let required = ModifierSet::EMPTY.with(Modifier::Command);
        assert!(held.contains_all(required));
        assert!(!required.contains_all(held));
        assert!(held.contains_all(ModifierSet::EMPTY));
    }
}

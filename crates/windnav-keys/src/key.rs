//! Hotkey keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Keys usable as the final component of a navigation hotkey.
#[allow(missing_docs, clippy::missing_docs_in_private_items)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Return,
    Escape,
    Tab,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
}

/// Letters in variant order, used to map single characters.
const LETTERS: [Key; 26] = [
    Key::A,
    Key::B,
    Key::C,
    Key::D,
    Key::E,
    Key::F,
    Key::G,
    Key::H,
    Key::I,
    Key::J,
    Key::K,
    Key::L,
    Key::M,
    Key::N,
    Key::O,
    Key::P,
    Key::Q,
    Key::R,
    Key::S,
    Key::T,
    Key::U,
    Key::V,
    Key::W,
    Key::X,
    Key::Y,
    Key::Z,
];

/// Digits in variant order.
const DIGITS: [Key; 10] = [
    Key::Digit0,
    Key::Digit1,
    Key::Digit2,
    Key::Digit3,
    Key::Digit4,
    Key::Digit5,
    Key::Digit6,
    Key::Digit7,
    Key::Digit8,
    Key::Digit9,
];

impl Key {
    /// Parse a key spec. Case-insensitive; `enter` is an alias for `return`
    /// and `esc` for `escape`.
    pub fn from_spec(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let named = match lower.as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "space" => Some(Self::Space),
            "return" | "enter" => Some(Self::Return),
            "escape" | "esc" => Some(Self::Escape),
            "tab" => Some(Self::Tab),
            _ => None,
        };
        if named.is_some() {
            return named;
        }
        let mut chars = lower.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => {
                LETTERS.get((c as u8 - b'a') as usize).copied()
            }
            (Some(c), None) if c.is_ascii_digit() => DIGITS.get((c as u8 - b'0') as usize).copied(),
            _ => None,
        }
    }

    /// Canonical lowercase spec string for this key.
    pub fn to_spec(self) -> String {
        match self {
            Self::Left => "left".into(),
            Self::Right => "right".into(),
            Self::Up => "up".into(),
            Self::Down => "down".into(),
            Self::Space => "space".into(),
            Self::Return => "return".into(),
            Self::Escape => "escape".into(),
            Self::Tab => "tab".into(),
            k => {
                if let Some(i) = LETTERS.iter().position(|l| *l == k) {
                    char::from(b'a' + i as u8).to_string()
                } else if let Some(i) = DIGITS.iter().position(|d| *d == k) {
                    i.to_string()
                } else {
                    format!("{k:?}").to_ascii_lowercase()
                }
            }
        }
    }

    /// True for the four arrow keys.
    pub const fn is_arrow(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Up | Self::Down)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_spec())
    }
}

//! Navigation directions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A navigation direction delivered by a hotkey.
///
/// `Left`/`Right` move between apps in the ring; `Up`/`Down` step between
/// windows within one app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Previous app.
    Left,
    /// Next app.
    Right,
    /// Next window within the app.
    Up,
    /// Previous window within the app.
    Down,
}

impl Direction {
    /// Every direction, in binding order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// True for `Left` and `Right`.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Lowercase name used in logs and config keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Chord parse errors.

use thiserror::Error;

/// Errors produced while parsing a hotkey string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The string is not `modifier-...-key` shaped.
    #[error("invalid hotkey format: {0:?}")]
    InvalidFormat(String),
    /// A modifier component was not recognized.
    #[error("invalid hotkey modifier: {0:?}")]
    InvalidModifier(String),
    /// The key component was not recognized.
    #[error("invalid hotkey key: {0:?}")]
    InvalidKey(String),
}

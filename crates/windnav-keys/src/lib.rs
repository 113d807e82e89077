//! windnav-keys: key and modifier vocabulary for navigator hotkeys.
//!
//! - `Key`: the non-modifier keys a navigation hotkey may use.
//! - `Modifier`: modifier keys, with decoding from platform flag bits.
//! - `Chord`: a parsed hotkey such as `cmd-left`.
//!
//! Registration of chords with the operating system lives elsewhere; this
//! crate only understands the textual form and the modifier bitmask.

mod key;
pub use key::Key;

mod modifiers;
pub use modifiers::{Modifier, ModifierSet, modifiers_from_flags};

mod chord;
pub use chord::Chord;

mod error;
pub use error::ParseError;

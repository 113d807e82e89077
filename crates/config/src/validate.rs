//! Cross-field validation.

use std::collections::HashMap;

use windnav_keys::Chord;

use crate::{Error, HotkeyAction, HotkeysConfig};

/// Parse every hotkey and check the set is usable.
///
/// Each hotkey must parse, must hold at least one modifier (sessions end on
/// modifier release), and no two actions may share a chord.
pub fn validate_hotkeys(hotkeys: &HotkeysConfig) -> Result<Vec<(HotkeyAction, Chord)>, Error> {
    let mut seen: HashMap<Chord, HotkeyAction> = HashMap::new();
    let mut out = Vec::with_capacity(HotkeyAction::ALL.len());
    for action in HotkeyAction::ALL {
        let key = format!("hotkeys.{}", action.key());
        let raw = hotkeys.get(action);
        let chord = Chord::parse(raw)
            .map_err(|e| Error::validation(&key, format!("{e} (in {raw:?})")))?;
        if chord.modifiers.is_empty() {
            return Err(Error::validation(
                &key,
                format!("hotkey {raw:?} needs at least one modifier"),
            ));
        }
        if let Some(other) = seen.insert(chord, action) {
            return Err(Error::validation(
                &key,
                format!(
                    "hotkey {} is already bound to hotkeys.{}",
                    chord,
                    other.key()
                ),
            ));
        }
        out.push((action, chord));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let bindings = validate_hotkeys(&HotkeysConfig::default()).expect("valid");
        assert_eq!(bindings.len(), 4);
        assert_eq!(bindings[0].0, HotkeyAction::FocusLeft);
        assert_eq!(bindings[0].1.to_string(), "cmd-left");
    }

    #[test]
    fn duplicate_chords_rejected() {
        let hk = HotkeysConfig {
            focus_up: "command-left".into(),
            ..HotkeysConfig::default()
        };
        let err = validate_hotkeys(&hk).expect_err("duplicate");
        assert!(err.to_string().contains("focus-left"), "{err}");
    }

    #[test]
    fn bare_key_rejected() {
        let hk = HotkeysConfig {
            focus_right: "right".into(),
            ..HotkeysConfig::default()
        };
        assert!(validate_hotkeys(&hk).is_err());
    }
}

//! Catalog of default settings and rendering of the default config file.

use std::fmt::Write as _;

use crate::{
    Config,
    types::{
        ColorMode, Grouping, HudPosition, InAppWindow, LogLevel, NavigationMode,
        ShowWindowlessApps, UnpinnedApps,
    },
};

/// A default value as it appears in TOML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefaultValue {
    /// Quoted string.
    Str(String),
    /// Integer.
    Int(u64),
    /// Boolean.
    Bool(bool),
    /// Array of quoted strings.
    StrArray(Vec<String>),
}

impl DefaultValue {
    /// Render as a TOML literal.
    pub fn toml_literal(&self) -> String {
        match self {
            Self::Str(s) => format!("\"{}\"", escape(s)),
            Self::Int(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::StrArray(items) => {
                let rendered: Vec<String> =
                    items.iter().map(|s| format!("\"{}\"", escape(s))).collect();
                format!("[{}]", rendered.join(", "))
            }
        }
    }
}

/// Escape `s` for a TOML basic string.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// One documented setting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Setting {
    /// Key within its section.
    pub key: &'static str,
    /// Default value.
    pub default: DefaultValue,
    /// Allowed values, human readable.
    pub allowed: String,
    /// One-line description.
    pub description: &'static str,
}

/// A TOML table and its settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// Table name, e.g. `navigation.standard`.
    pub name: &'static str,
    /// Settings in file order.
    pub settings: Vec<Setting>,
}

/// Allowed-values text shared by the hotkey settings.
const HOTKEY_ALLOWED: &str =
    "modifiers cmd|command|opt|option|alt|ctrl|control|ctl|shift + key token, joined with '-'";

/// Build a [`Setting`].
fn setting(
    key: &'static str,
    default: DefaultValue,
    allowed: impl Into<String>,
    description: &'static str,
) -> Setting {
    Setting {
        key,
        default,
        allowed: allowed.into(),
        description,
    }
}

/// Every section of the default file, derived from [`Config::default`].
pub fn sections() -> Vec<Section> {
    let c = Config::default();
    let str_val = |s: &str| DefaultValue::Str(s.to_string());
    vec![
        Section {
            name: "hotkeys",
            settings: vec![
                setting(
                    "focus-left",
                    str_val(&c.hotkeys.focus_left),
                    HOTKEY_ALLOWED,
                    "Move focus to the previous app.",
                ),
                setting(
                    "focus-right",
                    str_val(&c.hotkeys.focus_right),
                    HOTKEY_ALLOWED,
                    "Move focus to the next app.",
                ),
                setting(
                    "focus-up",
                    str_val(&c.hotkeys.focus_up),
                    HOTKEY_ALLOWED,
                    "Cycle windows forward within the selected app.",
                ),
                setting(
                    "focus-down",
                    str_val(&c.hotkeys.focus_down),
                    HOTKEY_ALLOWED,
                    "Cycle windows backward within the selected app.",
                ),
            ],
        },
        Section {
            name: "navigation",
            settings: vec![
                setting(
                    "mode",
                    str_val(c.navigation.mode.as_str()),
                    NavigationMode::allowed(),
                    "Navigation strategy for directional cycling.",
                ),
                setting(
                    "cycle-timeout-ms",
                    DefaultValue::Int(c.navigation.cycle_timeout_ms),
                    "non-negative integer (0 keeps the HUD open until modifiers are released)",
                    "HUD timeout and cycling session reset in milliseconds.",
                ),
                setting(
                    "include-minimized",
                    DefaultValue::Bool(c.navigation.include_minimized),
                    "true|false",
                    "Whether minimized windows are included in navigation.",
                ),
                setting(
                    "include-hidden-apps",
                    DefaultValue::Bool(c.navigation.include_hidden_apps),
                    "true|false",
                    "Whether windows of hidden apps are included in navigation.",
                ),
                setting(
                    "show-windowless-apps",
                    str_val(c.navigation.show_windowless_apps.as_str()),
                    ShowWindowlessApps::allowed(),
                    "How apps without windows appear in the ring.",
                ),
            ],
        },
        Section {
            name: "navigation.standard",
            settings: vec![
                setting(
                    "pinned-apps",
                    DefaultValue::StrArray(c.navigation.standard.pinned_apps.clone()),
                    "array of bundle ids",
                    "Apps that lead the ring, in this order.",
                ),
                setting(
                    "unpinned-apps",
                    str_val(c.navigation.standard.unpinned_apps.as_str()),
                    UnpinnedApps::allowed(),
                    "Ordering of apps that are not pinned.",
                ),
                setting(
                    "in-app-window",
                    str_val(c.navigation.standard.in_app_window.as_str()),
                    InAppWindow::allowed(),
                    "Which window to focus when switching into an app.",
                ),
                setting(
                    "grouping",
                    str_val(c.navigation.standard.grouping.as_str()),
                    Grouping::allowed(),
                    "How windows are grouped into ring stops.",
                ),
            ],
        },
        Section {
            name: "logging",
            settings: vec![
                setting(
                    "level",
                    str_val(c.logging.level.as_str()),
                    LogLevel::allowed(),
                    "Log verbosity.",
                ),
                setting(
                    "color",
                    str_val(c.logging.color.as_str()),
                    ColorMode::allowed(),
                    "ANSI color in log output.",
                ),
            ],
        },
        Section {
            name: "startup",
            settings: vec![setting(
                "launch-on-login",
                DefaultValue::Bool(c.startup.launch_on_login),
                "true|false",
                "Start windnav when you log in.",
            )],
        },
        Section {
            name: "hud",
            settings: vec![
                setting(
                    "enabled",
                    DefaultValue::Bool(c.hud.enabled),
                    "true|false",
                    "Show the app ring HUD while navigating.",
                ),
                setting(
                    "show-icons",
                    DefaultValue::Bool(c.hud.show_icons),
                    "true|false",
                    "Render app icons in the HUD.",
                ),
                setting(
                    "position",
                    str_val(c.hud.position.as_str()),
                    HudPosition::allowed(),
                    "Vertical placement of the HUD.",
                ),
            ],
        },
    ]
}

/// Render the documented default config file.
pub fn render_default_toml() -> String {
    let mut out = String::from("# windnav configuration\n");
    for section in sections() {
        let _ignored = write!(out, "\n[{}]\n", section.name);
        for s in &section.settings {
            let _ignored = writeln!(out, "# {}", s.description);
            let _ignored = writeln!(out, "# allowed: {}", s.allowed);
            let _ignored = writeln!(out, "{} = {}", s.key, s.default.toml_literal());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_str;

    #[test]
    fn rendered_defaults_parse_back() {
        let text = render_default_toml();
        let cfg = parse_str(&text).expect("default file parses");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn every_section_is_rendered() {
        let text = render_default_toml();
        for name in ["hotkeys", "navigation", "navigation.standard", "logging", "startup", "hud"] {
            assert!(text.contains(&format!("[{name}]")), "missing [{name}]");
        }
        assert!(text.contains("cycle-timeout-ms = 900"));
        assert!(text.contains("pinned-apps = []"));
    }

    #[test]
    fn literals_escape_quotes() {
        let v = DefaultValue::StrArray(vec!["a\"b".into(), "c\\d".into()]);
        assert_eq!(v.toml_literal(), r#"["a\"b", "c\\d"]"#);
    }
}

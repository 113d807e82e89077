//! Raw, all-optional mirror of the config file.
//!
//! Deserialization only checks TOML types; enum spellings, ranges and legacy
//! keys are checked while resolving into [`Config`]. Unknown keys are
//! reported by [`unknown_keys`] and otherwise ignored.

use serde::Deserialize;
use toml::{Table, Value};
use tracing::debug;

use crate::{
    Config, Error, HotkeysConfig, HudConfig, LoggingConfig, NavigationConfig, StandardConfig,
    StartupConfig,
    types::{
        ColorMode, Grouping, HudPosition, InAppWindow, LogLevel, NavigationMode,
        ShowWindowlessApps, UnpinnedApps,
    },
};

/// Parse an enum spelling for `key`, reporting the allowed values on failure.
macro_rules! choice {
    ($ty:ty, $key:expr, $raw:expr) => {
        <$ty>::from_name(&$raw).ok_or_else(|| Error::invalid_value($key, &<$ty>::allowed(), &$raw))
    };
}

/// Keys accepted by each table, keyed by dotted table path; `""` is the root.
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("", &["hotkeys", "navigation", "logging", "startup", "hud"]),
    (
        "hotkeys",
        &["focus-left", "focus-right", "focus-up", "focus-down"],
    ),
    (
        "navigation",
        &[
            "mode",
            "cycle-timeout-ms",
            "include-minimized",
            "include-hidden-apps",
            "show-windowless-apps",
            "standard",
            "policy",
            "fixed-app-ring",
        ],
    ),
    (
        "navigation.standard",
        &["pinned-apps", "unpinned-apps", "in-app-window", "grouping"],
    ),
    ("logging", &["level", "color"]),
    ("startup", &["launch-on-login"]),
    ("hud", &["enabled", "show-icons", "position"]),
];

/// Keys in `table` that no section accepts, as `[section].key` (or bare
/// `key` at the root). Unknown tables are reported once, not descended into.
pub fn unknown_keys(table: &Table) -> Vec<String> {
    let mut out = Vec::new();
    collect_unknown(table, "", &mut out);
    out
}

/// Append the unknown keys of the table at `section` to `out`.
fn collect_unknown(table: &Table, section: &str, out: &mut Vec<String>) {
    let known = KNOWN_KEYS
        .iter()
        .find(|(name, _)| *name == section)
        .map_or(&[][..], |(_, keys)| *keys);
    for (key, value) in table {
        if !known.contains(&key.as_str()) {
            out.push(if section.is_empty() {
                key.clone()
            } else {
                format!("[{section}].{key}")
            });
            continue;
        }
        let child = if section.is_empty() {
            key.clone()
        } else {
            format!("{section}.{key}")
        };
        if let Value::Table(inner) = value
            && KNOWN_KEYS.iter().any(|(name, _)| *name == child)
        {
            collect_unknown(inner, &child, out);
        }
    }
}

/// Root of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawConfig {
    /// `[hotkeys]` table.
    #[serde(default)]
    pub hotkeys: Option<RawHotkeys>,
    /// `[navigation]` table.
    #[serde(default)]
    pub navigation: Option<RawNavigation>,
    /// `[logging]` table.
    #[serde(default)]
    pub logging: Option<RawLogging>,
    /// `[startup]` table.
    #[serde(default)]
    pub startup: Option<RawStartup>,
    /// `[hud]` table.
    #[serde(default)]
    pub hud: Option<RawHud>,
}

/// `[hotkeys]`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawHotkeys {
    /// Previous-app chord.
    #[serde(default)]
    pub focus_left: Option<String>,
    /// Next-app chord.
    #[serde(default)]
    pub focus_right: Option<String>,
    /// Browse/next-window chord.
    #[serde(default)]
    pub focus_up: Option<String>,
    /// Browse/previous-window chord.
    #[serde(default)]
    pub focus_down: Option<String>,
}

/// `[navigation]`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawNavigation {
    /// Navigation mode name.
    #[serde(default)]
    pub mode: Option<String>,
    /// Signed so negatives can be reported.
    #[serde(default)]
    pub cycle_timeout_ms: Option<i64>,
    /// Consider minimized windows.
    #[serde(default)]
    pub include_minimized: Option<bool>,
    /// Consider windows of hidden apps.
    #[serde(default)]
    pub include_hidden_apps: Option<bool>,
    /// Windowless app placement.
    #[serde(default)]
    pub show_windowless_apps: Option<String>,
    /// `[navigation.standard]` table.
    #[serde(default)]
    pub standard: Option<RawStandard>,
    /// Removed; presence is an error.
    #[serde(default)]
    pub policy: Option<toml::Value>,
    /// Renamed to `[navigation.standard]`; presence is an error.
    #[serde(default)]
    pub fixed_app_ring: Option<toml::Value>,
}

/// `[navigation.standard]`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawStandard {
    /// Bundle ids that lead the ring.
    #[serde(default)]
    pub pinned_apps: Option<Vec<String>>,
    /// Unpinned app placement.
    #[serde(default)]
    pub unpinned_apps: Option<String>,
    /// Window choice when entering an app.
    #[serde(default)]
    pub in_app_window: Option<String>,
    /// Ring grouping.
    #[serde(default)]
    pub grouping: Option<String>,
}

/// `[logging]`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawLogging {
    /// Log level name.
    #[serde(default)]
    pub level: Option<String>,
    /// Color mode name.
    #[serde(default)]
    pub color: Option<String>,
}

/// `[startup]`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawStartup {
    /// Register to launch at login.
    #[serde(default)]
    pub launch_on_login: Option<bool>,
}

/// `[hud]`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawHud {
    /// Show the HUD.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Render icons.
    #[serde(default)]
    pub show_icons: Option<bool>,
    /// HUD placement name.
    #[serde(default)]
    pub position: Option<String>,
}

impl RawConfig {
    /// Overlay the provided values onto the defaults.
    pub fn resolve(self) -> Result<Config, Error> {
        Ok(Config {
            hotkeys: self.hotkeys.unwrap_or_default().resolve(),
            navigation: self.navigation.unwrap_or_default().resolve()?,
            logging: self.logging.unwrap_or_default().resolve()?,
            startup: self.startup.unwrap_or_default().resolve(),
            hud: self.hud.unwrap_or_default().resolve()?,
        })
    }
}

impl RawHotkeys {
    /// Fill missing chords from the defaults.
    fn resolve(self) -> HotkeysConfig {
        let d = HotkeysConfig::default();
        HotkeysConfig {
            focus_left: self.focus_left.unwrap_or(d.focus_left),
            focus_right: self.focus_right.unwrap_or(d.focus_right),
            focus_up: self.focus_up.unwrap_or(d.focus_up),
            focus_down: self.focus_down.unwrap_or(d.focus_down),
        }
    }
}

impl RawNavigation {
    /// Reject legacy keys, then overlay onto the defaults.
    fn resolve(self) -> Result<NavigationConfig, Error> {
        if self.policy.is_some() {
            return Err(Error::validation(
                "navigation.policy",
                "navigation.policy has been removed; use navigation.mode = \"standard\" or \"mru-cycle\"",
            ));
        }
        if self.fixed_app_ring.is_some() {
            return Err(Error::validation(
                "navigation.fixed-app-ring",
                "[navigation.fixed-app-ring] has been renamed; move its settings to [navigation.standard]",
            ));
        }

        let d = NavigationConfig::default();
        let mode = match self.mode {
            Some(raw) => choice!(NavigationMode, "navigation.mode", raw)?,
            None => d.mode,
        };
        let cycle_timeout_ms = match self.cycle_timeout_ms {
            Some(ms) => u64::try_from(ms).map_err(|_| {
                Error::invalid_value(
                    "navigation.cycle-timeout-ms",
                    "non-negative integer",
                    &ms.to_string(),
                )
            })?,
            None => d.cycle_timeout_ms,
        };
        let show_windowless_apps = match self.show_windowless_apps {
            Some(raw) => choice!(ShowWindowlessApps, "navigation.show-windowless-apps", raw)?,
            None => d.show_windowless_apps,
        };
        let standard = match self.standard {
            Some(raw) => raw.resolve()?,
            None => d.standard,
        };
        if cycle_timeout_ms == 0 {
            debug!("cycle-timeout-ms is 0; navigation HUD stays open until modifier release");
        }
        Ok(NavigationConfig {
            mode,
            cycle_timeout_ms,
            include_minimized: self.include_minimized.unwrap_or(d.include_minimized),
            include_hidden_apps: self.include_hidden_apps.unwrap_or(d.include_hidden_apps),
            show_windowless_apps,
            standard,
        })
    }
}

impl RawStandard {
    /// Trim the pin list and parse the policy names.
    fn resolve(self) -> Result<StandardConfig, Error> {
        let d = StandardConfig::default();
        let pinned_apps = self
            .pinned_apps
            .unwrap_or(d.pinned_apps)
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Ok(StandardConfig {
            pinned_apps,
            unpinned_apps: match self.unpinned_apps {
                Some(raw) => choice!(UnpinnedApps, "navigation.standard.unpinned-apps", raw)?,
                None => d.unpinned_apps,
            },
            in_app_window: match self.in_app_window {
                Some(raw) => choice!(InAppWindow, "navigation.standard.in-app-window", raw)?,
                None => d.in_app_window,
            },
            grouping: match self.grouping {
                Some(raw) => choice!(Grouping, "navigation.standard.grouping", raw)?,
                None => d.grouping,
            },
        })
    }
}

impl RawLogging {
    /// Parse level and color names.
    fn resolve(self) -> Result<LoggingConfig, Error> {
        let d = LoggingConfig::default();
        Ok(LoggingConfig {
            level: match self.level {
                Some(raw) => choice!(LogLevel, "logging.level", raw)?,
                None => d.level,
            },
            color: match self.color {
                Some(raw) => choice!(ColorMode, "logging.color", raw)?,
                None => d.color,
            },
        })
    }
}

impl RawStartup {
    /// Overlay onto the defaults.
    fn resolve(self) -> StartupConfig {
        StartupConfig {
            launch_on_login: self
                .launch_on_login
                .unwrap_or(StartupConfig::default().launch_on_login),
        }
    }
}

impl RawHud {
    /// Overlay onto the defaults, parsing the position name.
    fn resolve(self) -> Result<HudConfig, Error> {
        let d = HudConfig::default();
        Ok(HudConfig {
            enabled: self.enabled.unwrap_or(d.enabled),
            show_icons: self.show_icons.unwrap_or(d.show_icons),
            position: match self.position {
                Some(raw) => choice!(HudPosition, "hud.position", raw)?,
                None => d.position,
            },
        })
    }
}

//! Resolved configuration values.

use serde::Serialize;

use crate::types::{
    ColorMode, Grouping, HudPosition, InAppWindow, LogLevel, NavigationMode, ShowWindowlessApps,
    UnpinnedApps,
};

/// Complete navigator configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Hotkey strings per action.
    pub hotkeys: HotkeysConfig,
    /// Navigation behaviour.
    pub navigation: NavigationConfig,
    /// Logging output.
    pub logging: LoggingConfig,
    /// Startup behaviour.
    pub startup: StartupConfig,
    /// HUD presentation.
    pub hud: HudConfig,
}

/// An action that can be bound to a hotkey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    /// Previous app.
    FocusLeft,
    /// Next app.
    FocusRight,
    /// Next window within the app.
    FocusUp,
    /// Previous window within the app.
    FocusDown,
}

impl HotkeyAction {
    /// Every action, in file order.
    pub const ALL: [Self; 4] = [
        Self::FocusLeft,
        Self::FocusRight,
        Self::FocusUp,
        Self::FocusDown,
    ];

    /// The key name inside `[hotkeys]`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::FocusLeft => "focus-left",
            Self::FocusRight => "focus-right",
            Self::FocusUp => "focus-up",
            Self::FocusDown => "focus-down",
        }
    }
}

/// Hotkey strings, one per action, e.g. `"cmd-left"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HotkeysConfig {
    /// Move to the previous app.
    pub focus_left: String,
    /// Move to the next app.
    pub focus_right: String,
    /// Cycle forward within the app.
    pub focus_up: String,
    /// Cycle backward within the app.
    pub focus_down: String,
}

impl HotkeysConfig {
    /// The hotkey string bound to `action`.
    pub fn get(&self, action: HotkeyAction) -> &str {
        match action {
            HotkeyAction::FocusLeft => &self.focus_left,
            HotkeyAction::FocusRight => &self.focus_right,
            HotkeyAction::FocusUp => &self.focus_up,
            HotkeyAction::FocusDown => &self.focus_down,
        }
    }
}

impl Default for HotkeysConfig {
    fn default() -> Self {
        Self {
            focus_left: "cmd-left".into(),
            focus_right: "cmd-right".into(),
            focus_up: "cmd-up".into(),
            focus_down: "cmd-down".into(),
        }
    }
}

/// Navigation behaviour shared by both flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NavigationConfig {
    /// Strategy for left/right cycling.
    pub mode: NavigationMode,
    /// HUD timeout and session reset window in milliseconds. Zero keeps the
    /// ring open until the modifiers are released.
    pub cycle_timeout_ms: u64,
    /// Include minimized windows.
    pub include_minimized: bool,
    /// Include windows of hidden apps.
    pub include_hidden_apps: bool,
    /// Treatment of windowless apps.
    pub show_windowless_apps: ShowWindowlessApps,
    /// App ring settings.
    pub standard: StandardConfig,
}

impl NavigationConfig {
    /// True when the navigation HUD stays up until modifier release.
    pub const fn holds_until_release(&self) -> bool {
        self.cycle_timeout_ms == 0
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            mode: NavigationMode::default(),
            cycle_timeout_ms: 900,
            include_minimized: true,
            include_hidden_apps: true,
            show_windowless_apps: ShowWindowlessApps::default(),
            standard: StandardConfig::default(),
        }
    }
}

/// App ring settings (`[navigation.standard]`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StandardConfig {
    /// Bundle ids that lead the ring, in this order.
    pub pinned_apps: Vec<String>,
    /// Ordering of the remaining apps.
    pub unpinned_apps: UnpinnedApps,
    /// Window choice when entering an app.
    pub in_app_window: InAppWindow,
    /// Grouping of windows into stops.
    pub grouping: Grouping,
}

/// Logging output settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Default level for our crates.
    pub level: LogLevel,
    /// ANSI color policy.
    pub color: ColorMode,
}

/// Startup settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StartupConfig {
    /// Register the app to launch at login.
    pub launch_on_login: bool,
}

/// HUD presentation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HudConfig {
    /// Show the HUD at all.
    pub enabled: bool,
    /// Render app icons.
    pub show_icons: bool,
    /// Vertical placement.
    pub position: HudPosition,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_icons: true,
            position: HudPosition::default(),
        }
    }
}

//! Configuration for the windnav navigator.
//!
//! The file lives at `~/.config/windnav/config.toml` by default. Keys are
//! kebab-case and grouped into `[hotkeys]`, `[navigation]`,
//! `[navigation.standard]`, `[logging]`, `[startup]` and `[hud]`. Unknown keys
//! are logged and skipped; invalid values and legacy keys are rejected with an [`Error`]
//! that renders a readable report via [`Error::pretty`].
#![warn(unsafe_op_in_unsafe_fn)]

use std::{
    env,
    path::{Path, PathBuf},
};

pub mod defaults;
mod error;
mod loader;
mod model;
mod raw;
mod types;
mod validate;

#[cfg(test)]
mod test_parse;

pub use error::{Error, excerpt_at};
pub use loader::{load_from_path, load_or_create, parse_str};
pub use model::{
    Config, HotkeyAction, HotkeysConfig, HudConfig, LoggingConfig, NavigationConfig,
    StandardConfig, StartupConfig,
};
pub use types::{
    ColorMode, Grouping, HudPosition, InAppWindow, LogLevel, NavigationMode, ShowWindowlessApps,
    UnpinnedApps,
};
pub use validate::validate_hotkeys;

/// Determine the user config path (`~/.config/windnav/config.toml`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".config");
    p.push("windnav");
    p.push("config.toml");
    p
}

/// Resolve the effective config path: `explicit` when provided, otherwise
/// [`default_config_path`].
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(default_config_path, Path::to_path_buf)
}

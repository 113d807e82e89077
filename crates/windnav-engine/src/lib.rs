//! windnav engine
//!
//! The engine turns hotkey direction events into focus changes:
//! - builds the app ring from a window snapshot ([`AppRingStateStore`])
//! - remembers the last focused window per app and monitor ([`AppFocusMemoryStore`])
//! - picks the target app and window and drives the HUD ([`HudController`])
//! - arbitrates between direct navigation and browse-with-commit-on-release
//!   sessions
//!
//! Everything stateful runs inside one task spawned by [`Navigator::spawn`];
//! [`Runtime`] wires configuration, hotkey registration and the navigator
//! together, and [`ConfigWatcher`] tells it when to reload.

mod browse;
mod context;
mod cycle;
mod deps;
mod error;
mod hud;
mod memory;
mod navigation;
mod navigator;
mod ring;
mod runtime;
mod select;
mod session;
mod watch;

pub mod test_support;

pub use context::Settings;
pub use cycle::{
    CycleSession, CycleSessionResolver, LogicalCycleNavigator, MruWindowOrderStore, ResetReason,
    Resolution,
};
pub use deps::Services;
pub use error::{Error, Result};
pub use hud::{CycleHudItem, CycleHudModel, HudController, build_hud_items, build_hud_model};
pub use memory::AppFocusMemoryStore;
pub use navigator::{Navigator, NavigatorHandle};
pub use ring::{AppRingGroup, AppRingGroupSeed, AppRingKey, AppRingStateStore, build_seeds};
pub use runtime::{Binding, HotkeyRegistrar, LaunchAtLogin, Runtime, bindings_from_config};
pub use select::{Selector, select_window, spatial_order, step_index, window_ordinal};
pub use session::{FlowKind, InputRouter, InputSession, Route};
pub use watch::{ConfigWatcher, RELOAD_DEBOUNCE};

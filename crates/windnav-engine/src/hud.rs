//! Display model for the cycle HUD and the controller boundary.

use config::HudConfig;
use serde::Serialize;
use tracing::info;
use windnav_world::{MonitorId, Pid, WindowId};

use crate::{ring::AppRingGroup, select::window_ordinal};

/// One ring slot as shown in the HUD.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CycleHudItem {
    /// Stable item identity (the ring key string).
    pub id: String,
    /// Text under the icon.
    pub label: String,
    /// Process used to look up the app icon.
    pub icon_pid: Pid,
    /// Bundle used to look up the app icon.
    pub icon_bundle_id: Option<String>,
    /// Slot comes from the pin list.
    pub is_pinned: bool,
    /// Slot is the current selection.
    pub is_current: bool,
    /// Number of candidate windows in the app.
    pub window_count: usize,
    /// Spatial index of the selected window, on the current item only.
    pub current_window_index: Option<usize>,
    /// App has no real windows.
    pub is_windowless_app: bool,
}

/// Immutable HUD contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CycleHudModel {
    /// Ring slots in order.
    pub items: Vec<CycleHudItem>,
    /// Index of the highlighted item; `None` previews the ring without selection.
    pub selected_index: Option<usize>,
    /// Monitor the HUD belongs on.
    pub monitor_id: MonitorId,
}

impl CycleHudModel {
    /// The highlighted item, if any.
    pub fn selected(&self) -> Option<&CycleHudItem> {
        self.selected_index.and_then(|i| self.items.get(i))
    }

    /// Item labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }
}

/// Renders the HUD. The core never reads HUD state back.
pub trait HudController: Send + Sync {
    /// Show `model`; a `timeout_ms` of zero keeps it up until [`hide`](Self::hide).
    fn show(&self, model: CycleHudModel, config: &HudConfig, timeout_ms: u64);

    /// Hide the HUD if shown.
    fn hide(&self);
}

/// Build HUD items for `groups`, marking `selected` as current.
pub fn build_hud_items(
    groups: &[AppRingGroup],
    selected: Option<usize>,
    selected_window: Option<WindowId>,
) -> Vec<CycleHudItem> {
    groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let is_current = selected == Some(i);
            let current_window_index = is_current.then(|| {
                selected_window
                    .and_then(|id| window_ordinal(g, id))
                    .unwrap_or_else(|| {
                        info!(app = %g.key, "selected window not in group; showing index 0");
                        0
                    })
            });
            CycleHudItem {
                id: g.key.as_str().to_string(),
                label: g.label.clone(),
                icon_pid: g.key.representative_pid(),
                icon_bundle_id: g.key.bundle_id().map(str::to_string),
                is_pinned: g.is_pinned,
                is_current,
                window_count: g.windows.len(),
                current_window_index,
                is_windowless_app: g.is_windowless(),
            }
        })
        .collect()
}

/// Build a complete model.
pub fn build_hud_model(
    groups: &[AppRingGroup],
    selected: Option<usize>,
    selected_window: Option<WindowId>,
    monitor: MonitorId,
) -> CycleHudModel {
    CycleHudModel {
        items: build_hud_items(groups, selected, selected_window),
        selected_index: selected,
        monitor_id: monitor,
    }
}

//! Per-app and per-(app, monitor) memory of the last focused window.

use std::collections::{HashMap, HashSet};

use config::InAppWindow;
use tracing::debug;
use windnav_world::{MonitorId, WindowId, WindowSnapshot};

use crate::ring::AppRingKey;

/// Remembers which window of each app was focused last.
///
/// Entries only ever reference windows from the most recent snapshot once
/// [`prune`](Self::prune) has run.
#[derive(Debug, Default)]
pub struct AppFocusMemoryStore {
    /// Last focused window per app, any monitor.
    by_app: HashMap<AppRingKey, WindowId>,
    /// Last focused window per app on each monitor.
    by_app_monitor: HashMap<(AppRingKey, MonitorId), WindowId>,
}

impl AppFocusMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `window` as the last focused window of its app, globally and on `monitor`.
    pub fn record_focused(&mut self, window: &WindowSnapshot, monitor: MonitorId) {
        let key = AppRingKey::for_window(window);
        self.by_app_monitor
            .insert((key.clone(), monitor), window.window_id);
        self.by_app.insert(key, window.window_id);
    }

    /// The remembered window for `key` under `policy`, if it is one of `candidates`.
    pub fn preferred_window_id(
        &self,
        key: &AppRingKey,
        candidates: &[WindowSnapshot],
        monitor: MonitorId,
        policy: InAppWindow,
    ) -> Option<WindowId> {
        let present = |id: &WindowId| candidates.iter().any(|w| w.window_id == *id);
        let global = || self.by_app.get(key).copied().filter(present);
        match policy {
            InAppWindow::LastFocused => global(),
            InAppWindow::LastFocusedOnMonitor => self
                .by_app_monitor
                .get(&(key.clone(), monitor))
                .copied()
                .filter(present)
                .or_else(global),
            InAppWindow::Spatial => None,
        }
    }

    /// Drop entries whose app or window is absent from `snapshots`.
    pub fn prune(&mut self, snapshots: &[WindowSnapshot]) {
        let windows: HashSet<WindowId> = snapshots.iter().map(|w| w.window_id).collect();
        let keys: HashSet<AppRingKey> = snapshots.iter().map(AppRingKey::for_window).collect();
        let before = self.len();
        self.by_app
            .retain(|k, id| keys.contains(k) && windows.contains(id));
        self.by_app_monitor
            .retain(|(k, _), id| keys.contains(k) && windows.contains(id));
        let removed = before - self.len();
        if removed > 0 {
            debug!(removed, "pruned focus memory");
        }
    }

    /// Total number of entries across both maps.
    pub fn len(&self) -> usize {
        self.by_app.len() + self.by_app_monitor.len()
    }

    /// True when nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

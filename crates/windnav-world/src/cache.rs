//! Snapshot cache in front of the window provider.

use std::{collections::HashSet, sync::Arc};

use tracing::{debug, info, warn};

use crate::{WindowProvider, WindowSnapshot};

/// Holds the latest window snapshot list.
///
/// The cache is owned by a single coordinating task; it is not shared.
pub struct WindowStateCache {
    /// Source of fresh snapshots.
    provider: Arc<dyn WindowProvider>,
    /// Last successful snapshot.
    snapshot: Vec<WindowSnapshot>,
}

impl WindowStateCache {
    /// Create an empty cache over `provider`.
    pub fn new(provider: Arc<dyn WindowProvider>) -> Self {
        Self {
            provider,
            snapshot: Vec::new(),
        }
    }

    /// Re-pull the snapshot from the provider.
    ///
    /// On provider failure the previous snapshot is retained and the failure
    /// is logged; callers proceed with stale data.
    pub async fn refresh(&mut self) {
        match self.provider.current_snapshot().await {
            Ok(windows) => {
                let windows = dedup_window_ids(windows);
                if windows.len() != self.snapshot.len() {
                    info!(
                        previous = self.snapshot.len(),
                        current = windows.len(),
                        "window count changed"
                    );
                } else {
                    debug!(count = windows.len(), "window snapshot refreshed");
                }
                self.snapshot = windows;
            }
            Err(e) => {
                warn!(
                    error = %e,
                    kept = self.snapshot.len(),
                    "window refresh failed; keeping previous snapshot"
                );
            }
        }
    }

    /// Refresh, then return the resulting snapshot.
    pub async fn refresh_and_get_snapshot(&mut self) -> Vec<WindowSnapshot> {
        self.refresh().await;
        self.snapshot.clone()
    }

    /// Last-known snapshot, without refreshing.
    pub fn snapshot(&self) -> &[WindowSnapshot] {
        &self.snapshot
    }
}

/// Drop later entries that reuse a window id already seen in this list.
fn dedup_window_ids(windows: Vec<WindowSnapshot>) -> Vec<WindowSnapshot> {
    let mut seen = HashSet::with_capacity(windows.len());
    let before = windows.len();
    let out: Vec<WindowSnapshot> = windows
        .into_iter()
        .filter(|w| seen.insert(w.window_id))
        .collect();
    if out.len() != before {
        warn!(
            dropped = before - out.len(),
            "provider reported duplicate window ids"
        );
    }
    out
}

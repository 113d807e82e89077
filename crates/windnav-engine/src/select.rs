//! Window selection within an app group and ring stepping.

use config::InAppWindow;
use windnav_world::{Direction, MonitorId, ScreenLocator, WindowId, WindowSnapshot};

use crate::{memory::AppFocusMemoryStore, ring::AppRingGroup};

/// Windows sorted by `(min_x, min_y, window_id)`: left to right, then top to
/// bottom, independent of enumeration order.
pub fn spatial_order(windows: &[WindowSnapshot]) -> Vec<&WindowSnapshot> {
    let mut out: Vec<&WindowSnapshot> = windows.iter().collect();
    out.sort_by(|a, b| {
        a.frame
            .min_x()
            .total_cmp(&b.frame.min_x())
            .then_with(|| a.frame.min_y().total_cmp(&b.frame.min_y()))
            .then_with(|| a.window_id.cmp(&b.window_id))
    });
    out
}

/// Step `current` one place forward or backward in a ring of `len`, wrapping.
pub fn step_index(current: usize, len: usize, forward: bool) -> usize {
    debug_assert!(len > 0);
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

/// Position of `id` in the group's spatial order.
pub fn window_ordinal(group: &AppRingGroup, id: WindowId) -> Option<usize> {
    spatial_order(&group.windows)
        .iter()
        .position(|w| w.window_id == id)
}

/// Inputs to [`select_window`] that do not change per group.
pub struct Selector<'a> {
    /// Focus memory consulted for the preferred window.
    pub memory: &'a AppFocusMemoryStore,
    /// In-app window policy.
    pub policy: InAppWindow,
    /// Monitor lookup for the on-monitor preference.
    pub screens: &'a dyn ScreenLocator,
}

/// Choose the window to focus inside `group`.
///
/// `Up`/`Down` step from a base window (the focused window if it belongs to
/// the group, else the remembered one, else the first) through the spatial
/// order, forward for `Up`. `Left`/`Right` enter the app: the remembered
/// window, else the first window on `monitor`, else the first window.
pub fn select_window<'g>(
    selector: &Selector<'_>,
    group: &'g AppRingGroup,
    monitor: MonitorId,
    direction: Direction,
    focused: Option<WindowId>,
) -> Option<&'g WindowSnapshot> {
    let ordered = spatial_order(&group.windows);
    let first = *ordered.first()?;
    let preferred =
        selector
            .memory
            .preferred_window_id(&group.key, &group.windows, monitor, selector.policy);
    match direction {
        Direction::Up | Direction::Down => {
            if ordered.len() == 1 {
                return Some(first);
            }
            let base = focused
                .filter(|id| group.contains(*id))
                .or(preferred)
                .and_then(|id| ordered.iter().position(|w| w.window_id == id))
                .unwrap_or(0);
            let next = step_index(base, ordered.len(), direction == Direction::Up);
            Some(ordered[next])
        }
        Direction::Left | Direction::Right => {
            if let Some(w) = preferred.and_then(|id| ordered.iter().find(|w| w.window_id == id)) {
                return Some(w);
            }
            ordered
                .iter()
                .find(|w| selector.screens.monitor_of(w) == Some(monitor))
                .copied()
                .or(Some(first))
        }
    }
}

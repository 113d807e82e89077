//! Collaborator boundaries implemented by the platform layer.

use async_trait::async_trait;

use crate::{MonitorId, Pid, Point, Result, WindowId, WindowSnapshot};

/// Full live enumeration of eligible windows.
#[async_trait]
pub trait WindowProvider: Send + Sync {
    /// Enumerate the current windows. May fail; callers keep their previous snapshot.
    async fn current_snapshot(&self) -> Result<Vec<WindowSnapshot>>;
}

/// Source of the currently focused window.
#[async_trait]
pub trait FocusedWindowProvider: Send + Sync {
    /// The focused window id, or `None` when nothing has focus.
    async fn focused_window_id(&self) -> Option<WindowId>;
}

/// Applies OS-level focus changes.
#[async_trait]
pub trait FocusPerformer: Send + Sync {
    /// Bring `window`, owned by `pid`, to the front and focus it.
    async fn focus(&self, window: WindowId, pid: Pid) -> Result<()>;
}

/// Maps screen positions to monitors.
pub trait ScreenLocator: Send + Sync {
    /// The monitor whose frame contains `point`.
    fn monitor_containing(&self, point: Point) -> Option<MonitorId>;

    /// Current mouse pointer location, if known.
    fn pointer_location(&self) -> Option<Point>;

    /// The monitor a window lives on, decided by the centre of its frame.
    fn monitor_of(&self, window: &WindowSnapshot) -> Option<MonitorId> {
        self.monitor_containing(window.center())
    }
}

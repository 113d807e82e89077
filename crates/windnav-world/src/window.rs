//! Window snapshots.

use serde::{Deserialize, Serialize};

use crate::{Pid, Point, Rect, WindowId};

/// Immutable point-in-time description of one window.
///
/// Snapshots are produced wholesale on every refresh and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    /// Window identity, unique within one snapshot list.
    pub window_id: WindowId,
    /// Owning process.
    pub pid: Pid,
    /// Bundle identifier of the owning app, if it has one.
    pub bundle_id: Option<String>,
    /// Localized application name, if known.
    pub app_name: Option<String>,
    /// Window frame in global screen coordinates.
    pub frame: Rect,
    /// Window is minimized.
    pub is_minimized: bool,
    /// Owning application is hidden.
    pub owner_is_hidden: bool,
    /// Window title, if readable.
    pub title: Option<String>,
    /// Synthetic entry standing in for an app that has no windows.
    pub is_windowless_app_placeholder: bool,
}

impl WindowSnapshot {
    /// A visible, unminimized window with no bundle id or title.
    pub fn new(window_id: impl Into<WindowId>, pid: impl Into<Pid>, frame: Rect) -> Self {
        Self {
            window_id: window_id.into(),
            pid: pid.into(),
            bundle_id: None,
            app_name: None,
            frame,
            is_minimized: false,
            owner_is_hidden: false,
            title: None,
            is_windowless_app_placeholder: false,
        }
    }

    /// A placeholder entry for an app without windows.
    pub fn windowless_placeholder(
        window_id: impl Into<WindowId>,
        pid: impl Into<Pid>,
        frame: Rect,
    ) -> Self {
        Self {
            is_windowless_app_placeholder: true,
            ..Self::new(window_id, pid, frame)
        }
    }

    /// Set the bundle identifier.
    #[must_use]
    pub fn with_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.bundle_id = Some(bundle_id.into());
        self
    }

    /// Set the application name.
    #[must_use]
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Mark the window minimized.
    #[must_use]
    pub fn minimized(mut self) -> Self {
        self.is_minimized = true;
        self
    }

    /// Mark the owning app hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.owner_is_hidden = true;
        self
    }

    /// Centre of the window frame; monitor membership is decided by this point.
    pub fn center(&self) -> Point {
        self.frame.center()
    }
}

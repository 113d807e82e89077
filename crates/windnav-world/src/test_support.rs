//! Test doubles for the collaborator traits.
//!
//! These helpers are public so downstream crates can drive the navigator
//! without a platform layer; they are lightweight and hold no global state.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    Error, FocusPerformer, FocusedWindowProvider, Pid, Rect, Result, WindowId, WindowProvider,
    WindowSnapshot,
};

/// Build a 100x100 window at `(x, y)` owned by `pid`, with `bundle` as both
/// bundle id and app name.
pub fn window(id: u32, pid: i32, bundle: &str, x: f64, y: f64) -> WindowSnapshot {
    WindowSnapshot::new(id, pid, Rect::new(x, y, 100.0, 100.0))
        .with_bundle_id(bundle)
        .with_app_name(bundle)
}

/// A [`WindowProvider`] returning a settable list, optionally failing.
#[derive(Default)]
pub struct FakeWindowProvider {
    /// Windows returned on success.
    windows: Mutex<Vec<WindowSnapshot>>,
    /// When set, enumeration fails with this message.
    failure: Mutex<Option<String>>,
    /// Enumeration count.
    calls: AtomicUsize,
}

impl FakeWindowProvider {
    /// Create a provider that returns `windows`.
    pub fn new(windows: Vec<WindowSnapshot>) -> Arc<Self> {
        Arc::new(Self {
            windows: Mutex::new(windows),
            ..Self::default()
        })
    }

    /// Replace the returned windows.
    pub fn set_windows(&self, windows: Vec<WindowSnapshot>) {
        *self.windows.lock() = windows;
    }

    /// Make subsequent calls fail with `message`, or succeed again with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock() = message.map(str::to_string);
    }

    /// Number of enumeration calls observed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WindowProvider for FakeWindowProvider {
    async fn current_snapshot(&self) -> Result<Vec<WindowSnapshot>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.failure.lock().clone() {
            return Err(Error::Provider(msg));
        }
        Ok(self.windows.lock().clone())
    }
}

/// Focus state shared by the focused-window provider and focus performer
/// doubles. A successful `focus` call moves the reported focus, like the OS.
#[derive(Default)]
pub struct FakeFocus {
    /// Window reported as focused.
    focused: Mutex<Option<WindowId>>,
    /// Every focus request, in order.
    calls: Mutex<Vec<(WindowId, Pid)>>,
    /// Fail focus requests.
    fail: Mutex<bool>,
}

impl FakeFocus {
    /// Create with an initial focused window.
    pub fn new(focused: Option<u32>) -> Arc<Self> {
        Arc::new(Self {
            focused: Mutex::new(focused.map(WindowId::new)),
            ..Self::default()
        })
    }

    /// Override the reported focus.
    pub fn set_focused(&self, focused: Option<u32>) {
        *self.focused.lock() = focused.map(WindowId::new);
    }

    /// Make focus requests fail (or succeed again).
    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock() = fail;
    }

    /// All focus requests in order, including failed ones.
    pub fn calls(&self) -> Vec<(WindowId, Pid)> {
        self.calls.lock().clone()
    }

    /// Window ids of all focus requests in order.
    pub fn focused_ids(&self) -> Vec<u32> {
        self.calls.lock().iter().map(|(w, _)| w.get()).collect()
    }

    /// True if `id` was ever requested.
    pub fn calls_contains(&self, id: u32) -> bool {
        self.calls.lock().iter().any(|(w, _)| w.get() == id)
    }
}

#[async_trait]
impl FocusedWindowProvider for FakeFocus {
    async fn focused_window_id(&self) -> Option<WindowId> {
        *self.focused.lock()
    }
}

#[async_trait]
impl FocusPerformer for FakeFocus {
    async fn focus(&self, window: WindowId, pid: Pid) -> Result<()> {
        self.calls.lock().push((window, pid));
        if *self.fail.lock() {
            return Err(Error::Focus {
                window,
                pid,
                message: "refused".into(),
            });
        }
        *self.focused.lock() = Some(window);
        Ok(())
    }
}

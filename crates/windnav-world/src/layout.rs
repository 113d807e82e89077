//! Monitor geometry and pointer position.

use parking_lot::Mutex;

use crate::{MonitorId, Point, Rect, ScreenLocator};

/// One display and its frame in global coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Monitor {
    /// Display identifier.
    pub id: MonitorId,
    /// Display frame.
    pub frame: Rect,
}

/// A [`ScreenLocator`] backed by a list of display frames and a last-known
/// pointer position.
///
/// The platform layer updates it on display reconfiguration and mouse
/// movement; lookups never block on the OS.
#[derive(Debug, Default)]
pub struct MonitorLayout {
    /// Displays in platform order.
    monitors: Mutex<Vec<Monitor>>,
    /// Last known pointer position.
    pointer: Mutex<Option<Point>>,
}

impl MonitorLayout {
    /// Create a layout from display frames.
    pub fn new(monitors: Vec<Monitor>) -> Self {
        Self {
            monitors: Mutex::new(monitors),
            pointer: Mutex::new(None),
        }
    }

    /// Convenience: a single display with id 1.
    pub fn single(frame: Rect) -> Self {
        Self::new(vec![Monitor {
            id: MonitorId::new(1),
            frame,
        }])
    }

    /// Replace the display list.
    pub fn set_monitors(&self, monitors: Vec<Monitor>) {
        *self.monitors.lock() = monitors;
    }

    /// Record the pointer position.
    pub fn set_pointer(&self, pointer: Option<Point>) {
        *self.pointer.lock() = pointer;
    }

    /// Current display list.
    pub fn monitors(&self) -> Vec<Monitor> {
        self.monitors.lock().clone()
    }
}

impl ScreenLocator for MonitorLayout {
    fn monitor_containing(&self, point: Point) -> Option<MonitorId> {
        self.monitors
            .lock()
            .iter()
            .find(|m| m.frame.contains(point))
            .map(|m| m.id)
    }

    fn pointer_location(&self) -> Option<Point> {
        *self.pointer.lock()
    }
}

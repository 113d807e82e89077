//! Collaborator bundle handed to the navigator.

use std::sync::Arc;

use windnav_world::{FocusPerformer, FocusedWindowProvider, ScreenLocator, WindowProvider};

use crate::hud::HudController;

/// Collaborators the navigator drives. Production builds wire the platform
/// layer; tests wire the doubles from [`crate::test_support`].
#[derive(Clone)]
pub struct Services {
    /// Window enumeration.
    pub windows: Arc<dyn WindowProvider>,
    /// Current OS focus.
    pub focused: Arc<dyn FocusedWindowProvider>,
    /// OS focus changes.
    pub focus: Arc<dyn FocusPerformer>,
    /// Monitor and pointer lookup.
    pub screens: Arc<dyn ScreenLocator>,
    /// HUD rendering.
    pub hud: Arc<dyn HudController>,
}

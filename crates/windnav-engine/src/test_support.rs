//! Test doubles for the engine's collaborators and a ready-wired harness.

use std::sync::Arc;

use config::{HudConfig, NavigationConfig};
use parking_lot::Mutex;
use windnav_keys::{Modifier, ModifierSet};
use windnav_world::{
    Direction, MonitorLayout, Rect, WindowSnapshot,
    test_support::{FakeFocus, FakeWindowProvider},
};

use crate::{
    Binding, CycleHudModel, Error, HotkeyRegistrar, HudController, LaunchAtLogin, Navigator,
    NavigatorHandle, Result, Services, Settings,
};

/// A recorded HUD call.
#[derive(Clone, Debug, PartialEq)]
pub enum HudEvent {
    /// `show(model, _, timeout_ms)`.
    Show {
        /// Model shown.
        model: CycleHudModel,
        /// Requested timeout.
        timeout_ms: u64,
    },
    /// `hide()`.
    Hide,
}

/// A [`HudController`] that records every call.
#[derive(Default)]
pub struct RecordingHud {
    /// Calls in order.
    events: Mutex<Vec<HudEvent>>,
}

impl RecordingHud {
    /// Create an empty recorder.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All calls in order.
    pub fn events(&self) -> Vec<HudEvent> {
        self.events.lock().clone()
    }

    /// Models passed to `show`, in order.
    pub fn shows(&self) -> Vec<CycleHudModel> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                HudEvent::Show { model, .. } => Some(model.clone()),
                HudEvent::Hide => None,
            })
            .collect()
    }

    /// The most recent model shown.
    pub fn last_model(&self) -> Option<CycleHudModel> {
        self.shows().pop()
    }

    /// The timeout of the most recent show.
    pub fn last_timeout(&self) -> Option<u64> {
        self.events.lock().iter().rev().find_map(|e| match e {
            HudEvent::Show { timeout_ms, .. } => Some(*timeout_ms),
            HudEvent::Hide => None,
        })
    }

    /// Number of `hide` calls.
    pub fn hides(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, HudEvent::Hide))
            .count()
    }

    /// Forget recorded calls.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl HudController for RecordingHud {
    fn show(&self, model: CycleHudModel, _config: &HudConfig, timeout_ms: u64) {
        self.events.lock().push(HudEvent::Show { model, timeout_ms });
    }

    fn hide(&self) {
        self.events.lock().push(HudEvent::Hide);
    }
}

/// A [`HotkeyRegistrar`] that records the registered set.
#[derive(Default)]
pub struct RecordingRegistrar {
    /// The registered set.
    registered: Mutex<Vec<Binding>>,
    /// Refuse registrations.
    fail: Mutex<bool>,
}

impl RecordingRegistrar {
    /// Create an empty recorder.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Currently registered bindings.
    pub fn registered(&self) -> Vec<Binding> {
        self.registered.lock().clone()
    }

    /// Make subsequent registrations fail.
    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock() = fail;
    }
}

impl HotkeyRegistrar for RecordingRegistrar {
    fn register(&self, bindings: &[Binding]) -> Result<()> {
        if *self.fail.lock() {
            return Err(Error::Registrar("refused".into()));
        }
        self.registered.lock().extend_from_slice(bindings);
        Ok(())
    }

    fn unregister_all(&self) {
        self.registered.lock().clear();
    }
}

/// A [`LaunchAtLogin`] that records the requested state.
#[derive(Default)]
pub struct RecordingLaunchAtLogin {
    /// Requested states in order.
    calls: Mutex<Vec<bool>>,
}

impl RecordingLaunchAtLogin {
    /// Create an empty recorder.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every requested state, in order.
    pub fn calls(&self) -> Vec<bool> {
        self.calls.lock().clone()
    }
}

impl LaunchAtLogin for RecordingLaunchAtLogin {
    fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.calls.lock().push(enabled);
        Ok(())
    }
}

/// The `cmd` modifier alone.
pub fn cmd() -> ModifierSet {
    ModifierSet::EMPTY.with(Modifier::Command)
}

/// A navigator wired to fakes: one 1440x900 monitor with id 1.
pub struct Harness {
    /// Window enumeration double.
    pub windows: Arc<FakeWindowProvider>,
    /// Focus double.
    pub focus: Arc<FakeFocus>,
    /// Monitor layout.
    pub layout: Arc<MonitorLayout>,
    /// HUD double.
    pub hud: Arc<RecordingHud>,
    /// The navigator under test.
    pub navigator: NavigatorHandle,
}

impl Harness {
    /// Spawn with default settings.
    pub fn new(windows: Vec<WindowSnapshot>, focused: Option<u32>) -> Self {
        Self::with_settings(windows, focused, Settings::default())
    }

    /// Spawn with the given navigation settings and a default HUD.
    pub fn with_navigation(
        windows: Vec<WindowSnapshot>,
        focused: Option<u32>,
        navigation: NavigationConfig,
    ) -> Self {
        Self::with_settings(
            windows,
            focused,
            Settings {
                navigation,
                ..Settings::default()
            },
        )
    }

    /// Spawn with full settings.
    pub fn with_settings(
        windows: Vec<WindowSnapshot>,
        focused: Option<u32>,
        settings: Settings,
    ) -> Self {
        let windows = FakeWindowProvider::new(windows);
        let focus = FakeFocus::new(focused);
        let layout = Arc::new(MonitorLayout::single(Rect::new(0.0, 0.0, 1440.0, 900.0)));
        let hud = RecordingHud::new();
        let services = Services {
            windows: windows.clone(),
            focused: focus.clone(),
            focus: focus.clone(),
            screens: layout.clone(),
            hud: hud.clone(),
        };
        Self {
            navigator: Navigator::spawn(services, settings),
            windows,
            focus,
            layout,
            hud,
        }
    }

    /// Collaborators for a second navigator or a [`crate::Runtime`].
    pub fn services(&self) -> Services {
        Services {
            windows: self.windows.clone(),
            focused: self.focus.clone(),
            focus: self.focus.clone(),
            screens: self.layout.clone(),
            hud: self.hud.clone(),
        }
    }

    /// Send a direction with `cmd` held and wait for it to finish.
    pub async fn press(&self, direction: Direction) {
        self.press_with(direction, cmd()).await;
    }

    /// Send a direction with `held` modifiers and wait for it to finish.
    pub async fn press_with(&self, direction: Direction, held: ModifierSet) {
        self.navigator
            .direction(direction, held)
            .expect("navigator running");
        self.navigator.flush().await.expect("flush");
    }

    /// Release every modifier and wait for the resulting commit.
    pub async fn release(&self) {
        self.navigator
            .modifiers_changed(ModifierSet::EMPTY)
            .expect("navigator running");
        self.navigator.flush().await.expect("flush");
    }
}

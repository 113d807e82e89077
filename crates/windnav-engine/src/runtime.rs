//! Applies configuration to the hotkey registrar, launch-at-login and the
//! navigator, and forwards OS input events.

use std::{path::Path, sync::Arc};

use config::{Config, HotkeyAction, load_from_path, validate_hotkeys};
use tracing::{error, info, warn};
use windnav_keys::{Chord, ModifierSet, modifiers_from_flags};
use windnav_world::Direction;

use crate::{
    Error, Result,
    context::Settings,
    deps::Services,
    navigator::{Navigator, NavigatorHandle},
};

/// One registered hotkey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    /// Direction the hotkey delivers.
    pub direction: Direction,
    /// Key chord registered with the OS.
    pub chord: Chord,
}

/// OS global hotkey registration.
pub trait HotkeyRegistrar: Send + Sync {
    /// Register `bindings` alongside any already registered.
    fn register(&self, bindings: &[Binding]) -> Result<()>;

    /// Remove every registered hotkey.
    fn unregister_all(&self);
}

/// Launch-at-login registration.
pub trait LaunchAtLogin: Send + Sync {
    /// Enable or disable launching at login.
    fn set_enabled(&self, enabled: bool) -> Result<()>;
}

/// Direction delivered by a hotkey action.
const fn direction_for(action: HotkeyAction) -> Direction {
    match action {
        HotkeyAction::FocusLeft => Direction::Left,
        HotkeyAction::FocusRight => Direction::Right,
        HotkeyAction::FocusUp => Direction::Up,
        HotkeyAction::FocusDown => Direction::Down,
    }
}

/// Validate the hotkeys in `config` and map them to bindings.
pub fn bindings_from_config(config: &Config) -> Result<Vec<Binding>> {
    Ok(validate_hotkeys(&config.hotkeys)?
        .into_iter()
        .map(|(action, chord)| Binding {
            direction: direction_for(action),
            chord,
        })
        .collect())
}

/// Navigator settings carried by `config`.
fn settings_from_config(config: &Config) -> Settings {
    Settings {
        navigation: config.navigation.clone(),
        hud: config.hud,
    }
}

/// The running navigator with its OS-facing collaborators.
pub struct Runtime {
    /// The navigator task.
    navigator: NavigatorHandle,
    /// OS hotkey registration.
    registrar: Arc<dyn HotkeyRegistrar>,
    /// Launch-at-login registration.
    login: Arc<dyn LaunchAtLogin>,
    /// Bindings currently registered.
    bindings: Vec<Binding>,
}

impl Runtime {
    /// Validate `config`, spawn the navigator and register hotkeys.
    ///
    /// An invalid configuration fails before anything is spawned or registered.
    pub fn start(
        services: Services,
        registrar: Arc<dyn HotkeyRegistrar>,
        login: Arc<dyn LaunchAtLogin>,
        config: &Config,
    ) -> Result<Self> {
        bindings_from_config(config)?;
        let navigator = Navigator::spawn(services, settings_from_config(config));
        let mut runtime = Self {
            navigator,
            registrar,
            login,
            bindings: Vec::new(),
        };
        runtime.apply_config(config)?;
        Ok(runtime)
    }

    /// Apply a new configuration. On error the previous bindings and
    /// settings stay in effect.
    pub fn apply_config(&mut self, config: &Config) -> Result<()> {
        let bindings = bindings_from_config(config)?;
        self.registrar.unregister_all();
        if let Err(e) = self.registrar.register(&bindings) {
            warn!(error = %e, "registering hotkeys failed; restoring previous set");
            if let Err(e) = self.registrar.register(&self.bindings) {
                warn!(error = %e, "restoring previous hotkeys failed");
            }
            return Err(e);
        }
        self.bindings = bindings;
        self.navigator
            .update_settings(settings_from_config(config))?;
        if let Err(e) = self.login.set_enabled(config.startup.launch_on_login) {
            warn!(error = %e, "launch-at-login update failed");
        }
        info!(bindings = self.bindings.len(), "configuration applied");
        Ok(())
    }

    /// Reload the config file at `path` and apply it.
    ///
    /// Failures are logged and returned; the previous configuration stays in
    /// effect.
    pub fn reload(&mut self, path: &Path) -> Result<()> {
        let applied = load_from_path(path)
            .map_err(Error::from)
            .and_then(|config| self.apply_config(&config));
        match &applied {
            Ok(()) => info!(path = %path.display(), "configuration reloaded"),
            Err(e) => error!(
                path = %path.display(),
                error = %e,
                "reload failed; keeping previous configuration"
            ),
        }
        applied
    }

    /// A registered hotkey fired while `held` modifiers were down.
    pub fn handle_hotkey(&self, direction: Direction, held: ModifierSet) -> Result<()> {
        self.navigator.direction(direction, held)
    }

    /// Platform modifier flags changed.
    pub fn handle_modifier_flags_changed(&self, flags: u64) -> Result<()> {
        self.navigator.modifiers_changed(modifiers_from_flags(flags))
    }

    /// Currently registered bindings.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// The navigator handle.
    pub fn navigator(&self) -> &NavigatorHandle {
        &self.navigator
    }
}

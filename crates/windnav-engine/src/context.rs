//! State shared by the navigation and browse flows.
//!
//! [`NavContext`] owns the snapshot cache and every memory store. It is
//! confined to the navigator task, so nothing here locks.

use std::collections::HashSet;

use config::{HudConfig, NavigationConfig};
use tracing::{debug, error, info};
use windnav_world::{
    Direction, MonitorId, ScreenLocator, WindowId, WindowSnapshot, WindowStateCache,
};

use crate::{
    cycle::MruWindowOrderStore,
    deps::Services,
    hud::build_hud_model,
    memory::AppFocusMemoryStore,
    ring::{AppRingGroup, AppRingKey, AppRingStateStore, build_seeds},
    select::{self, Selector},
};

/// Configuration the navigator acts on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    /// Navigation behaviour.
    pub navigation: NavigationConfig,
    /// HUD presentation.
    pub hud: HudConfig,
}

/// The focused window resolved against a fresh snapshot.
#[derive(Clone, Debug)]
pub struct FocusedContext {
    /// The focused window.
    pub focused: WindowSnapshot,
    /// Monitor under its centre.
    pub monitor: MonitorId,
}

/// Why no focused window could be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusMiss {
    /// The OS reports no focused window.
    NoFocusedWindow,
    /// The focused window is not among the candidates.
    NotInSnapshot(WindowId),
    /// The focused window is not on any monitor.
    OffScreen(WindowId),
}

/// Navigator-task state shared by both flows.
pub struct NavContext {
    /// Collaborators.
    services: Services,
    /// Latest window snapshot.
    cache: WindowStateCache,
    /// Per-monitor ring order.
    rings: AppRingStateStore,
    /// Last focused window per app.
    memory: AppFocusMemoryStore,
    /// Global window recency.
    mru: MruWindowOrderStore,
    /// Settings in effect.
    settings: Settings,
}

impl NavContext {
    /// Empty stores over `services`.
    pub fn new(services: Services, settings: Settings) -> Self {
        Self {
            cache: WindowStateCache::new(services.windows.clone()),
            services,
            rings: AppRingStateStore::new(),
            memory: AppFocusMemoryStore::new(),
            mru: MruWindowOrderStore::new(),
            settings,
        }
    }

    /// Settings in effect.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Monitor lookup.
    pub fn screens(&self) -> &dyn ScreenLocator {
        self.services.screens.as_ref()
    }

    /// Global window recency.
    pub fn mru_mut(&mut self) -> &mut MruWindowOrderStore {
        &mut self.mru
    }

    /// Refresh the snapshot, prune memory, and return the filtered candidates.
    pub async fn refresh(&mut self) -> Vec<WindowSnapshot> {
        let all = self.cache.refresh_and_get_snapshot().await;
        self.memory.prune(&all);
        let ids: Vec<WindowId> = all.iter().map(|w| w.window_id).collect();
        self.mru.sync_visible(&ids);
        let nav = &self.settings.navigation;
        let candidates: Vec<WindowSnapshot> = all
            .into_iter()
            .filter(|w| nav.include_minimized || !w.is_minimized)
            .filter(|w| nav.include_hidden_apps || !w.owner_is_hidden)
            .collect();
        debug!(candidates = candidates.len(), "candidates refreshed");
        candidates
    }

    /// Resolve the focused window within `candidates`.
    pub async fn focused_context(
        &self,
        candidates: &[WindowSnapshot],
    ) -> Result<FocusedContext, FocusMiss> {
        let id = self
            .services
            .focused
            .focused_window_id()
            .await
            .ok_or(FocusMiss::NoFocusedWindow)?;
        let focused = candidates
            .iter()
            .find(|w| w.window_id == id)
            .ok_or(FocusMiss::NotInSnapshot(id))?;
        let monitor = self
            .screens()
            .monitor_of(focused)
            .ok_or(FocusMiss::OffScreen(id))?;
        Ok(FocusedContext {
            focused: focused.clone(),
            monitor,
        })
    }

    /// Monitor to use with no resolvable focus: the pointer's, else the
    /// first candidate's.
    pub fn no_focus_monitor(&self, candidates: &[WindowSnapshot]) -> Option<MonitorId> {
        let screens = self.screens();
        screens
            .pointer_location()
            .and_then(|p| screens.monitor_containing(p))
            .or_else(|| candidates.iter().find_map(|w| screens.monitor_of(w)))
    }

    /// Ordered app ring for a monitor.
    ///
    /// Apps qualify when they have a candidate on the monitor; their groups
    /// hold all their candidates. With no qualifying app every app qualifies.
    pub fn groups_for_monitor(
        &mut self,
        candidates: &[WindowSnapshot],
        preferred: Option<MonitorId>,
    ) -> (MonitorId, Vec<AppRingGroup>) {
        let screens = self.services.screens.clone();
        let monitor = preferred
            .or_else(|| candidates.iter().find_map(|w| screens.monitor_of(w)))
            .unwrap_or_default();
        let on_monitor: HashSet<AppRingKey> = candidates
            .iter()
            .filter(|w| screens.monitor_of(w) == Some(monitor))
            .map(AppRingKey::for_window)
            .collect();
        let mut seeds = build_seeds(candidates);
        if !on_monitor.is_empty() {
            seeds.retain(|s| on_monitor.contains(&s.key));
        }
        let nav = &self.settings.navigation;
        let groups =
            self.rings
                .ordered_groups(seeds, monitor, &nav.standard, nav.show_windowless_apps);
        (monitor, groups)
    }

    /// Pick the window to focus inside `group`.
    pub fn select_window<'g>(
        &self,
        group: &'g AppRingGroup,
        monitor: MonitorId,
        direction: Direction,
        focused: Option<WindowId>,
    ) -> Option<&'g WindowSnapshot> {
        let selector = Selector {
            memory: &self.memory,
            policy: self.settings.navigation.standard.in_app_window,
            screens: self.screens(),
        };
        select::select_window(&selector, group, monitor, direction, focused)
    }

    /// Show the ring, unless the HUD is disabled.
    pub fn show_hud(
        &self,
        groups: &[AppRingGroup],
        selected: Option<usize>,
        selected_window: Option<WindowId>,
        monitor: MonitorId,
        timeout_ms: u64,
    ) {
        let hud = &self.settings.hud;
        if !hud.enabled {
            debug!("hud disabled; not showing");
            return;
        }
        let model = build_hud_model(groups, selected, selected_window, monitor);
        self.services.hud.show(model, hud, timeout_ms);
    }

    /// Hide the HUD.
    pub fn hide_hud(&self) {
        self.services.hud.hide();
    }

    /// Ask the OS to focus `target`. On success the window becomes the
    /// remembered one for its app and the most recent in MRU order.
    pub async fn focus(&mut self, target: &WindowSnapshot, monitor: MonitorId) -> bool {
        match self
            .services
            .focus
            .focus(target.window_id, target.pid)
            .await
        {
            Ok(()) => {
                self.memory.record_focused(target, monitor);
                self.mru.promote(target.window_id);
                info!(window = %target.window_id, pid = %target.pid, "focused");
                true
            }
            Err(e) => {
                error!(window = %target.window_id, error = %e, "focus failed");
                false
            }
        }
    }

    /// Remember `window` as focused on `monitor`.
    pub fn record_focused(&mut self, window: &WindowSnapshot, monitor: MonitorId) {
        self.memory.record_focused(window, monitor);
        self.mru.promote(window.window_id);
    }

    /// Record the currently focused window against the cached snapshot,
    /// without refreshing.
    pub async fn record_current_focus(&mut self) {
        let Some(id) = self.services.focused.focused_window_id().await else {
            return;
        };
        let Some(window) = self
            .cache
            .snapshot()
            .iter()
            .find(|w| w.window_id == id)
            .cloned()
        else {
            debug!(window = %id, "focused window not cached; not recorded");
            return;
        };
        if let Some(monitor) = self.screens().monitor_of(&window) {
            self.record_focused(&window, monitor);
        }
    }
}

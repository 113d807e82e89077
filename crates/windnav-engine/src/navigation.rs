//! The direct navigation flow: every direction event commits focus at once.

use std::collections::BTreeSet;

use config::NavigationMode;
use tokio::time::Instant;
use tracing::{debug, info};
use windnav_world::{Direction, MonitorId, WindowId, WindowSnapshot};

use crate::{
    context::{FocusedContext, NavContext},
    cycle::{CycleSession, CycleSessionResolver, LogicalCycleNavigator},
    ring::{AppRingGroup, AppRingKey},
    select::step_index,
};

/// Handles direction events that focus immediately.
#[derive(Debug, Default)]
pub struct NavigationFlow {
    /// Frozen MRU order, while it lasts.
    cycle: Option<CycleSession>,
}

impl NavigationFlow {
    /// A flow with no frozen order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the frozen MRU order.
    pub fn end_session(&mut self) {
        self.cycle = None;
    }

    /// Process one direction event to completion.
    pub async fn handle(&mut self, ctx: &mut NavContext, direction: Direction) {
        let candidates = ctx.refresh().await;
        if candidates.is_empty() {
            info!(%direction, "no candidate windows; nothing to navigate");
            ctx.hide_hud();
            return;
        }
        match ctx.focused_context(&candidates).await {
            Ok(fc) => {
                ctx.record_focused(&fc.focused, fc.monitor);
                let mode = ctx.settings().navigation.mode;
                match (mode, direction.is_horizontal()) {
                    (NavigationMode::MruCycle, true) => {
                        self.mru_step(ctx, &candidates, &fc, direction).await;
                    }
                    _ => ring_step(ctx, &candidates, &fc, direction).await,
                }
            }
            Err(miss) => {
                info!(?miss, %direction, "no resolvable focus; navigating from ring edge");
                no_focus_step(ctx, &candidates, direction).await;
            }
        }
    }

    /// Move through the frozen MRU order on the focused monitor.
    async fn mru_step(
        &mut self,
        ctx: &mut NavContext,
        candidates: &[WindowSnapshot],
        fc: &FocusedContext,
        direction: Direction,
    ) {
        let allowed: BTreeSet<WindowId> = candidates
            .iter()
            .filter(|w| ctx.screens().monitor_of(w) == Some(fc.monitor))
            .map(|w| w.window_id)
            .collect();
        let fresh = ctx.mru_mut().ordered_ids(&allowed);
        let timeout_ms = ctx.settings().navigation.cycle_timeout_ms;
        let resolution = CycleSessionResolver::resolve(
            self.cycle.as_ref(),
            fc.monitor,
            allowed,
            Instant::now(),
            timeout_ms,
            fresh,
        );
        debug!(
            reused = resolution.reused,
            size = resolution.ordered_ids.len(),
            "mru order resolved"
        );
        let ordered = resolution.ordered_ids.clone();
        self.cycle = Some(resolution.session);

        let Some(target_id) =
            LogicalCycleNavigator::target(&ordered, fc.focused.window_id, direction)
        else {
            info!(%direction, "no other window to cycle to");
            return;
        };
        let Some(target) = candidates.iter().find(|w| w.window_id == target_id).cloned() else {
            info!(window = %target_id, "cycle target vanished");
            return;
        };
        let (monitor, groups) = ctx.groups_for_monitor(candidates, Some(fc.monitor));
        let key = AppRingKey::for_window(&target);
        let selected = groups.iter().position(|g| g.key == key);
        ctx.show_hud(&groups, selected, Some(target_id), monitor, timeout_ms);
        ctx.focus(&target, monitor).await;
    }
}

/// Step the app ring (left/right) or the focused app's windows (up/down).
async fn ring_step(
    ctx: &mut NavContext,
    candidates: &[WindowSnapshot],
    fc: &FocusedContext,
    direction: Direction,
) {
    let (monitor, groups) = ctx.groups_for_monitor(candidates, Some(fc.monitor));
    let key = AppRingKey::for_window(&fc.focused);
    let Some(current) = groups.iter().position(|g| g.key == key) else {
        info!(app = %key, "focused app not in ring");
        return;
    };
    let focused_id = fc.focused.window_id;
    let timeout_ms = ctx.settings().navigation.cycle_timeout_ms;

    if direction.is_horizontal() {
        if groups.len() == 1 {
            info!(%direction, "single app in ring; nothing to switch to");
            ctx.show_hud(&groups, Some(current), Some(focused_id), monitor, timeout_ms);
            return;
        }
        let next = step_index(current, groups.len(), direction == Direction::Right);
        commit(ctx, &groups, next, monitor, direction).await;
    } else {
        let group = &groups[current];
        let Some(target) = ctx
            .select_window(group, monitor, direction, Some(focused_id))
            .cloned()
        else {
            info!(app = %key, "focused app has no windows");
            return;
        };
        ctx.show_hud(&groups, Some(current), Some(target.window_id), monitor, timeout_ms);
        if target.window_id == focused_id {
            debug!(window = %focused_id, "only window of app; focus unchanged");
            return;
        }
        ctx.focus(&target, monitor).await;
    }
}

/// Navigation with no focused window: right enters the first app, left the
/// last; up/down preview the ring without selecting.
async fn no_focus_step(ctx: &mut NavContext, candidates: &[WindowSnapshot], direction: Direction) {
    let preferred = ctx.no_focus_monitor(candidates);
    let (monitor, groups) = ctx.groups_for_monitor(candidates, preferred);
    if groups.is_empty() {
        info!(monitor = %monitor, "app ring empty");
        return;
    }
    let index = match direction {
        Direction::Right => 0,
        Direction::Left => groups.len() - 1,
        Direction::Up | Direction::Down => {
            let timeout_ms = ctx.settings().navigation.cycle_timeout_ms;
            ctx.show_hud(&groups, None, None, monitor, timeout_ms);
            return;
        }
    };
    commit(ctx, &groups, index, monitor, direction).await;
}

/// Select `groups[index]`, show it, and focus its chosen window.
async fn commit(
    ctx: &mut NavContext,
    groups: &[AppRingGroup],
    index: usize,
    monitor: MonitorId,
    direction: Direction,
) {
    let Some(group) = groups.get(index) else {
        info!(index, len = groups.len(), "selection out of range");
        return;
    };
    let Some(target) = ctx
        .select_window(group, monitor, direction, None)
        .cloned()
    else {
        info!(app = %group.key, "app has no windows");
        return;
    };
    let timeout_ms = ctx.settings().navigation.cycle_timeout_ms;
    ctx.show_hud(groups, Some(index), Some(target.window_id), monitor, timeout_ms);
    ctx.focus(&target, monitor).await;
}

//! The browse flow: direction events move a highlight through the ring and
//! focus is applied once, when the modifiers are released.

use tracing::{debug, info};
use windnav_world::{Direction, MonitorId, WindowId};

use crate::{
    context::NavContext,
    ring::{AppRingGroup, AppRingKey},
    select::step_index,
};

/// The HUD stays up until the session commits or is cancelled.
const BROWSE_HUD_TIMEOUT_MS: u64 = 0;

/// Ring captured when browsing started, plus the moving highlight.
#[derive(Debug)]
struct BrowseSession {
    /// Monitor the ring was built for.
    monitor: MonitorId,
    /// Ring frozen at session start.
    groups: Vec<AppRingGroup>,
    /// App focused when browsing started.
    focused_app: Option<AppRingKey>,
    /// Highlighted slot; `None` until the first step.
    selected_index: Option<usize>,
    /// Window the highlighted app would focus.
    selected_window: Option<WindowId>,
}

/// Deferred-commit browsing over the app ring.
#[derive(Debug, Default)]
pub struct BrowseFlow {
    /// The open browse, if any.
    session: Option<BrowseSession>,
}

impl BrowseFlow {
    /// A flow with no open browse.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a browse is open.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Index currently highlighted, if browsing.
    pub fn selected_index(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.selected_index)
    }

    /// Start browsing if needed, then move the highlight.
    pub async fn handle(&mut self, ctx: &mut NavContext, direction: Direction) {
        if self.session.is_none() {
            self.start(ctx).await;
        }
        self.apply(ctx, direction);
    }

    /// Capture the ring and show the HUD with nothing highlighted.
    async fn start(&mut self, ctx: &mut NavContext) {
        let candidates = ctx.refresh().await;
        let (monitor, focused_app) = match ctx.focused_context(&candidates).await {
            Ok(fc) => {
                ctx.record_focused(&fc.focused, fc.monitor);
                (Some(fc.monitor), Some(AppRingKey::for_window(&fc.focused)))
            }
            Err(miss) => {
                debug!(?miss, "browse started without focus");
                (ctx.no_focus_monitor(&candidates), None)
            }
        };
        let (monitor, groups) = ctx.groups_for_monitor(&candidates, monitor);
        if groups.is_empty() {
            info!(monitor = %monitor, "app ring empty; browse shows nothing");
        } else {
            ctx.show_hud(&groups, None, None, monitor, BROWSE_HUD_TIMEOUT_MS);
        }
        self.session = Some(BrowseSession {
            monitor,
            groups,
            focused_app,
            selected_index: None,
            selected_window: None,
        });
    }

    /// Move the highlight one slot.
    fn apply(&mut self, ctx: &NavContext, direction: Direction) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let len = session.groups.len();
        if len == 0 {
            info!(%direction, "browse ring empty");
            return;
        }
        let forward = matches!(direction, Direction::Up | Direction::Right);
        let next = match session.selected_index {
            None if forward => 0,
            None => len - 1,
            Some(i) => step_index(i, len, forward),
        };
        let app_direction = if forward {
            Direction::Right
        } else {
            Direction::Left
        };
        let window = ctx
            .select_window(&session.groups[next], session.monitor, app_direction, None)
            .map(|w| w.window_id);
        session.selected_index = Some(next);
        session.selected_window = window;
        debug!(
            index = next,
            app = %session.groups[next].key,
            from = ?session.focused_app.as_ref().map(AppRingKey::as_str),
            "browse selection moved"
        );
        ctx.show_hud(
            &session.groups,
            Some(next),
            window,
            session.monitor,
            BROWSE_HUD_TIMEOUT_MS,
        );
    }

    /// End browsing and focus the highlighted app, if it is still there.
    pub async fn commit(&mut self, ctx: &mut NavContext) {
        let Some(session) = self.session.take() else {
            return;
        };
        ctx.hide_hud();
        let Some(index) = session.selected_index else {
            info!("browse ended without a selection");
            return;
        };
        let Some(selected) = session.groups.get(index) else {
            info!(index, "browse selection out of range");
            return;
        };
        let candidates = ctx.refresh().await;
        let (monitor, groups) = ctx.groups_for_monitor(&candidates, Some(session.monitor));
        let Some(group) = groups.iter().find(|g| g.key == selected.key) else {
            info!(app = %selected.key, "browsed app no longer present");
            return;
        };
        let remembered = session
            .selected_window
            .and_then(|id| group.windows.iter().find(|w| w.window_id == id));
        let Some(target) = remembered
            .or_else(|| ctx.select_window(group, monitor, Direction::Right, None))
            .cloned()
        else {
            info!(app = %group.key, "browsed app has no windows");
            return;
        };
        ctx.focus(&target, monitor).await;
    }

    /// End browsing without focusing anything.
    pub fn cancel(&mut self, ctx: &NavContext) {
        if self.session.take().is_some() {
            debug!("browse cancelled");
            ctx.hide_hud();
        }
    }
}

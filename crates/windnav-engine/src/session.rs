//! Input sessions: which flow owns direction events while modifiers are held.

use serde::Serialize;
use tracing::{debug, info};
use windnav_keys::ModifierSet;
use windnav_world::Direction;

/// The two mutually exclusive flows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Direction events focus immediately.
    Navigation,
    /// Direction events move a highlight; release commits.
    Browse,
}

/// An open input session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct InputSession {
    /// Monotonic session number.
    pub id: u64,
    /// Modifiers held when the session opened; releasing any ends it.
    pub required: ModifierSet,
    /// Flow that owns the session.
    pub flow: FlowKind,
}

/// Where a direction event goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Run through the given flow.
    Flow(FlowKind),
    /// Belongs to the other flow while a session is open; dropped.
    Ignored,
}

/// Session state machine: Idle, or one session owned by one flow.
#[derive(Debug, Default)]
pub struct InputRouter {
    /// The open session, if any.
    active: Option<InputSession>,
    /// Id for the next session.
    next_id: u64,
}

impl InputRouter {
    /// Start idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// The open session, if any.
    pub fn active(&self) -> Option<InputSession> {
        self.active
    }

    /// Decide which flow handles `direction`, opening a session when idle.
    pub fn route(&mut self, direction: Direction, held: ModifierSet) -> Route {
        match self.active {
            Some(s) => match s.flow {
                FlowKind::Navigation => Route::Flow(FlowKind::Navigation),
                FlowKind::Browse if direction.is_horizontal() => {
                    info!(%direction, session = s.id, "browse session active; ignoring");
                    Route::Ignored
                }
                FlowKind::Browse => Route::Flow(FlowKind::Browse),
            },
            None if held.is_empty() => {
                debug!(%direction, "no modifiers held; navigating without a session");
                Route::Flow(FlowKind::Navigation)
            }
            None => {
                let flow = if direction.is_horizontal() {
                    FlowKind::Navigation
                } else {
                    FlowKind::Browse
                };
                self.next_id += 1;
                let session = InputSession {
                    id: self.next_id,
                    required: held,
                    flow,
                };
                debug!(id = session.id, ?flow, required = %held, "session opened");
                self.active = Some(session);
                Route::Flow(flow)
            }
        }
    }

    /// Observe the held modifiers; returns the session that just ended, if
    /// any of its required modifiers is no longer held.
    pub fn modifiers_changed(&mut self, held: ModifierSet) -> Option<InputSession> {
        let session = self.active?;
        if held.contains_all(session.required) {
            return None;
        }
        debug!(id = session.id, held = %held, "session ended on release");
        self.active = None;
        Some(session)
    }

    /// End the open session regardless of modifiers.
    pub fn end(&mut self) -> Option<InputSession> {
        self.active.take()
    }
}

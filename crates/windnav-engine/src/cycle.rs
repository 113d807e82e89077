//! Most-recently-used window cycling with a frozen per-session order.
//!
//! A [`CycleSession`] freezes the ordered candidate ids for one monitor and
//! candidate set. While the user keeps cycling through the same set the
//! frozen order is reused verbatim, so enumeration jitter between polls never
//! reorders the ring under the user.

use std::{collections::BTreeSet, fmt, time::Duration};

use tokio::time::Instant;
use tracing::debug;
use windnav_world::{Direction, MonitorId, WindowId};

use crate::select::step_index;

/// Why a frozen session order was discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetReason {
    /// The last event was longer ago than the cycle timeout.
    Timeout,
    /// The set of candidate windows changed.
    CandidateSetChanged,
    /// The event targets a different monitor.
    MonitorChanged,
}

impl ResetReason {
    /// Name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::CandidateSetChanged => "candidate-set-changed",
            Self::MonitorChanged => "monitor-changed",
        }
    }
}

impl fmt::Display for ResetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A frozen cycling order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleSession {
    /// Monitor the order was frozen for.
    pub monitor: MonitorId,
    /// Candidate ids at freeze time.
    pub candidate_set: BTreeSet<WindowId>,
    /// Frozen order.
    pub ordered_ids: Vec<WindowId>,
    /// Time of the most recent event in this session.
    pub last_event_at: Instant,
}

/// Outcome of [`CycleSessionResolver::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Session to keep for the next event.
    pub session: CycleSession,
    /// Order to navigate with.
    pub ordered_ids: Vec<WindowId>,
    /// Set when an existing session was discarded.
    pub reset_reason: Option<ResetReason>,
    /// True when the frozen order was reused.
    pub reused: bool,
}

/// Decides whether an existing cycle session can be reused.
pub struct CycleSessionResolver;

impl CycleSessionResolver {
    /// Reuse `existing` when it matches `monitor` and `candidate_set` and has
    /// not timed out; otherwise freeze `fresh_order`.
    ///
    /// Reasons are checked monitor first, then candidate set, then time. A
    /// `timeout_ms` of zero disables the time check.
    pub fn resolve(
        existing: Option<&CycleSession>,
        monitor: MonitorId,
        candidate_set: BTreeSet<WindowId>,
        now: Instant,
        timeout_ms: u64,
        fresh_order: Vec<WindowId>,
    ) -> Resolution {
        let reset_reason = existing.and_then(|s| {
            if s.monitor != monitor {
                Some(ResetReason::MonitorChanged)
            } else if s.candidate_set != candidate_set {
                Some(ResetReason::CandidateSetChanged)
            } else if timeout_ms > 0
                && now.saturating_duration_since(s.last_event_at)
                    > Duration::from_millis(timeout_ms)
            {
                Some(ResetReason::Timeout)
            } else {
                None
            }
        });
        match existing {
            Some(s) if reset_reason.is_none() => {
                let ordered_ids = s.ordered_ids.clone();
                Resolution {
                    session: CycleSession {
                        last_event_at: now,
                        ..s.clone()
                    },
                    ordered_ids,
                    reset_reason: None,
                    reused: true,
                }
            }
            _ => {
                if let Some(reason) = reset_reason {
                    debug!(%reason, monitor = %monitor, "cycle session reset");
                }
                Resolution {
                    session: CycleSession {
                        monitor,
                        candidate_set,
                        ordered_ids: fresh_order.clone(),
                        last_event_at: now,
                    },
                    ordered_ids: fresh_order,
                    reset_reason,
                    reused: false,
                }
            }
        }
    }
}

/// Global most-recently-used order of window ids.
#[derive(Debug, Default)]
pub struct MruWindowOrderStore {
    /// Most recent first.
    order: Vec<WindowId>,
}

impl MruWindowOrderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop ids that are no longer visible and append new ones in ascending id order.
    pub fn sync_visible(&mut self, visible: &[WindowId]) {
        let set: BTreeSet<WindowId> = visible.iter().copied().collect();
        self.order.retain(|id| set.contains(id));
        let known: BTreeSet<WindowId> = self.order.iter().copied().collect();
        self.order
            .extend(set.into_iter().filter(|id| !known.contains(id)));
    }

    /// Move `id` to the front.
    pub fn promote(&mut self, id: WindowId) {
        self.order.retain(|w| *w != id);
        self.order.insert(0, id);
    }

    /// The MRU order restricted to `allowed`, with unknown allowed ids last.
    pub fn ordered_ids(&self, allowed: &BTreeSet<WindowId>) -> Vec<WindowId> {
        let mut out: Vec<WindowId> = self
            .order
            .iter()
            .copied()
            .filter(|id| allowed.contains(id))
            .collect();
        out.extend(allowed.iter().copied().filter(|id| !self.order.contains(id)));
        out
    }
}

/// Steps through a frozen order relative to the focused window.
pub struct LogicalCycleNavigator;

impl LogicalCycleNavigator {
    /// The next window from `focused` in `ordered`: `Right`/`Down` forward,
    /// `Left`/`Up` backward, wrapping. `None` with fewer than two candidates
    /// or when `focused` is not in the order.
    pub fn target(
        ordered: &[WindowId],
        focused: WindowId,
        direction: Direction,
    ) -> Option<WindowId> {
        if ordered.len() < 2 {
            return None;
        }
        let at = ordered.iter().position(|id| *id == focused)?;
        let forward = matches!(direction, Direction::Right | Direction::Down);
        Some(ordered[step_index(at, ordered.len(), forward)])
    }
}

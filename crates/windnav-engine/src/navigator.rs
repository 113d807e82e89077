//! The serialized navigator task.
//!
//! All navigation state lives inside one spawned task that drains a FIFO
//! command channel. Hotkey callbacks only enqueue, so overlapping presses are
//! processed strictly one after another, each running its refresh, ordering
//! and focus call to completion before the next starts.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};
use windnav_keys::ModifierSet;
use windnav_world::Direction;

use crate::{
    Error, Result,
    browse::BrowseFlow,
    context::{NavContext, Settings},
    deps::Services,
    navigation::NavigationFlow,
    session::{FlowKind, InputRouter, InputSession, Route},
};

/// Messages drained by the navigator task, in arrival order.
enum Command {
    /// A direction hotkey fired.
    Direction {
        /// Direction delivered by the hotkey.
        direction: Direction,
        /// Modifiers held when it fired.
        held: ModifierSet,
    },
    /// The held modifier set changed.
    ModifiersChanged(ModifierSet),
    /// Drop any session without committing.
    Cancel,
    /// Replace the settings.
    UpdateSettings(Box<Settings>),
    /// Record the focused window in focus memory.
    RecordFocus,
    /// Reply once every earlier command is done.
    Flush(oneshot::Sender<()>),
    /// Reply with the open session.
    Session(oneshot::Sender<Option<InputSession>>),
}

/// Entry point for spawning the navigator task.
pub struct Navigator;

impl Navigator {
    /// Spawn the navigator on the current tokio runtime.
    pub fn spawn(services: Services, settings: Settings) -> NavigatorHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let actor = Actor {
            ctx: NavContext::new(services, settings),
            router: InputRouter::new(),
            navigation: NavigationFlow::new(),
            browse: BrowseFlow::new(),
        };
        tokio::spawn(actor.run(rx));
        NavigatorHandle { tx }
    }
}

/// Cheap, cloneable sender side of the navigator.
#[derive(Clone)]
pub struct NavigatorHandle {
    /// Command queue into the task.
    tx: mpsc::UnboundedSender<Command>,
}

impl NavigatorHandle {
    /// Enqueue `cmd`, failing once the task has stopped.
    fn send(&self, cmd: Command) -> Result<()> {
        self.tx.send(cmd).map_err(|_| Error::ChannelClosed)
    }

    /// Enqueue a direction event with the modifiers held when it fired.
    pub fn direction(&self, direction: Direction, held: ModifierSet) -> Result<()> {
        self.send(Command::Direction { direction, held })
    }

    /// Report the currently held modifiers.
    pub fn modifiers_changed(&self, held: ModifierSet) -> Result<()> {
        self.send(Command::ModifiersChanged(held))
    }

    /// End any session without committing and hide the HUD.
    pub fn cancel(&self) -> Result<()> {
        self.send(Command::Cancel)
    }

    /// Replace the navigation and HUD settings for subsequent events.
    pub fn update_settings(&self, settings: Settings) -> Result<()> {
        self.send(Command::UpdateSettings(Box::new(settings)))
    }

    /// Record the currently focused window in focus memory, using the cached
    /// snapshot.
    pub fn record_current_focus(&self) -> Result<()> {
        self.send(Command::RecordFocus)
    }

    /// Wait until every earlier command has been processed.
    pub async fn flush(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Flush(tx))?;
        rx.await.map_err(|_| Error::ChannelClosed)
    }

    /// The open input session, after every earlier command.
    pub async fn session(&self) -> Result<Option<InputSession>> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Session(tx))?;
        rx.await.map_err(|_| Error::ChannelClosed)
    }
}

/// Task-owned navigator state.
struct Actor {
    /// Snapshot cache, memory stores and collaborators.
    ctx: NavContext,
    /// Input session arbitration.
    router: InputRouter,
    /// Immediate-focus flow.
    navigation: NavigationFlow,
    /// Commit-on-release flow.
    browse: BrowseFlow,
}

impl Actor {
    /// Drain commands until every handle is dropped.
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        while let Some(cmd) = rx.recv().await {
            self.handle(cmd).await;
        }
        debug!("navigator channel closed; task exiting");
    }

    /// Process one command to completion.
    async fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Direction { direction, held } => self.direction(direction, held).await,
            Command::ModifiersChanged(held) => {
                if let Some(ended) = self.router.modifiers_changed(held) {
                    self.end_session(ended).await;
                }
            }
            Command::Cancel => {
                if let Some(ended) = self.router.end() {
                    debug!(id = ended.id, "session cancelled");
                }
                self.navigation.end_session();
                if self.browse.is_active() {
                    self.browse.cancel(&self.ctx);
                } else {
                    self.ctx.hide_hud();
                }
            }
            Command::UpdateSettings(settings) => {
                debug!("navigator settings updated");
                self.navigation.end_session();
                let hud_enabled = settings.hud.enabled;
                self.ctx.set_settings(*settings);
                if !hud_enabled {
                    self.ctx.hide_hud();
                }
            }
            Command::RecordFocus => self.ctx.record_current_focus().await,
            Command::Flush(tx) => {
                let _ignored = tx.send(());
            }
            Command::Session(tx) => {
                let _ignored = tx.send(self.router.active());
            }
        }
    }

    /// Route a direction event to the flow that owns it.
    async fn direction(&mut self, direction: Direction, held: ModifierSet) {
        trace!(%direction, held = %held, "direction event");
        match self.router.route(direction, held) {
            Route::Flow(FlowKind::Navigation) => {
                if self.browse.is_active() {
                    self.browse.cancel(&self.ctx);
                }
                self.navigation.handle(&mut self.ctx, direction).await;
            }
            Route::Flow(FlowKind::Browse) => self.browse.handle(&mut self.ctx, direction).await,
            Route::Ignored => {}
        }
    }

    /// The modifiers of `ended` were released.
    ///
    /// Browse commits. Navigation forgets its frozen MRU order only in hold
    /// mode; otherwise the order lives until its timeout.
    async fn end_session(&mut self, ended: InputSession) {
        match ended.flow {
            FlowKind::Browse => self.browse.commit(&mut self.ctx).await,
            FlowKind::Navigation => {
                if self.ctx.settings().navigation.holds_until_release() {
                    self.navigation.end_session();
                    self.ctx.hide_hud();
                }
            }
        }
    }
}

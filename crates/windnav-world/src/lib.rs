//! windnav-world: what the navigator knows about the desktop.
//!
//! This crate holds the value types shared by every layer (window ids,
//! frames, [`WindowSnapshot`], [`Direction`]), the collaborator traits the
//! platform layer implements ([`WindowProvider`], [`FocusedWindowProvider`],
//! [`FocusPerformer`], [`ScreenLocator`]), and the [`WindowStateCache`] that
//! memoizes the latest enumeration.
//!
//! Nothing here talks to the operating system directly; production
//! implementations of the traits live in the platform layer and test doubles
//! live in [`test_support`].

mod cache;
mod direction;
mod error;
mod geom;
mod ids;
mod layout;
mod provider;
mod window;

pub mod test_support;

pub use cache::WindowStateCache;
pub use direction::Direction;
pub use error::{Error, Result};
pub use geom::{Point, Rect};
pub use ids::{MonitorId, Pid, WindowId};
pub use layout::{Monitor, MonitorLayout};
pub use provider::{FocusPerformer, FocusedWindowProvider, ScreenLocator, WindowProvider};
pub use window::WindowSnapshot;

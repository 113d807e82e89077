//! Engine error type.

use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the navigator engine.
///
/// Collaborator failures during navigation are logged, never returned; these
/// errors come from configuration and lifecycle operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected; the previous bindings stay in effect.
    #[error("configuration error: {0}")]
    Config(#[from] config::Error),

    /// The OS hotkey registrar refused the binding set.
    #[error("hotkey registration failed: {0}")]
    Registrar(String),

    /// The config file watcher could not be set up.
    #[error("config watch failed: {0}")]
    Watch(#[from] notify::Error),

    /// The navigator task has stopped.
    #[error("navigator channel closed")]
    ChannelClosed,
}

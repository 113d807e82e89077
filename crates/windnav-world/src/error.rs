//! Collaborator errors.

use std::result::Result as StdResult;

use thiserror::Error;

use crate::{Pid, WindowId};

/// Convenient result type for collaborator calls.
pub type Result<T> = StdResult<T, Error>;

/// Failures reported by window enumeration and focus collaborators.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Window enumeration failed.
    #[error("window enumeration failed: {0}")]
    Provider(String),

    /// The platform refused or failed to focus a window.
    #[error("failed to focus window {window} (pid {pid}): {message}")]
    Focus {
        /// Window that was targeted.
        window: WindowId,
        /// Owning process.
        pid: Pid,
        /// Platform detail.
        message: String,
    },

    /// Accessibility permission is missing.
    #[error("accessibility permission denied")]
    PermissionDenied,
}

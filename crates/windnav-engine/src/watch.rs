//! Debounced watching of the config file.
//!
//! Editors save in bursts (truncate, write, rename over), so raw filesystem
//! events are coalesced: [`ConfigWatcher::changed`] returns once no event has
//! arrived for the debounce period.

use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    time::Duration,
};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::{select, sync::mpsc, time::sleep};
use tracing::{debug, warn};

use crate::Result;

/// Quiet period after the last filesystem event before a reload.
pub const RELOAD_DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches one config file and reports debounced changes.
pub struct ConfigWatcher {
    /// OS watcher; event delivery stops when it is dropped.
    _watcher: Option<RecommendedWatcher>,
    /// Raw change notifications.
    changes: mpsc::UnboundedReceiver<()>,
    /// Quiet period before [`Self::changed`] returns.
    debounce: Duration,
}

impl ConfigWatcher {
    /// Watch `path` and its parent directory.
    ///
    /// The directory watch catches files replaced by rename and files created
    /// after startup; the file itself is watched too when it exists.
    pub fn watch(path: &Path, debounce: Duration) -> Result<Self> {
        let (tx, changes) = mpsc::unbounded_channel();
        let name = path.file_name().map(OsString::from);
        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if touches(name.as_deref(), &event) {
                        let _ignored = tx.send(());
                    }
                }
                Err(e) => warn!(error = %e, "config watcher error"),
            })?;
        watcher.watch(&parent_dir(path), RecursiveMode::NonRecursive)?;
        if path.exists() {
            watcher.watch(path, RecursiveMode::NonRecursive)?;
        }
        debug!(path = %path.display(), "watching config");
        Ok(Self {
            _watcher: Some(watcher),
            changes,
            debounce,
        })
    }

    /// A watcher fed from `changes` instead of the filesystem.
    #[cfg(test)]
    fn from_channel(changes: mpsc::UnboundedReceiver<()>, debounce: Duration) -> Self {
        Self {
            _watcher: None,
            changes,
            debounce,
        }
    }

    /// Wait for a change, then until the file has been quiet for the
    /// debounce period. Returns `false` once no more changes can arrive.
    pub async fn changed(&mut self) -> bool {
        if self.changes.recv().await.is_none() {
            return false;
        }
        loop {
            select! {
                more = self.changes.recv() => {
                    if more.is_none() {
                        return true;
                    }
                }
                () = sleep(self.debounce) => return true,
            }
        }
    }
}

/// Directory holding `path`, `.` for a bare file name.
fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Whether `event` modifies a file called `name`.
fn touches(name: Option<&OsStr>, event: &Event) -> bool {
    !event.kind.is_access()
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|f| Some(f) == name))
}

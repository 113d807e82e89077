use std::{error::Error as StdError, path::Path, sync::Arc};

use config::Config;
use tokio::{runtime::Builder, select, signal};
use tracing::info;
use windnav_engine::{
    Binding, ConfigWatcher, HotkeyRegistrar, LaunchAtLogin, RELOAD_DEBOUNCE, Runtime,
};

use crate::simulate;

/// Registrar that prints the binding set instead of grabbing keys.
struct PrintingRegistrar;

impl HotkeyRegistrar for PrintingRegistrar {
    fn register(&self, bindings: &[Binding]) -> windnav_engine::Result<()> {
        for b in bindings {
            println!("bind   {:<6} {}", b.direction.as_str(), b.chord);
        }
        Ok(())
    }

    fn unregister_all(&self) {
        println!("unbind all");
    }
}

/// Launch-at-login that prints the requested state.
struct PrintingLogin;

impl LaunchAtLogin for PrintingLogin {
    fn set_enabled(&self, enabled: bool) -> windnav_engine::Result<()> {
        println!("login  {enabled}");
        Ok(())
    }
}

/// Start a runtime over printing collaborators and re-apply `path` whenever
/// it changes, until interrupted.
pub fn run(config: &Config, path: &Path) -> Result<(), Box<dyn StdError>> {
    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(async move {
        let mut runtime = Runtime::start(
            simulate::printing_services(Vec::new(), None),
            Arc::new(PrintingRegistrar),
            Arc::new(PrintingLogin),
            config,
        )?;
        let mut watcher = ConfigWatcher::watch(path, RELOAD_DEBOUNCE)?;
        info!(path = %path.display(), "watching for config changes");
        loop {
            select! {
                changed = watcher.changed() => {
                    if !changed {
                        break;
                    }
                    // Errors are logged by reload; the old bindings stay.
                    let _ignored = runtime.reload(path);
                }
                _ = signal::ctrl_c() => break,
            }
        }
        Ok::<(), Box<dyn StdError>>(())
    })
}

use std::{error::Error as StdError, fs, path::Path, sync::Arc};

use async_trait::async_trait;
use clap::ValueEnum;
use config::{Config, HudConfig};
use parking_lot::Mutex;
use tokio::runtime::Builder;
use windnav_engine::{CycleHudModel, HudController, Navigator, Services, Settings};
use windnav_keys::{Modifier, ModifierSet};
use windnav_world::{
    Direction, FocusPerformer, FocusedWindowProvider, MonitorLayout, Pid, Rect, WindowId,
    WindowProvider, WindowSnapshot,
};

/// Display frame used for the replay.
const SCREEN: Rect = Rect::new(0.0, 0.0, 1440.0, 900.0);

/// One replayed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Step {
    /// Focus-left hotkey with cmd held.
    Left,
    /// Focus-right hotkey with cmd held.
    Right,
    /// Focus-up hotkey with cmd held.
    Up,
    /// Focus-down hotkey with cmd held.
    Down,
    /// Release all modifiers.
    Release,
}

/// Window enumeration that always returns the loaded snapshot.
struct StaticWindows(Vec<WindowSnapshot>);

#[async_trait]
impl WindowProvider for StaticWindows {
    async fn current_snapshot(&self) -> windnav_world::Result<Vec<WindowSnapshot>> {
        Ok(self.0.clone())
    }
}

/// Focus state that follows successful focus requests and prints them.
struct PrintingFocus(Mutex<Option<WindowId>>);

#[async_trait]
impl FocusedWindowProvider for PrintingFocus {
    async fn focused_window_id(&self) -> Option<WindowId> {
        *self.0.lock()
    }
}

#[async_trait]
impl FocusPerformer for PrintingFocus {
    async fn focus(&self, window: WindowId, pid: Pid) -> windnav_world::Result<()> {
        println!("focus  window {window} (pid {pid})");
        *self.0.lock() = Some(window);
        Ok(())
    }
}

/// HUD that prints each show and hide.
struct PrintingHud;

impl HudController for PrintingHud {
    fn show(&self, model: CycleHudModel, _config: &HudConfig, timeout_ms: u64) {
        let items: Vec<String> = model
            .items
            .iter()
            .map(|i| {
                let pin = if i.is_pinned { "^" } else { "" };
                if i.is_current {
                    let at = i.current_window_index.unwrap_or(0) + 1;
                    format!("[{pin}{} {at}/{}]", i.label, i.window_count)
                } else {
                    format!("{pin}{}", i.label)
                }
            })
            .collect();
        println!("hud    {} (timeout {timeout_ms}ms)", items.join("  "));
    }

    fn hide(&self) {
        println!("hud    hidden");
    }
}

/// Read a JSON array of window snapshots.
pub fn read_windows(path: &Path) -> Result<Vec<WindowSnapshot>, Box<dyn StdError>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Printing collaborators over a fixed snapshot on one display.
pub fn printing_services(windows: Vec<WindowSnapshot>, focused: Option<u32>) -> Services {
    let focus = Arc::new(PrintingFocus(Mutex::new(focused.map(WindowId::new))));
    Services {
        windows: Arc::new(StaticWindows(windows)),
        focused: focus.clone(),
        focus,
        screens: Arc::new(MonitorLayout::single(SCREEN)),
        hud: Arc::new(PrintingHud),
    }
}

/// Replay `steps` against the snapshot in `windows_path`.
pub fn run(
    config: &Config,
    windows_path: &Path,
    focused: Option<u32>,
    steps: &[Step],
) -> Result<(), Box<dyn StdError>> {
    let services = printing_services(read_windows(windows_path)?, focused);
    let settings = Settings {
        navigation: config.navigation.clone(),
        hud: config.hud,
    };
    let held = ModifierSet::EMPTY.with(Modifier::Command);

    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(async move {
        let nav = Navigator::spawn(services, settings);
        for step in steps {
            println!("-- {step:?}");
            match step {
                Step::Left => nav.direction(Direction::Left, held)?,
                Step::Right => nav.direction(Direction::Right, held)?,
                Step::Up => nav.direction(Direction::Up, held)?,
                Step::Down => nav.direction(Direction::Down, held)?,
                Step::Release => nav.modifiers_changed(ModifierSet::EMPTY)?,
            }
            nav.flush().await?;
        }
        Ok::<(), Box<dyn StdError>>(())
    })
}

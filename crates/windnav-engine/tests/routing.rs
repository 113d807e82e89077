use std::{fs, sync::Arc};

use config::{Config, Error as ConfigError};
use windnav_engine::{
    Error, Runtime,
    test_support::{Harness, RecordingLaunchAtLogin, RecordingRegistrar, cmd},
};
use windnav_keys::Chord;
use windnav_world::{Direction, Monitor, MonitorId, Rect, WindowSnapshot, test_support::window};

const CMD_FLAG: u64 = 1 << 20;

struct Fixture {
    harness: Harness,
    registrar: Arc<RecordingRegistrar>,
    login: Arc<RecordingLaunchAtLogin>,
    runtime: Runtime,
}

fn start(config: &Config, windows: Vec<WindowSnapshot>, focused: Option<u32>) -> Fixture {
    let harness = Harness::new(windows, focused);
    let registrar = RecordingRegistrar::new();
    let login = RecordingLaunchAtLogin::new();
    let runtime = Runtime::start(
        harness.services(),
        registrar.clone(),
        login.clone(),
        config,
    )
    .expect("runtime starts");
    Fixture {
        harness,
        registrar,
        login,
        runtime,
    }
}

impl Fixture {
    async fn hotkey(&self, direction: Direction) {
        self.runtime.handle_hotkey(direction, cmd()).expect("send");
        self.runtime.navigator().flush().await.expect("flush");
    }

    async fn flags(&self, flags: u64) {
        self.runtime
            .handle_modifier_flags_changed(flags)
            .expect("send");
        self.runtime.navigator().flush().await.expect("flush");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn default_bindings_are_registered() {
    let f = start(&Config::default(), Vec::new(), None);
    let registered = f.registrar.registered();
    assert_eq!(registered, f.runtime.bindings());
    let pairs: Vec<(Direction, String)> = registered
        .iter()
        .map(|b| (b.direction, b.chord.to_string_canonical()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (Direction::Left, "cmd-left".to_string()),
            (Direction::Right, "cmd-right".to_string()),
            (Direction::Up, "cmd-up".to_string()),
            (Direction::Down, "cmd-down".to_string()),
        ]
    );
    assert_eq!(f.login.calls(), vec![false]);
}

#[tokio::test(flavor = "current_thread")]
async fn invalid_config_keeps_previous_bindings() {
    let mut f = start(&Config::default(), Vec::new(), None);
    let before = f.registrar.registered();

    let mut bad = Config::default();
    bad.hotkeys.focus_left = "left".into();
    let err = f.runtime.apply_config(&bad).expect_err("modifier required");
    assert!(matches!(err, Error::Config(ConfigError::Validation { .. })));

    let mut dup = Config::default();
    dup.hotkeys.focus_up = "cmd-right".into();
    assert!(f.runtime.apply_config(&dup).is_err());

    assert_eq!(f.registrar.registered(), before);
    assert_eq!(f.login.calls(), vec![false]);
}

#[tokio::test(flavor = "current_thread")]
async fn reload_rebinds_and_updates_login() {
    let mut f = start(&Config::default(), Vec::new(), None);
    let mut next = Config::default();
    next.hotkeys.focus_right = "ctrl-opt-l".into();
    next.startup.launch_on_login = true;
    f.runtime.apply_config(&next).expect("valid config");

    let right = f
        .registrar
        .registered()
        .into_iter()
        .find(|b| b.direction == Direction::Right)
        .expect("right bound");
    assert_eq!(right.chord, Chord::parse("ctrl-opt-l").expect("chord"));
    assert_eq!(f.login.calls(), vec![false, true]);
}

#[tokio::test(flavor = "current_thread")]
async fn invalid_initial_config_refuses_to_start() {
    let h = Harness::new(Vec::new(), None);
    let registrar = RecordingRegistrar::new();
    let mut bad = Config::default();
    bad.hotkeys.focus_down = "cmd-nope".into();
    let started = Runtime::start(
        h.services(),
        registrar.clone(),
        RecordingLaunchAtLogin::new(),
        &bad,
    );
    assert!(started.is_err());
    assert!(registrar.registered().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn registrar_failure_is_reported() {
    let mut f = start(&Config::default(), Vec::new(), None);
    f.registrar.set_fail(true);
    let err = f
        .runtime
        .apply_config(&Config::default())
        .expect_err("registrar refused");
    assert!(matches!(err, Error::Registrar(_)));
}

#[tokio::test(flavor = "current_thread")]
async fn right_then_up_reaches_a_window_on_another_monitor() {
    let f = start(
        &Config::default(),
        vec![
            window(1, 10, "com.alpha", 0.0, 0.0),
            window(2, 20, "com.beta", 200.0, 0.0),
            window(3, 20, "com.beta", 1600.0, 0.0),
        ],
        Some(1),
    );
    f.harness.layout.set_monitors(vec![
        Monitor {
            id: MonitorId::new(1),
            frame: Rect::new(0.0, 0.0, 1440.0, 900.0),
        },
        Monitor {
            id: MonitorId::new(2),
            frame: Rect::new(1440.0, 0.0, 1440.0, 900.0),
        },
    ]);
    f.hotkey(Direction::Right).await;
    f.hotkey(Direction::Up).await;
    assert_eq!(f.harness.focus.focused_ids(), vec![2, 3]);
}

#[tokio::test(flavor = "current_thread")]
async fn modifier_release_ends_the_session() {
    let f = start(
        &Config::default(),
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(2, 20, "com.b", 200.0, 0.0),
        ],
        Some(1),
    );
    f.hotkey(Direction::Right).await;
    f.flags(CMD_FLAG).await;
    let session = f.runtime.navigator().session().await.expect("session");
    assert_eq!(session.map(|s| s.required), Some(cmd()));

    f.flags(0).await;
    assert_eq!(f.runtime.navigator().session().await.expect("session"), None);
    // Timed HUD: release leaves it to expire on its own.
    assert_eq!(f.harness.hud.hides(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn hold_mode_hides_hud_on_release() {
    let mut config = Config::default();
    config.navigation.cycle_timeout_ms = 0;
    let f = start(
        &config,
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(2, 20, "com.b", 200.0, 0.0),
        ],
        Some(1),
    );
    f.hotkey(Direction::Right).await;
    assert_eq!(f.harness.hud.last_timeout(), Some(0));
    assert_eq!(f.harness.hud.hides(), 0);
    f.flags(0).await;
    assert_eq!(f.harness.hud.hides(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn reload_from_file_applies_changes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "").expect("write");
    let mut f = start(&Config::default(), Vec::new(), None);

    fs::write(
        &path,
        "[hotkeys]\nfocus-left = \"ctrl-h\"\n\n[startup]\nlaunch-on-login = true\n",
    )
    .expect("rewrite");
    f.runtime.reload(&path).expect("valid file");

    let left = f
        .registrar
        .registered()
        .into_iter()
        .find(|b| b.direction == Direction::Left)
        .expect("left bound");
    assert_eq!(left.chord, Chord::parse("ctrl-h").expect("chord"));
    assert_eq!(f.login.calls(), vec![false, true]);
}

#[tokio::test(flavor = "current_thread")]
async fn failed_reload_keeps_previous_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let mut f = start(&Config::default(), Vec::new(), None);
    let before = f.registrar.registered();

    fs::write(&path, "[hotkeys\nfocus-left = ").expect("write");
    let err = f.runtime.reload(&path).expect_err("syntax error");
    assert!(matches!(err, Error::Config(ConfigError::Parse { .. })));

    fs::write(&path, "[hotkeys]\nfocus-left = \"left\"\n").expect("write");
    assert!(f.runtime.reload(&path).is_err());

    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        f.runtime.reload(&missing),
        Err(Error::Config(ConfigError::Read { .. }))
    ));

    assert_eq!(f.registrar.registered(), before);
    assert_eq!(f.runtime.bindings(), before.as_slice());
    assert_eq!(f.login.calls(), vec![false]);
}

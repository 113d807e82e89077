use std::{fs, path::Path};

use crate::{raw::unknown_keys, *};

#[test]
fn empty_file_is_defaults() {
    let cfg = parse_str("").expect("parse");
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.navigation.cycle_timeout_ms, 900);
    assert_eq!(cfg.hotkeys.focus_up, "cmd-up");
    assert!(cfg.hud.enabled);
}

#[test]
fn full_file_overrides() {
    let text = r#"
[hotkeys]
focus-left = "ctrl-opt-left"
focus-right = "ctrl-opt-right"
focus-up = "ctrl-opt-up"
focus-down = "ctrl-opt-down"

[navigation]
mode = "mru-cycle"
cycle-timeout-ms = 0
include-minimized = false
include-hidden-apps = false
show-windowless-apps = "show-at-end"

[navigation.standard]
pinned-apps = ["com.apple.Terminal", " com.google.Chrome "]
unpinned-apps = "alphabetical-tail"
in-app-window = "last-focused-on-monitor"
grouping = "one-stop-per-app"

[logging]
level = "debug"
color = "never"

[startup]
launch-on-login = true

[hud]
enabled = false
show-icons = false
position = "bottom-center"
"#;
    let cfg = parse_str(text).expect("parse");
    assert_eq!(cfg.navigation.mode, NavigationMode::MruCycle);
    assert!(cfg.navigation.holds_until_release());
    assert!(!cfg.navigation.include_minimized);
    assert!(!cfg.navigation.include_hidden_apps);
    assert_eq!(
        cfg.navigation.show_windowless_apps,
        ShowWindowlessApps::ShowAtEnd
    );
    assert_eq!(
        cfg.navigation.standard.pinned_apps,
        vec!["com.apple.Terminal".to_string(), "com.google.Chrome".to_string()]
    );
    assert_eq!(
        cfg.navigation.standard.unpinned_apps,
        UnpinnedApps::AlphabeticalTail
    );
    assert_eq!(
        cfg.navigation.standard.in_app_window,
        InAppWindow::LastFocusedOnMonitor
    );
    assert_eq!(cfg.logging.level, LogLevel::Debug);
    assert_eq!(cfg.logging.color, ColorMode::Never);
    assert!(cfg.startup.launch_on_login);
    assert_eq!(cfg.hud.position, HudPosition::BottomCenter);
    assert!(!cfg.hud.enabled);
}

#[test]
fn unknown_keys_are_ignored() {
    let text = r#"
[navigation]
scope = "current-monitor"
wobble = 3

[mystery]
x = 1
"#;
    assert_eq!(parse_str(text).expect("parse"), Config::default());
}

#[test]
fn invalid_enum_value_names_key_and_choices() {
    let err = parse_str("[navigation.standard]\nunpinned-apps = \"shuffle\"\n").expect_err("bad");
    match &err {
        Error::Validation { key, message, .. } => {
            assert_eq!(key.as_deref(), Some("navigation.standard.unpinned-apps"));
            assert!(message.contains("append|alphabetical-tail|ignore"), "{message}");
            assert!(message.contains("\"shuffle\""), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn negative_timeout_rejected() {
    let err = parse_str("[navigation]\ncycle-timeout-ms = -5\n").expect_err("negative");
    assert!(err.to_string().contains("non-negative"), "{err}");
}

#[test]
fn legacy_keys_rejected() {
    let err = parse_str("[navigation]\npolicy = \"mru-cycle\"\n").expect_err("legacy policy");
    assert!(err.to_string().contains("navigation.mode"), "{err}");

    let err = parse_str("[navigation.fixed-app-ring]\npinned-apps = []\n").expect_err("legacy ring");
    assert!(err.to_string().contains("[navigation.standard]"), "{err}");
}

#[test]
fn type_errors_have_location() {
    let text = "[hud]\nenabled = \"yes\"\n";
    let err = parse_str(text).expect_err("type error");
    match &err {
        Error::Parse { line, excerpt, .. } => {
            assert_eq!(*line, 2);
            assert!(excerpt.contains("enabled"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.pretty().starts_with("Config parse error at line 2"));
}

#[test]
fn bad_hotkey_rejects_whole_config() {
    let err = parse_str("[hotkeys]\nfocus-left = \"cmd-pgdn\"\n").expect_err("bad hotkey");
    assert!(err.to_string().contains("pgdn"), "{err}");
}

#[test]
fn load_or_create_writes_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("config.toml");
    let cfg = load_or_create(&path).expect("created");
    assert_eq!(cfg, Config::default());
    let written = fs::read_to_string(&path).expect("read back");
    assert!(written.contains("[navigation.standard]"));

    fs::write(&path, "[hud]\nposition = \"top-center\"\n").expect("rewrite");
    let cfg = load_or_create(&path).expect("existing file is loaded");
    assert_eq!(cfg.hud.position, HudPosition::TopCenter);
}

#[test]
fn errors_from_files_carry_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[logging]\nlevel = \"loud\"\n").expect("write");
    let err = load_from_path(&path).expect_err("invalid level");
    assert_eq!(err.path(), Some(path.as_path()));
    assert!(err.pretty().contains("logging.level"));

    let missing = load_from_path(&dir.path().join("absent.toml")).expect_err("missing");
    assert!(matches!(missing, Error::Read { .. }));
}

#[test]
fn explicit_path_wins() {
    let p = Path::new("/tmp/x.toml");
    assert_eq!(resolve_config_path(Some(p)), p.to_path_buf());
    assert!(default_config_path().ends_with(".config/windnav/config.toml"));
}

#[test]
fn unknown_keys_are_reported_by_section() {
    let text = r#"
theme = "dark"

[hud]
enabled = false
hide-delay-ms = 300

[navigation]
mode = "standard"

[navigation.standard]
pinned-apps = []
sort = "name"

[plugins]
anything = 1
"#;
    let cfg = parse_str(text).expect("unknown keys do not fail parsing");
    assert!(!cfg.hud.enabled);

    let table: toml::Table = toml::from_str(text).expect("toml");
    let mut unknown = unknown_keys(&table);
    unknown.sort();
    assert_eq!(
        unknown,
        vec![
            "[hud].hide-delay-ms".to_string(),
            "[navigation.standard].sort".to_string(),
            "plugins".to_string(),
            "theme".to_string(),
        ]
    );
}

#[test]
fn known_keys_report_nothing() {
    let table: toml::Table = toml::from_str(&defaults::render_default_toml()).expect("toml");
    assert!(unknown_keys(&table).is_empty());
}

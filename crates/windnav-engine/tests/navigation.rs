use std::time::Duration;

use config::{HudConfig, NavigationConfig, NavigationMode, StandardConfig};
use tokio::time::advance;
use windnav_engine::{
    Settings,
    test_support::{Harness, HudEvent, cmd},
};
use windnav_keys::ModifierSet;
use windnav_world::{Direction, test_support::window};

fn pinned(bundles: &[&str]) -> NavigationConfig {
    NavigationConfig {
        standard: StandardConfig {
            pinned_apps: bundles.iter().map(|s| s.to_string()).collect(),
            ..StandardConfig::default()
        },
        ..NavigationConfig::default()
    }
}

#[tokio::test(flavor = "current_thread")]
async fn pinned_terminal_leads_the_ring() {
    let h = Harness::with_navigation(
        vec![
            window(1, 10, "com.google.Chrome", 0.0, 0.0),
            window(2, 20, "com.apple.Terminal", 200.0, 0.0),
        ],
        Some(1),
        pinned(&["com.apple.Terminal"]),
    );
    h.press(Direction::Right).await;

    assert_eq!(h.focus.focused_ids(), vec![2]);
    let model = h.hud.last_model().expect("hud shown");
    assert_eq!(model.labels(), vec!["com.apple.Terminal", "com.google.Chrome"]);
    assert_eq!(model.selected_index, Some(0));
    assert!(model.items[0].is_pinned);
    assert!(!model.items[1].is_pinned);
    assert_eq!(h.hud.last_timeout(), Some(900));
}

#[tokio::test(flavor = "current_thread")]
async fn right_wraps_around_the_ring() {
    let h = Harness::new(
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(2, 20, "com.b", 200.0, 0.0),
            window(3, 30, "com.c", 400.0, 0.0),
        ],
        Some(1),
    );
    for _ in 0..3 {
        h.press(Direction::Right).await;
    }
    assert_eq!(h.focus.focused_ids(), vec![2, 3, 1]);

    h.press(Direction::Left).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 3, 1, 3]);
}

#[tokio::test(flavor = "current_thread")]
async fn up_and_down_step_through_spatial_order() {
    // Enumeration order deliberately differs from spatial order.
    let h = Harness::new(
        vec![
            window(2, 10, "com.a", 100.0, 0.0),
            window(1, 10, "com.a", 0.0, 0.0),
        ],
        Some(1),
    );
    h.press_with(Direction::Up, ModifierSet::EMPTY).await;
    h.press_with(Direction::Up, ModifierSet::EMPTY).await;
    h.press_with(Direction::Down, ModifierSet::EMPTY).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 1, 2]);

    let model = h.hud.last_model().expect("hud shown");
    assert_eq!(model.items[0].window_count, 2);
    assert_eq!(model.items[0].current_window_index, Some(1));
}

#[tokio::test(flavor = "current_thread")]
async fn up_inside_a_navigation_session_steps_in_app() {
    let h = Harness::new(
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(2, 20, "com.b", 200.0, 0.0),
            window(3, 20, "com.b", 400.0, 0.0),
        ],
        Some(1),
    );
    h.press(Direction::Right).await;
    h.press(Direction::Up).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 3]);
}

#[tokio::test(flavor = "current_thread")]
async fn single_app_ring_shows_hud_without_focusing() {
    let h = Harness::new(vec![window(1, 10, "com.a", 0.0, 0.0)], Some(1));
    h.press(Direction::Right).await;
    assert!(h.focus.calls().is_empty());
    let model = h.hud.last_model().expect("hud shown");
    assert_eq!(model.selected_index, Some(0));
    assert_eq!(model.items[0].current_window_index, Some(0));
}

#[tokio::test(flavor = "current_thread")]
async fn empty_snapshot_hides_hud_and_does_nothing() {
    let h = Harness::new(Vec::new(), None);
    h.press(Direction::Right).await;
    assert!(h.focus.calls().is_empty());
    assert_eq!(h.hud.events(), vec![HudEvent::Hide]);
}

#[tokio::test(flavor = "current_thread")]
async fn no_focus_enters_ring_from_the_edges() {
    let h = Harness::new(
        vec![
            window(1, 10, "com.alpha", 0.0, 0.0),
            window(2, 20, "com.beta", 200.0, 0.0),
        ],
        None,
    );
    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![1]);
    assert_eq!(h.hud.last_model().and_then(|m| m.selected_index), Some(0));

    h.release().await;
    h.focus.set_focused(None);
    h.press(Direction::Left).await;
    assert_eq!(h.focus.focused_ids(), vec![1, 2]);
    assert_eq!(h.hud.last_model().and_then(|m| m.selected_index), Some(1));

    h.release().await;
    h.focus.set_focused(None);
    h.hud.clear();
    h.press_with(Direction::Up, ModifierSet::EMPTY).await;
    h.press_with(Direction::Down, ModifierSet::EMPTY).await;
    assert_eq!(h.focus.focused_ids(), vec![1, 2]);
    let shows = h.hud.shows();
    assert_eq!(shows.len(), 2);
    assert!(shows.iter().all(|m| m.selected_index.is_none()));
}

#[tokio::test(flavor = "current_thread")]
async fn offscreen_focus_takes_the_no_focus_path() {
    let h = Harness::new(
        vec![
            window(1, 10, "com.alpha", 0.0, 0.0),
            window(2, 20, "com.beta", 200.0, 0.0),
            window(9, 90, "com.zed", 50_000.0, 0.0),
        ],
        Some(9),
    );
    h.press(Direction::Left).await;
    assert_eq!(h.focus.focused_ids(), vec![2]);
}

#[tokio::test(flavor = "current_thread")]
async fn focus_failure_leaves_navigator_usable() {
    let h = Harness::new(
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(2, 20, "com.b", 200.0, 0.0),
        ],
        Some(1),
    );
    h.focus.set_fail(true);
    h.press(Direction::Right).await;
    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 2]);

    h.focus.set_fail(false);
    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 2, 2]);
    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 2, 2, 1]);
}

#[tokio::test(flavor = "current_thread")]
async fn provider_failure_navigates_on_stale_snapshot() {
    let h = Harness::new(
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(2, 20, "com.b", 200.0, 0.0),
        ],
        Some(1),
    );
    h.press(Direction::Right).await;
    h.windows.set_failure(Some("enumeration timed out"));
    h.windows.set_windows(Vec::new());
    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 1]);
    assert_eq!(h.windows.calls(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn returning_to_an_app_restores_its_last_window() {
    let h = Harness::new(
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(3, 10, "com.a", 300.0, 0.0),
            window(2, 20, "com.b", 500.0, 0.0),
        ],
        Some(3),
    );
    h.press(Direction::Right).await;
    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 3]);
}

#[tokio::test(flavor = "current_thread")]
async fn record_current_focus_feeds_memory() {
    let h = Harness::new(
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(3, 10, "com.a", 300.0, 0.0),
            window(2, 20, "com.b", 500.0, 0.0),
        ],
        Some(2),
    );
    // Prime the cache, then let the user click window 3 of app a.
    h.press_with(Direction::Up, ModifierSet::EMPTY).await;
    h.focus.set_focused(Some(3));
    h.navigator.record_current_focus().expect("send");
    h.navigator.flush().await.expect("flush");
    h.focus.set_focused(Some(2));
    h.press(Direction::Left).await;
    assert_eq!(h.focus.focused_ids(), vec![3]);
}

#[tokio::test(flavor = "current_thread")]
async fn minimized_and_hidden_windows_can_be_excluded() {
    let windows = vec![
        window(1, 10, "com.a", 0.0, 0.0),
        window(2, 20, "com.b", 200.0, 0.0).minimized(),
        window(3, 30, "com.c", 400.0, 0.0).hidden(),
        window(4, 40, "com.d", 600.0, 0.0),
    ];
    let nav = NavigationConfig {
        include_minimized: false,
        include_hidden_apps: false,
        ..NavigationConfig::default()
    };
    let h = Harness::with_navigation(windows.clone(), Some(1), nav);
    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![4]);
    assert_eq!(
        h.hud.last_model().expect("hud").labels(),
        vec!["com.a", "com.d"]
    );

    let all = Harness::new(windows, Some(1));
    all.press(Direction::Right).await;
    assert_eq!(all.focus.focused_ids(), vec![2]);
}

#[tokio::test(flavor = "current_thread")]
async fn disabled_hud_still_focuses() {
    let settings = Settings {
        hud: HudConfig {
            enabled: false,
            ..HudConfig::default()
        },
        ..Settings::default()
    };
    let h = Harness::with_settings(
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(2, 20, "com.b", 200.0, 0.0),
        ],
        Some(1),
        settings,
    );
    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![2]);
    assert!(h.hud.shows().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn mru_cycle_keeps_frozen_order_within_a_session() {
    let nav = NavigationConfig {
        mode: NavigationMode::MruCycle,
        cycle_timeout_ms: 0,
        ..NavigationConfig::default()
    };
    let h = Harness::with_navigation(
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(2, 20, "com.b", 200.0, 0.0),
            window(3, 30, "com.c", 400.0, 0.0),
        ],
        Some(1),
        nav,
    );
    h.press(Direction::Right).await;
    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 3]);

    // A new session refreezes from most-recently-used order.
    h.release().await;
    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 3, 2]);
    let model = h.hud.last_model().expect("hud");
    assert_eq!(model.selected().map(|i| i.label.as_str()), Some("com.b"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn mru_order_outlives_release_until_timeout() {
    let nav = NavigationConfig {
        mode: NavigationMode::MruCycle,
        cycle_timeout_ms: 900,
        ..NavigationConfig::default()
    };
    let h = Harness::with_navigation(
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(2, 20, "com.b", 200.0, 0.0),
            window(3, 30, "com.c", 400.0, 0.0),
        ],
        Some(1),
        nav,
    );
    h.press(Direction::Right).await;
    h.release().await;
    assert_eq!(h.hud.hides(), 0, "release leaves the timed hud alone");

    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 3]);

    // Past the timeout the order refreezes from recency: [3, 2, 1].
    advance(Duration::from_millis(901)).await;
    h.press(Direction::Right).await;
    assert_eq!(h.focus.focused_ids(), vec![2, 3, 2]);
}

#[tokio::test(flavor = "current_thread")]
async fn queued_presses_run_in_arrival_order() {
    let h = Harness::new(
        vec![
            window(1, 10, "com.a", 0.0, 0.0),
            window(2, 20, "com.b", 200.0, 0.0),
            window(3, 30, "com.c", 400.0, 0.0),
        ],
        Some(1),
    );
    for _ in 0..3 {
        h.navigator
            .direction(Direction::Right, cmd())
            .expect("navigator running");
    }
    h.navigator.flush().await.expect("flush");

    assert_eq!(h.focus.focused_ids(), vec![2, 3, 1]);
    let selected: Vec<Option<usize>> = h.hud.shows().iter().map(|m| m.selected_index).collect();
    assert_eq!(selected, vec![Some(1), Some(2), Some(0)]);
}

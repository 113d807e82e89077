//! The app ring: one slot per application, ordered by pin list and
//! remembered first-seen order.

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    fmt,
    hash::{Hash, Hasher},
};

use config::{ShowWindowlessApps, StandardConfig, UnpinnedApps};
use tracing::trace;
use windnav_world::{MonitorId, Pid, WindowId, WindowSnapshot};

use crate::select;

/// Identity of one ring slot.
///
/// Windows with a non-empty bundle id collapse to `bundle:<id>`; others are
/// keyed by process as `pid:<pid>`. Equality and hashing use only that
/// derived string.
#[derive(Clone, Debug)]
pub struct AppRingKey {
    /// `bundle:<id>` or `pid:<pid>`.
    raw: String,
    /// Non-empty bundle id, when known.
    bundle_id: Option<String>,
    /// A process owning one of the app's windows.
    representative_pid: Pid,
}

impl AppRingKey {
    /// Derive the key from a bundle id and owning process.
    pub fn new(bundle_id: Option<&str>, pid: Pid) -> Self {
        match bundle_id.filter(|b| !b.is_empty()) {
            Some(bundle) => Self {
                raw: format!("bundle:{bundle}"),
                bundle_id: Some(bundle.to_string()),
                representative_pid: pid,
            },
            None => Self {
                raw: format!("pid:{pid}"),
                bundle_id: None,
                representative_pid: pid,
            },
        }
    }

    /// The key for the app owning `window`.
    pub fn for_window(window: &WindowSnapshot) -> Self {
        Self::new(window.bundle_id.as_deref(), window.pid)
    }

    /// Derived identity string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Bundle id when the key is bundle-derived.
    pub fn bundle_id(&self) -> Option<&str> {
        self.bundle_id.as_deref()
    }

    /// Process id of the window the key was first derived from.
    pub const fn representative_pid(&self) -> Pid {
        self.representative_pid
    }
}

impl PartialEq for AppRingKey {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for AppRingKey {}

impl Hash for AppRingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for AppRingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Per-event input to ring construction.
#[derive(Clone, Debug, PartialEq)]
pub struct AppRingGroupSeed {
    /// Slot identity.
    pub key: AppRingKey,
    /// Display label.
    pub label: String,
    /// Current candidate windows of the app.
    pub windows: Vec<WindowSnapshot>,
}

/// An ordered ring slot.
#[derive(Clone, Debug, PartialEq)]
pub struct AppRingGroup {
    /// Slot identity.
    pub key: AppRingKey,
    /// Display label.
    pub label: String,
    /// Candidate windows of the app, in enumeration order.
    pub windows: Vec<WindowSnapshot>,
    /// Came from the pin list.
    pub is_pinned: bool,
}

impl AppRingGroup {
    /// Promote a seed to a ring slot.
    fn from_seed(seed: AppRingGroupSeed, is_pinned: bool) -> Self {
        Self {
            key: seed.key,
            label: seed.label,
            windows: seed.windows,
            is_pinned,
        }
    }

    /// True when every window is a windowless-app placeholder.
    pub fn is_windowless(&self) -> bool {
        is_windowless(&self.windows)
    }

    /// True when `id` belongs to this group.
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.iter().any(|w| w.window_id == id)
    }

    /// Windows in spatial order.
    pub fn spatial_windows(&self) -> Vec<&WindowSnapshot> {
        select::spatial_order(&self.windows)
    }
}

/// Whether `windows` holds only windowless-app placeholders.
fn is_windowless(windows: &[WindowSnapshot]) -> bool {
    !windows.is_empty() && windows.iter().all(|w| w.is_windowless_app_placeholder)
}

/// Group candidate windows into seeds, in first-seen order.
pub fn build_seeds(windows: &[WindowSnapshot]) -> Vec<AppRingGroupSeed> {
    let mut index: HashMap<AppRingKey, usize> = HashMap::new();
    let mut seeds: Vec<AppRingGroupSeed> = Vec::new();
    for w in windows {
        let key = AppRingKey::for_window(w);
        match index.get(&key) {
            Some(&i) => seeds[i].windows.push(w.clone()),
            None => {
                index.insert(key.clone(), seeds.len());
                seeds.push(AppRingGroupSeed {
                    label: app_label(&key, w),
                    key,
                    windows: vec![w.clone()],
                });
            }
        }
    }
    seeds
}

/// App name, else bundle id, else `pid:<pid>`.
fn app_label(key: &AppRingKey, first: &WindowSnapshot) -> String {
    if let Some(name) = first.app_name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    if let Some(bundle) = key.bundle_id() {
        return bundle.to_string();
    }
    format!("pid:{}", key.representative_pid())
}

/// Case-insensitive label order, ties broken by key string. Total over
/// distinct keys.
fn alphabetical(a: &AppRingGroupSeed, b: &AppRingGroupSeed) -> Ordering {
    a.label
        .to_lowercase()
        .cmp(&b.label.to_lowercase())
        .then_with(|| a.key.as_str().cmp(b.key.as_str()))
}

/// Orders seeds into the ring and remembers unpinned first-seen order per monitor.
#[derive(Debug, Default)]
pub struct AppRingStateStore {
    /// First-seen order of unpinned apps per monitor.
    unpinned_order: HashMap<MonitorId, Vec<AppRingKey>>,
}

impl AppRingStateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Order `seeds` into ring groups for `monitor`.
    ///
    /// Pinned apps come first in pin-list order (bundle-id match, first match
    /// wins). Unpinned apps follow per `config.unpinned_apps`. Windowless
    /// groups are dropped or moved to the end per `windowless`.
    pub fn ordered_groups(
        &mut self,
        seeds: Vec<AppRingGroupSeed>,
        monitor: MonitorId,
        config: &StandardConfig,
        windowless: ShowWindowlessApps,
    ) -> Vec<AppRingGroup> {
        let seeds: Vec<AppRingGroupSeed> = match windowless {
            ShowWindowlessApps::Hide => seeds
                .into_iter()
                .filter(|s| !is_windowless(&s.windows))
                .collect(),
            ShowWindowlessApps::Show | ShowWindowlessApps::ShowAtEnd => seeds,
        };
        if seeds.is_empty() {
            return Vec::new();
        }

        let mut remaining: Vec<Option<AppRingGroupSeed>> = seeds.into_iter().map(Some).collect();
        let mut pinned: Vec<AppRingGroup> = Vec::new();
        for bundle in &config.pinned_apps {
            let hit = remaining.iter_mut().find(|slot| {
                slot.as_ref()
                    .is_some_and(|s| s.key.bundle_id() == Some(bundle.as_str()))
            });
            if let Some(seed) = hit.and_then(Option::take) {
                pinned.push(AppRingGroup::from_seed(seed, true));
            }
        }

        let unpinned_seeds: Vec<AppRingGroupSeed> = remaining.into_iter().flatten().collect();
        let mut unpinned = self.order_unpinned(unpinned_seeds, monitor, config.unpinned_apps);
        if windowless == ShowWindowlessApps::ShowAtEnd {
            // Stable: keeps relative order within each partition.
            unpinned.sort_by_key(AppRingGroup::is_windowless);
        }
        trace!(
            monitor = %monitor,
            pinned = pinned.len(),
            unpinned = unpinned.len(),
            "ordered app ring"
        );
        pinned.extend(unpinned);
        pinned
    }

    /// Order unpinned seeds for `monitor` per `policy`.
    fn order_unpinned(
        &mut self,
        mut seeds: Vec<AppRingGroupSeed>,
        monitor: MonitorId,
        policy: UnpinnedApps,
    ) -> Vec<AppRingGroup> {
        match policy {
            UnpinnedApps::Ignore => {
                self.unpinned_order.insert(monitor, Vec::new());
                Vec::new()
            }
            UnpinnedApps::AlphabeticalTail => {
                seeds.sort_by(alphabetical);
                seeds
                    .into_iter()
                    .map(|s| AppRingGroup::from_seed(s, false))
                    .collect()
            }
            UnpinnedApps::Append => {
                let present: HashSet<AppRingKey> = seeds.iter().map(|s| s.key.clone()).collect();
                let mut order: Vec<AppRingKey> = self
                    .unpinned_order
                    .remove(&monitor)
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|k| present.contains(k))
                    .collect();
                let known: HashSet<AppRingKey> = order.iter().cloned().collect();
                let mut unseen: Vec<&AppRingGroupSeed> =
                    seeds.iter().filter(|s| !known.contains(&s.key)).collect();
                unseen.sort_by(|a, b| alphabetical(a, b));
                order.extend(unseen.into_iter().map(|s| s.key.clone()));

                let mut by_key: HashMap<AppRingKey, AppRingGroupSeed> =
                    seeds.into_iter().map(|s| (s.key.clone(), s)).collect();
                let groups = order
                    .iter()
                    .filter_map(|k| by_key.remove(k))
                    .map(|s| AppRingGroup::from_seed(s, false))
                    .collect();
                self.unpinned_order.insert(monitor, order);
                groups
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use config::InAppWindow;
    use proptest::prelude::*;
    use windnav_world::test_support::window;

    use super::*;

    fn seed(id: u32, pid: i32, bundle: &str, label: &str) -> AppRingGroupSeed {
        let w = window(id, pid, bundle, 0.0, 0.0).with_app_name(label);
        build_seeds(&[w]).remove(0)
    }

    fn cfg(pinned: &[&str], unpinned: UnpinnedApps) -> StandardConfig {
        StandardConfig {
            pinned_apps: pinned.iter().map(|s| s.to_string()).collect(),
            unpinned_apps: unpinned,
            in_app_window: InAppWindow::LastFocused,
            ..StandardConfig::default()
        }
    }

    fn labels(groups: &[AppRingGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.label.as_str()).collect()
    }

    const M1: MonitorId = MonitorId::new(1);

    #[test]
    fn key_prefers_bundle_then_pid() {
        let a = AppRingKey::new(Some("com.apple.Terminal"), Pid::new(5));
        let b = AppRingKey::new(Some("com.apple.Terminal"), Pid::new(9));
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "bundle:com.apple.Terminal");
        let c = AppRingKey::new(Some(""), Pid::new(42));
        assert_eq!(c.as_str(), "pid:42");
        assert_eq!(c.bundle_id(), None);
        assert_ne!(c, AppRingKey::new(None, Pid::new(43)));
    }

    #[test]
    fn seeds_collapse_by_key_and_label_falls_back() {
        let windows = vec![
            window(1, 10, "com.a", 0.0, 0.0),
            WindowSnapshot::new(2_u32, 20, Default::default()),
            window(3, 11, "com.a", 200.0, 0.0),
        ];
        let seeds = build_seeds(&windows);
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].windows.len(), 2);
        assert_eq!(seeds[1].label, "pid:20");
    }

    #[test]
    fn pinned_terminal_leads_chrome() {
        let seeds = vec![
            seed(1, 10, "com.google.Chrome", "Chrome"),
            seed(2, 20, "com.apple.Terminal", "Terminal"),
        ];
        let mut store = AppRingStateStore::new();
        let groups = store.ordered_groups(
            seeds,
            M1,
            &cfg(&["com.apple.Terminal"], UnpinnedApps::Append),
            ShowWindowlessApps::Show,
        );
        assert_eq!(labels(&groups), vec!["Terminal", "Chrome"]);
        assert!(groups[0].is_pinned);
        assert!(!groups[1].is_pinned);
    }

    #[test]
    fn pinned_order_skips_absent_apps() {
        let seeds = vec![
            seed(1, 10, "com.a", "A"),
            seed(2, 20, "com.b", "B"),
            seed(3, 30, "com.c", "C"),
        ];
        let mut store = AppRingStateStore::new();
        let groups = store.ordered_groups(
            seeds,
            M1,
            &cfg(&["com.b", "com.missing", "com.a"], UnpinnedApps::Append),
            ShowWindowlessApps::Show,
        );
        assert_eq!(labels(&groups), vec!["B", "A", "C"]);
    }

    #[test]
    fn append_remembers_first_seen_order() {
        let mut store = AppRingStateStore::new();
        let c = cfg(&[], UnpinnedApps::Append);
        let first = store.ordered_groups(
            vec![seed(1, 10, "com.z", "Zed"), seed(2, 20, "com.m", "Mail")],
            M1,
            &c,
            ShowWindowlessApps::Show,
        );
        assert_eq!(labels(&first), vec!["Mail", "Zed"]);

        // A newcomer sorting before both is appended, not inserted.
        let second = store.ordered_groups(
            vec![
                seed(3, 30, "com.a", "Alpha"),
                seed(1, 10, "com.z", "Zed"),
                seed(2, 20, "com.m", "Mail"),
            ],
            M1,
            &c,
            ShowWindowlessApps::Show,
        );
        assert_eq!(labels(&second), vec!["Mail", "Zed", "Alpha"]);

        // Memory is per monitor.
        let other = store.ordered_groups(
            vec![seed(3, 30, "com.a", "Alpha"), seed(1, 10, "com.z", "Zed")],
            MonitorId::new(2),
            &c,
            ShowWindowlessApps::Show,
        );
        assert_eq!(labels(&other), vec!["Alpha", "Zed"]);
    }

    #[test]
    fn stale_keys_are_dropped_from_memory() {
        let mut store = AppRingStateStore::new();
        let c = cfg(&[], UnpinnedApps::Append);
        store.ordered_groups(
            vec![seed(1, 10, "com.b", "B"), seed(2, 20, "com.c", "C")],
            M1,
            &c,
            ShowWindowlessApps::Show,
        );
        store.ordered_groups(vec![seed(2, 20, "com.c", "C")], M1, &c, ShowWindowlessApps::Show);
        // B disappeared, so on return it is treated as unseen and appended.
        let again = store.ordered_groups(
            vec![seed(1, 10, "com.b", "B"), seed(2, 20, "com.c", "C")],
            M1,
            &c,
            ShowWindowlessApps::Show,
        );
        assert_eq!(labels(&again), vec!["C", "B"]);
    }

    #[test]
    fn alphabetical_tail_ignores_memory() {
        let mut store = AppRingStateStore::new();
        let c = cfg(&[], UnpinnedApps::AlphabeticalTail);
        let groups = store.ordered_groups(
            vec![
                seed(1, 10, "com.z", "zeta"),
                seed(2, 20, "com.b", "Beta"),
                seed(3, 30, "com.a", "beta"),
            ],
            M1,
            &c,
            ShowWindowlessApps::Show,
        );
        // Equal labels tie-break on the key string.
        assert_eq!(
            groups.iter().map(|g| g.key.as_str()).collect::<Vec<_>>(),
            vec!["bundle:com.a", "bundle:com.b", "bundle:com.z"]
        );
    }

    #[test]
    fn ignore_keeps_only_pinned() {
        let mut store = AppRingStateStore::new();
        let groups = store.ordered_groups(
            vec![seed(1, 10, "com.a", "A"), seed(2, 20, "com.b", "B")],
            M1,
            &cfg(&["com.b"], UnpinnedApps::Ignore),
            ShowWindowlessApps::Show,
        );
        assert_eq!(labels(&groups), vec!["B"]);
    }

    #[test]
    fn windowless_policies() {
        let placeholder = WindowSnapshot::windowless_placeholder(9_u32, 90, Default::default())
            .with_bundle_id("com.empty")
            .with_app_name("Empty");
        let mk = || {
            let mut seeds = build_seeds(&[placeholder.clone()]);
            seeds.push(seed(1, 10, "com.z", "Zed"));
            seeds
        };
        let c = cfg(&[], UnpinnedApps::AlphabeticalTail);
        let mut store = AppRingStateStore::new();
        assert_eq!(
            labels(&store.ordered_groups(mk(), M1, &c, ShowWindowlessApps::Show)),
            vec!["Empty", "Zed"]
        );
        assert_eq!(
            labels(&store.ordered_groups(mk(), M1, &c, ShowWindowlessApps::ShowAtEnd)),
            vec!["Zed", "Empty"]
        );
        assert_eq!(
            labels(&store.ordered_groups(mk(), M1, &c, ShowWindowlessApps::Hide)),
            vec!["Zed"]
        );
    }

    #[test]
    fn empty_seeds_give_empty_ring() {
        let mut store = AppRingStateStore::new();
        let groups = store.ordered_groups(
            Vec::new(),
            M1,
            &cfg(&["com.a"], UnpinnedApps::Append),
            ShowWindowlessApps::Show,
        );
        assert!(groups.is_empty());
    }

    fn arb_seeds() -> impl Strategy<Value = Vec<AppRingGroupSeed>> {
        proptest::collection::btree_set(0u8..40, 1..12).prop_map(|ids| {
            ids.into_iter()
                .map(|i| {
                    let label = format!("App{}", i % 7);
                    seed(u32::from(i), i32::from(i), &format!("com.app{i}"), &label)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn append_is_idempotent(seeds in arb_seeds()) {
            let mut store = AppRingStateStore::new();
            let c = cfg(&[], UnpinnedApps::Append);
            let first = store.ordered_groups(seeds.clone(), M1, &c, ShowWindowlessApps::Show);
            let second = store.ordered_groups(seeds, M1, &c, ShowWindowlessApps::Show);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn pinned_lead_in_pin_order(seeds in arb_seeds(), picks in proptest::collection::vec(0u8..40, 0..5)) {
            let pinned: Vec<String> = picks.iter().map(|i| format!("com.app{i}")).collect();
            let c = StandardConfig { pinned_apps: pinned.clone(), ..StandardConfig::default() };
            let mut store = AppRingStateStore::new();
            let groups = store.ordered_groups(seeds.clone(), M1, &c, ShowWindowlessApps::Show);
            prop_assert_eq!(groups.len(), seeds.len());

            let pinned_count = groups.iter().take_while(|g| g.is_pinned).count();
            prop_assert!(groups.iter().skip(pinned_count).all(|g| !g.is_pinned));

            let mut expected: Vec<String> = Vec::new();
            for b in &pinned {
                let present = seeds.iter().any(|s| s.key.bundle_id() == Some(b.as_str()));
                if present && !expected.contains(b) {
                    expected.push(b.clone());
                }
            }
            let actual: Vec<String> = groups
                .iter()
                .take(pinned_count)
                .filter_map(|g| g.key.bundle_id().map(str::to_string))
                .collect();
            prop_assert_eq!(actual, expected);
        }
    }
}

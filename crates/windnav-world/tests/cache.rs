use std::sync::Arc;

use windnav_world::{
    WindowProvider, WindowStateCache,
    test_support::{FakeWindowProvider, window},
};

#[tokio::test(flavor = "current_thread")]
async fn refresh_replaces_snapshot() {
    let provider = FakeWindowProvider::new(vec![window(1, 10, "com.a", 0.0, 0.0)]);
    let mut cache = WindowStateCache::new(provider.clone() as Arc<dyn WindowProvider>);
    assert!(cache.snapshot().is_empty());

    let snap = cache.refresh_and_get_snapshot().await;
    assert_eq!(snap.len(), 1);

    provider.set_windows(vec![
        window(1, 10, "com.a", 0.0, 0.0),
        window(2, 20, "com.b", 200.0, 0.0),
    ]);
    cache.refresh().await;
    assert_eq!(cache.snapshot().len(), 2);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn provider_failure_keeps_previous_snapshot() {
    let provider = FakeWindowProvider::new(vec![window(7, 70, "com.a", 0.0, 0.0)]);
    let mut cache = WindowStateCache::new(provider.clone() as Arc<dyn WindowProvider>);
    cache.refresh().await;

    provider.set_failure(Some("ax timeout"));
    provider.set_windows(Vec::new());
    let snap = cache.refresh_and_get_snapshot().await;
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].window_id.get(), 7);

    provider.set_failure(None);
    let snap = cache.refresh_and_get_snapshot().await;
    assert!(snap.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn duplicate_ids_keep_first() {
    let provider = FakeWindowProvider::new(vec![
        window(1, 10, "com.a", 0.0, 0.0),
        window(1, 20, "com.b", 500.0, 0.0),
    ]);
    let mut cache = WindowStateCache::new(provider as Arc<dyn WindowProvider>);
    let snap = cache.refresh_and_get_snapshot().await;
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].pid.get(), 10);
}

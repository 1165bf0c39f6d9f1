//! Tests for lock coordination

use crate::support::FailingStore;
use idemp_application::{Acquisition, FailurePolicy, LockCoordinator};
use idemp_domain::ports::LockStore;
use idemp_domain::value_objects::{CleanupTask, InvocationKey, LockToken};
use idemp_providers::lock_store::InMemoryLockStore;
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(30);

fn coordinator() -> (InMemoryLockStore, LockCoordinator) {
    let store = InMemoryLockStore::new();
    let coordinator = LockCoordinator::new(Arc::new(store.clone()));
    (store, coordinator)
}

fn key(name: &str) -> InvocationKey {
    InvocationKey::new(name)
}

#[tokio::test]
async fn test_acquire_writes_token_and_blocks_second_caller() {
    let (store, coordinator) = coordinator();

    let token = coordinator
        .acquire(&key("k"), TTL)
        .await
        .into_token()
        .expect("first acquire succeeds");
    assert_eq!(
        store.get("k").await.unwrap().as_deref(),
        Some(token.as_str())
    );

    assert_eq!(coordinator.acquire(&key("k"), TTL).await, Acquisition::Blocked);
}

#[tokio::test]
async fn test_release_requires_owner_token() {
    let (store, coordinator) = coordinator();
    let token = coordinator
        .acquire(&key("k"), TTL)
        .await
        .into_token()
        .unwrap();

    assert!(!coordinator.release(&key("k"), &LockToken::from("intruder")).await);
    assert!(store.get("k").await.unwrap().is_some());

    assert!(coordinator.release(&key("k"), &token).await);
    assert!(store.get("k").await.unwrap().is_none());
    assert!(coordinator.acquire(&key("k"), TTL).await.is_acquired());
}

#[tokio::test]
async fn test_stale_release_does_not_touch_new_holder() {
    let (store, coordinator) = coordinator();
    let stale = coordinator
        .acquire(&key("k"), Duration::from_millis(20))
        .await
        .into_token()
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let fresh = coordinator
        .acquire(&key("k"), TTL)
        .await
        .into_token()
        .expect("expired record can be re-acquired");

    assert!(!coordinator.release(&key("k"), &stale).await);
    assert_eq!(
        store.get("k").await.unwrap().as_deref(),
        Some(fresh.as_str())
    );
}

#[tokio::test]
async fn test_refresh_with_token_extends_expiry() {
    let (store, coordinator) = coordinator();
    let token = coordinator
        .acquire(&key("k"), Duration::from_millis(200))
        .await
        .into_token()
        .unwrap();

    assert!(coordinator.refresh(&key("k"), Some(&token), TTL).await);
    assert!(store.ttl_remaining("k").unwrap() > Duration::from_secs(20));
    assert_eq!(
        store.get("k").await.unwrap().as_deref(),
        Some(token.as_str())
    );
}

#[tokio::test]
async fn test_refresh_never_overwrites_another_holder() {
    let (store, coordinator) = coordinator();
    store.set_if_absent("k", "other", TTL).await.unwrap();

    let mine = LockToken::generate();
    assert!(!coordinator.refresh(&key("k"), Some(&mine), TTL).await);
    assert!(!coordinator.refresh(&key("k"), None, TTL).await);
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("other"));
}

#[tokio::test]
async fn test_refresh_rearms_missing_record() {
    let (store, coordinator) = coordinator();

    assert!(coordinator.refresh(&key("k"), None, TTL).await);
    assert!(store.get("k").await.unwrap().is_some());

    store.compare_and_delete("k", &store.get("k").await.unwrap().unwrap()).await.unwrap();
    let lost = LockToken::generate();
    assert!(coordinator.refresh(&key("k"), Some(&lost), TTL).await);
    assert!(store.get("k").await.unwrap().is_some());
}

#[tokio::test]
async fn test_run_cleanup_dispatches_on_task_kind() {
    let (store, coordinator) = coordinator();
    let token = coordinator
        .acquire(&key("k"), TTL)
        .await
        .into_token()
        .unwrap();

    let refresh = CleanupTask::Refresh {
        key: key("k"),
        token: Some(token.clone()),
        ttl: TTL,
    };
    assert!(coordinator.run_cleanup(refresh).await);

    let release = CleanupTask::Release {
        key: key("k"),
        token,
    };
    assert!(coordinator.run_cleanup(release).await);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_store_failure_fails_closed_by_default() {
    let coordinator = LockCoordinator::new(Arc::new(FailingStore));

    assert_eq!(coordinator.failure_policy(), FailurePolicy::FailClosed);
    assert_eq!(coordinator.acquire(&key("k"), TTL).await, Acquisition::Blocked);
}

#[tokio::test]
async fn test_store_failure_admits_when_fail_open() {
    let coordinator =
        LockCoordinator::new(Arc::new(FailingStore)).with_failure_policy(FailurePolicy::FailOpen);

    assert!(coordinator.acquire(&key("k"), TTL).await.is_acquired());
}

#[tokio::test]
async fn test_store_failures_are_absorbed_after_acquire() {
    let coordinator = LockCoordinator::new(Arc::new(FailingStore));
    let token = LockToken::generate();

    assert!(!coordinator.release(&key("k"), &token).await);
    assert!(!coordinator.refresh(&key("k"), Some(&token), TTL).await);
    assert!(!coordinator.refresh(&key("k"), None, TTL).await);
    assert_eq!(coordinator.get("k").await, None);
}

#[test]
fn test_failure_policy_deserializes_snake_case() {
    let policy: FailurePolicy = serde_json::from_str("\"fail_open\"").unwrap();
    assert_eq!(policy, FailurePolicy::FailOpen);
    assert_eq!(FailurePolicy::default(), FailurePolicy::FailClosed);
}

#[test]
fn test_provider_name_is_reported() {
    let (_, coordinator) = coordinator();
    assert_eq!(coordinator.provider_name(), "memory");
}

//! End-to-end tests: configuration to gate, with the in-memory store

use idemp_application::FailurePolicy;
use idemp_domain::error::Error;
use idemp_domain::value_objects::{CallDescriptor, CallOutcome, Transition};
use idemp_infrastructure::bootstrap::{AppContext, init_app};
use idemp_infrastructure::config::ConfigBuilder;
use serde_json::json;
use std::time::Duration;

fn submit(order_id: u64) -> CallDescriptor {
    CallDescriptor::new("orders::OrderService", "submit")
        .arg(&order_id)
        .unwrap()
}

async fn context(configure: impl FnOnce(ConfigBuilder) -> ConfigBuilder) -> AppContext {
    let config = configure(ConfigBuilder::new().with_memory_store())
        .build()
        .unwrap();
    init_app(config).await.unwrap()
}

#[tokio::test]
async fn test_success_is_suppressed_until_ttl() {
    let ctx = context(|b| b.with_default_ttl_ms(200)).await;
    let gate = ctx.gate();

    let session = gate.admit(&submit(1)).await.unwrap();
    let outcome = CallOutcome::returned(&json!({"success": true})).unwrap();
    assert_eq!(gate.complete(session, &outcome), Transition::SucceededSuppressing);
    ctx.cleanup().flush().await;

    assert!(gate.admit(&submit(1)).await.unwrap_err().is_duplicate_call());

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(gate.admit(&submit(1)).await.is_ok());
    ctx.shutdown().await;
}

#[tokio::test]
async fn test_exception_releases_for_immediate_retry() {
    let ctx = context(|b| b).await;
    let gate = ctx.gate();

    let session = gate.admit(&submit(2)).await.unwrap();
    let outcome = CallOutcome::raised(&Error::internal("inventory service down"));
    assert_eq!(gate.complete(session, &outcome), Transition::ExceptedReleasing);
    ctx.cleanup().flush().await;

    assert!(gate.admit(&submit(2)).await.is_ok());
    ctx.shutdown().await;
}

#[tokio::test]
async fn test_guard_with_configured_namespace_and_message() {
    let ctx = context(|b| b.with_namespace("orders")).await;
    let guard = ctx.guard();

    let first = guard
        .execute(&submit(3), || async { Ok(json!({"success": true})) })
        .await
        .unwrap();
    assert_eq!(first["success"], true);
    ctx.cleanup().flush().await;

    let err = guard
        .execute(&submit(3).with_denial_message("order 3 already submitted"), || async {
            Ok(json!({}))
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "order 3 already submitted");

    let key = ctx.gate().fingerprints().fingerprint(&submit(3)).unwrap();
    assert!(key.as_str().starts_with("orders:"));
    assert!(ctx.gate().get(key.as_str()).await.is_some());
    ctx.shutdown().await;
}

#[tokio::test]
async fn test_config_reaches_gate() {
    let ctx = context(|b| {
        b.with_default_ttl_ms(7_000)
            .with_failure_policy(FailurePolicy::FailOpen)
    })
    .await;

    assert_eq!(ctx.gate().default_ttl(), Duration::from_secs(7));
    assert_eq!(
        ctx.gate().coordinator().failure_policy(),
        FailurePolicy::FailOpen
    );
    assert_eq!(ctx.gate().coordinator().provider_name(), "memory");
    assert_eq!(ctx.cleanup().capacity(), ctx.config.cleanup.queue_capacity);
    ctx.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_runs_pending_releases() {
    let ctx = context(|b| b).await;
    let gate = ctx.gate();

    for order in 10..20 {
        let session = gate.admit(&submit(order)).await.unwrap();
        gate.complete(session, &CallOutcome::Returned("{}".to_string()));
    }
    ctx.shutdown().await;

    assert_eq!(ctx.cleanup().stats().applied, 10);
    for order in 10..20 {
        assert!(gate.admit(&submit(order)).await.is_ok());
    }
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_store_from_config() {
    let config = ConfigBuilder::new().build().unwrap();
    let ctx = init_app(config).await.unwrap();

    assert_eq!(ctx.gate().coordinator().provider_name(), "redis");
    assert!(ctx.gate().lock_manually("idemp-it:manual", Some(Duration::from_secs(1))).await);
    ctx.shutdown().await;
}

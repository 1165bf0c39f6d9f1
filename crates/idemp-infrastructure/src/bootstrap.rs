//! Bootstrap - Composition Root
//!
//! Turns an [`AppConfig`] into a ready [`AdmissionGate`]: connects the
//! configured lock store, starts the cleanup queue and applies the lock
//! settings.
//!
//! ```text
//! AppConfig → connect_store → LockCoordinator ─┐
//!                                  │           ├→ AdmissionGate
//!                                  └→ CleanupQueue ┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?).await?;
//!
//! let guard = context.guard();
//! let receipt = guard.execute(&call, || service.charge(order_id)).await?;
//!
//! context.shutdown().await;
//! ```

use crate::cleanup::CleanupQueue;
use crate::config::{AppConfig, StoreConfig, StoreProvider};
use idemp_application::{
    AdmissionGate, FingerprintGenerator, IdempotencyGuard, LockCoordinator, OutcomeEvaluator,
};
use idemp_domain::error::Result;
use idemp_domain::ports::{CleanupDispatcher, LockStore};
use idemp_providers::lock_store::{InMemoryLockStore, RedisLockStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Application context: configuration, gate and the cleanup queue it feeds
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    gate: AdmissionGate,
    cleanup: Arc<CleanupQueue>,
}

impl AppContext {
    /// The admission gate
    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// A guard over the admission gate
    pub fn guard(&self) -> IdempotencyGuard {
        IdempotencyGuard::new(self.gate.clone())
    }

    /// The background cleanup queue
    pub fn cleanup(&self) -> &CleanupQueue {
        &self.cleanup
    }

    /// Drain pending cleanup work and stop the worker
    pub async fn shutdown(&self) {
        self.cleanup.shutdown().await;
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("gate", &self.gate)
            .field("cleanup", &self.cleanup)
            .finish()
    }
}

/// Build the application context from configuration
///
/// Must run inside a Tokio runtime.
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    let store = connect_store(&config.store).await?;
    let coordinator = coordinator_for(&config, store);
    let cleanup = Arc::new(CleanupQueue::spawn(
        coordinator.clone(),
        config.cleanup.queue_capacity,
    )?);
    let gate = gate_for(&config, coordinator, cleanup.clone());

    info!(
        store = gate.coordinator().provider_name(),
        namespace = ?config.lock.namespace,
        default_ttl = ?config.lock.default_ttl(),
        failure_policy = ?config.lock.failure_policy,
        "Idempotency gate initialized"
    );

    Ok(AppContext {
        config: Arc::new(config),
        gate,
        cleanup,
    })
}

/// Connect the configured lock store
pub async fn connect_store(config: &StoreConfig) -> Result<Arc<dyn LockStore>> {
    match config.provider {
        StoreProvider::Redis => {
            let store = RedisLockStore::connect(&config.redis.urls, config.redis.topology).await?;
            Ok(Arc::new(store))
        }
        StoreProvider::Memory => {
            warn!("Using the in-memory lock store; locks are not shared between processes");
            Ok(Arc::new(InMemoryLockStore::new()))
        }
    }
}

/// Coordinator over `store` with the configured failure policy
pub fn coordinator_for(config: &AppConfig, store: Arc<dyn LockStore>) -> LockCoordinator {
    LockCoordinator::new(store).with_failure_policy(config.lock.failure_policy)
}

/// Admission gate with the configured lock settings
pub fn gate_for(
    config: &AppConfig,
    coordinator: LockCoordinator,
    cleanup: Arc<dyn CleanupDispatcher>,
) -> AdmissionGate {
    let lock = &config.lock;
    let fingerprints = match &lock.namespace {
        Some(namespace) => FingerprintGenerator::with_namespace(namespace.clone()),
        None => FingerprintGenerator::new(),
    };

    AdmissionGate::new(coordinator, cleanup)
        .with_fingerprints(fingerprints)
        .with_evaluator(OutcomeEvaluator::new(&lock.success_marker, &lock.success_code))
        .with_default_ttl(lock.default_ttl())
        .with_denial_message(lock.denial_message.clone())
}

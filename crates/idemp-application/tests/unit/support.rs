//! Shared test doubles for the application tests

#![allow(dead_code)]

use async_trait::async_trait;
use idemp_application::{AdmissionGate, LockCoordinator};
use idemp_domain::error::{Error, Result};
use idemp_domain::ports::{CleanupDispatcher, LockStore};
use idemp_domain::value_objects::{CallDescriptor, CleanupTask};
use idemp_providers::lock_store::InMemoryLockStore;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Collects dispatched cleanup tasks so tests decide when they run
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    tasks: Mutex<Vec<CleanupTask>>,
}

impl RecordingDispatcher {
    pub fn take(&self) -> Vec<CleanupTask> {
        std::mem::take(&mut *self.tasks.lock().unwrap())
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }
}

impl CleanupDispatcher for RecordingDispatcher {
    fn dispatch(&self, task: CleanupTask) {
        self.tasks.lock().unwrap().push(task);
    }
}

/// Store whose every operation fails as if the server were down
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl LockStore for FailingStore {
    async fn set_if_absent(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<bool> {
        Err(Error::store_unavailable("connection refused"))
    }

    async fn compare_and_delete(&self, _key: &str, _expected: &str) -> Result<bool> {
        Err(Error::store_unavailable("connection refused"))
    }

    async fn compare_and_expire(&self, _key: &str, _expected: &str, _ttl: Duration) -> Result<bool> {
        Err(Error::store_unavailable("connection refused"))
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::store_unavailable("connection refused"))
    }

    fn provider_name(&self) -> &str {
        "failing"
    }
}

/// Gate over an in-memory store with a recording dispatcher
pub struct Harness {
    pub store: InMemoryLockStore,
    pub dispatcher: Arc<RecordingDispatcher>,
    pub gate: AdmissionGate,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_gate(|gate| gate)
    }

    pub fn with_gate(configure: impl FnOnce(AdmissionGate) -> AdmissionGate) -> Self {
        let store = InMemoryLockStore::new();
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let coordinator = LockCoordinator::new(Arc::new(store.clone()));
        let gate = configure(AdmissionGate::new(coordinator, dispatcher.clone()));
        Self {
            store,
            dispatcher,
            gate,
        }
    }

    /// Run every dispatched task, returning each task's result
    pub async fn drain(&self) -> Vec<bool> {
        let mut results = Vec::new();
        for task in self.dispatcher.take() {
            results.push(self.gate.coordinator().run_cleanup(task).await);
        }
        results
    }
}

pub fn charge(order_id: u64) -> CallDescriptor {
    CallDescriptor::new("billing::PaymentService", "charge")
        .arg(&order_id)
        .unwrap()
}

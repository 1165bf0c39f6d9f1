//! Unit tests for outcome value objects

use idemp_domain::value_objects::{
    CallOutcome, CleanupTask, InvocationKey, LockToken, RaisedError, Transition,
};
use idemp_domain::Error;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct Reply {
    success: bool,
    code: u32,
}

#[test]
fn test_returned_outcome_serializes_result() {
    let outcome = CallOutcome::returned(&Reply {
        success: true,
        code: 90001,
    })
    .unwrap();
    assert_eq!(
        outcome,
        CallOutcome::Returned(r#"{"success":true,"code":90001}"#.to_string())
    );
}

#[test]
fn test_raised_outcome_classifies_duplicate_call() {
    let duplicate = CallOutcome::raised(&Error::duplicate_call("busy"));
    assert_eq!(duplicate, CallOutcome::Raised(RaisedError::DuplicateCall));

    let other = CallOutcome::raised(&Error::internal("boom"));
    match other {
        CallOutcome::Raised(RaisedError::Other(message)) => assert!(message.contains("boom")),
        _ => panic!("Expected Other raised error"),
    }
}

#[test]
fn test_raised_other_from_foreign_error() {
    let io = std::io::Error::other("disk full");
    let outcome = CallOutcome::raised_other(&io);
    assert_eq!(
        outcome,
        CallOutcome::Raised(RaisedError::Other("disk full".to_string()))
    );
}

#[test]
fn test_transition_predicates() {
    assert!(Transition::SucceededSuppressing.suppresses());
    assert!(!Transition::SucceededSuppressing.releases());
    assert!(Transition::FailedReleasing.releases());
    assert!(Transition::ExceptedReleasing.releases());
    assert!(!Transition::ExceptedNoOp.releases());
    assert!(!Transition::ExceptedNoOp.suppresses());
}

#[test]
fn test_release_transition_builds_release_task() {
    let key = InvocationKey::new("K");
    let token = LockToken::from("T1");
    let task = Transition::FailedReleasing.cleanup_task(
        key.clone(),
        Some(token.clone()),
        Duration::from_secs(1),
    );
    assert_eq!(task, Some(CleanupTask::Release { key, token }));
}

#[test]
fn test_release_without_token_leaves_record_to_ttl() {
    let task = Transition::ExceptedReleasing.cleanup_task(
        InvocationKey::new("K"),
        None,
        Duration::from_secs(1),
    );
    assert!(task.is_none());
}

#[test]
fn test_suppressing_transition_builds_refresh_task() {
    let task = Transition::SucceededSuppressing
        .cleanup_task(InvocationKey::new("K"), None, Duration::from_secs(5))
        .unwrap();
    assert_eq!(task.kind(), "refresh");
    assert_eq!(task.key().as_str(), "K");
    match task {
        CleanupTask::Refresh { token, ttl, .. } => {
            assert!(token.is_none());
            assert_eq!(ttl, Duration::from_secs(5));
        }
        CleanupTask::Release { .. } => panic!("Expected Refresh task"),
    }
}

#[test]
fn test_noop_transition_has_no_task() {
    let task = Transition::ExceptedNoOp.cleanup_task(
        InvocationKey::new("K"),
        Some(LockToken::generate()),
        Duration::from_secs(1),
    );
    assert!(task.is_none());
    assert_eq!(Transition::ExceptedNoOp.to_string(), "excepted_noop");
}

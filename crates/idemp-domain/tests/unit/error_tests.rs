//! Unit tests for domain error types

use idemp_domain::Error;

#[test]
fn test_duplicate_call_displays_message_verbatim() {
    let error = Error::duplicate_call("already running");
    assert_eq!(error.to_string(), "already running");
    assert!(error.is_duplicate_call());
    assert!(!error.is_store_unavailable());
}

#[test]
fn test_store_unavailable_error() {
    let error = Error::store_unavailable("connection refused");
    match &error {
        Error::StoreUnavailable { message, source } => {
            assert_eq!(message, "connection refused");
            assert!(source.is_none());
        }
        _ => panic!("Expected StoreUnavailable error"),
    }
    assert!(error.is_store_unavailable());
    assert!(error.to_string().contains("Lock store unavailable"));
}

#[test]
fn test_store_unavailable_with_source_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = Error::store_unavailable_with_source("SET NX failed", io);
    let source = std::error::Error::source(&error);
    assert!(source.is_some());
    assert!(source.map(ToString::to_string).unwrap_or_default().contains("refused"));
}

#[test]
fn test_serialization_error() {
    let error = Error::serialization("key must be a string");
    match error {
        Error::Serialization { message } => assert_eq!(message, "key must be a string"),
        _ => panic!("Expected Serialization error"),
    }
}

#[test]
fn test_configuration_error() {
    let error = Error::configuration("default TTL cannot be 0");
    assert!(error.to_string().starts_with("Configuration error"));
    assert!(!error.is_duplicate_call());
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: Error = json_error.into();
    assert!(matches!(error, Error::Json { .. }));
}

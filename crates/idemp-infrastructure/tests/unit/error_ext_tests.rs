//! Error Extension Tests

use idemp_domain::error::Error;
use idemp_infrastructure::error_ext::ErrorContext;
use std::io;

fn io_failure() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "missing"))
}

#[test]
fn test_context_variants() {
    let err = io_failure().context("Loading").unwrap_err();
    assert!(matches!(err, Error::Internal { .. }));
    assert_eq!(err.to_string(), "Internal error: Loading: missing");

    let err = io_failure().io_context("Reading file").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));

    let err = io_failure().config_context("Parsing config").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_success_passes_through() {
    let ok: Result<u8, io::Error> = Ok(1);
    assert_eq!(ok.config_context("Parsing config").unwrap(), 1);
}

#[test]
fn test_source_is_preserved() {
    let err = io_failure().io_context("Reading file").unwrap_err();
    assert!(std::error::Error::source(&err).is_some());
}

//! Tests for invocation fingerprinting

use idemp_application::FingerprintGenerator;
use idemp_domain::value_objects::CallDescriptor;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

fn descriptor(amount: u64, currency: &str) -> CallDescriptor {
    CallDescriptor::new("billing::PaymentService", "charge")
        .arg(&amount)
        .unwrap()
        .arg(currency)
        .unwrap()
}

#[test]
fn test_fingerprint_is_stable_across_generators() {
    let key = FingerprintGenerator::new()
        .fingerprint(&descriptor(42, "EUR"))
        .unwrap();

    assert_eq!(key.as_str(), "D530A7B05EE8CF51C96B9E44D5DAFB5E");
    assert_eq!(
        FingerprintGenerator::default()
            .fingerprint(&descriptor(42, "EUR"))
            .unwrap(),
        key
    );
}

#[test]
fn test_fingerprint_without_arguments() {
    let key = FingerprintGenerator::new()
        .fingerprint(&CallDescriptor::new("billing::PaymentService", "charge"))
        .unwrap();
    assert_eq!(key.as_str(), "0E5D0EB2C9626312EA0047EBF0985380");
}

#[test]
fn test_key_is_fixed_length_uppercase_hex() {
    let key = FingerprintGenerator::new()
        .fingerprint(&descriptor(7, "USD"))
        .unwrap();

    assert_eq!(key.as_str().len(), 32);
    assert!(
        key.as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
    );
}

#[test]
fn test_argument_values_and_order_matter() {
    let generator = FingerprintGenerator::new();
    let base = generator.fingerprint(&descriptor(42, "EUR")).unwrap();

    assert_ne!(base, generator.fingerprint(&descriptor(43, "EUR")).unwrap());

    let swapped = CallDescriptor::new("billing::PaymentService", "charge")
        .arg("EUR")
        .unwrap()
        .arg(&42u64)
        .unwrap();
    assert_ne!(base, generator.fingerprint(&swapped).unwrap());
}

#[test]
fn test_target_and_operation_matter() {
    let generator = FingerprintGenerator::new();
    let a = CallDescriptor::new("billing::PaymentService", "charge");
    let b = CallDescriptor::new("billing::PaymentService", "refund");
    let c = CallDescriptor::new("billing::LedgerService", "charge");

    let keys = [&a, &b, &c].map(|call| generator.fingerprint(call).unwrap());
    assert_ne!(keys[0], keys[1]);
    assert_ne!(keys[0], keys[2]);
}

#[test]
fn test_map_arguments_are_order_independent() {
    #[derive(Serialize)]
    struct Order {
        id: u64,
        lines: BTreeMap<String, u32>,
    }

    let order = Order {
        id: 9,
        lines: BTreeMap::from([("apple".to_string(), 2), ("pear".to_string(), 1)]),
    };
    let from_struct = CallDescriptor::new("shop", "place").arg(&order).unwrap();
    let from_json = CallDescriptor::new("shop", "place")
        .with_value(json!({"lines": {"pear": 1, "apple": 2}, "id": 9}));

    let generator = FingerprintGenerator::new();
    assert_eq!(
        generator.fingerprint(&from_struct).unwrap(),
        generator.fingerprint(&from_json).unwrap()
    );
}

#[test]
fn test_namespace_prefixes_key() {
    let call = descriptor(42, "EUR");
    let bare = FingerprintGenerator::new().fingerprint(&call).unwrap();
    let namespaced = FingerprintGenerator::with_namespace("orders")
        .fingerprint(&call)
        .unwrap();

    assert_eq!(namespaced.as_str(), format!("orders:{bare}"));
}

#[test]
fn test_empty_namespace_is_ignored() {
    let generator = FingerprintGenerator::with_namespace("");
    assert_eq!(generator.namespace(), None);

    let call = descriptor(1, "EUR");
    assert_eq!(
        generator.fingerprint(&call).unwrap(),
        FingerprintGenerator::new().fingerprint(&call).unwrap()
    );
}

#[test]
fn test_ttl_and_denial_message_do_not_affect_key() {
    let generator = FingerprintGenerator::new();
    let plain = descriptor(42, "EUR");
    let decorated = descriptor(42, "EUR")
        .with_ttl(std::time::Duration::from_secs(5))
        .with_denial_message("busy");

    assert_eq!(
        generator.fingerprint(&plain).unwrap(),
        generator.fingerprint(&decorated).unwrap()
    );
}

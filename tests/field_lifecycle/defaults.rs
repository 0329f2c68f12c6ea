//! Default value resolution

use jsonfield::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn callable_default_returns_independent_values() {
    let field = JsonField::builder("value")
        .default_with(|| to_value(&json!({"items": []})).unwrap())
        .build();

    let mut first = field.default_value();
    let second = field.default_value();

    first
        .as_object_mut()
        .and_then(|o| o.get_mut("items"))
        .and_then(Value::as_array_mut)
        .unwrap()
        .push(Value::Int(1));

    assert_eq!(second, to_value(&json!({"items": []})).unwrap());
    assert_eq!(field.default_value(), to_value(&json!({"items": []})).unwrap());
}

#[test]
fn callable_default_invoked_per_resolution() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let field = JsonField::builder("value")
        .default_with(move || Value::Int(counter.fetch_add(1, Ordering::SeqCst) as i64))
        .build();

    assert_eq!(field.default_value(), Value::Int(0));
    assert_eq!(field.default_value(), Value::Int(1));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn plain_mutable_default_is_deep_copied() {
    let mut nested = HashMap::new();
    nested.insert("inner".to_string(), Value::Array(vec![Value::from("x")]));
    let field = JsonField::builder("value")
        .default_value(Value::Object(nested.clone()))
        .build();

    let mut first = field.default_value();
    first
        .as_object_mut()
        .and_then(|o| o.get_mut("inner"))
        .and_then(Value::as_array_mut)
        .unwrap()
        .clear();

    assert_eq!(field.default_value(), Value::Object(nested));
}

#[test]
fn default_survives_field_clone() {
    let field = JsonField::builder("value").default_value(7i64).build();
    let copy = field.clone();
    assert_eq!(copy.default_value(), Value::Int(7));
    assert_eq!(field.default_value(), Value::Int(7));
}

#[test]
fn default_is_storable() {
    let field = JsonField::builder("value")
        .default_with(|| to_value(&json!({"a": 1})).unwrap())
        .build();
    let stored = field.to_storage(&field.default_value()).unwrap();
    assert_eq!(stored.as_deref(), Some(r#"{"a":1}"#));
}

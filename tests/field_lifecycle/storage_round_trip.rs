//! Save/load behaviour of plain and decimal fields

use crate::init_tracing;
use jsonfield::prelude::*;
use jsonfield::{DecodeError, EncodeError, Error};
use std::collections::HashMap;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn save_and_load(field: &JsonField, value: &Value) -> Value {
    let stored = field.to_storage(value).unwrap();
    field.from_storage(stored.as_deref()).unwrap()
}

#[test]
fn saving_numbers() {
    let field = JsonField::new("value");
    assert_eq!(save_and_load(&field, &Value::Float(2.02)), Value::Float(2.02));
}

#[test]
fn saving_strings_with_numbers() {
    let field = JsonField::new("value");
    let value = Value::from("2.02");
    assert_eq!(field.to_storage(&value).unwrap().as_deref(), Some(r#""2.02""#));
    assert_eq!(save_and_load(&field, &value), value);
}

#[test]
fn saving_dict() {
    let field = JsonField::new("value");
    let value = to_value(&json!({"foo": "bar"})).unwrap();
    assert_eq!(field.to_storage(&value).unwrap().as_deref(), Some(r#"{"foo":"bar"}"#));
    assert_eq!(save_and_load(&field, &value), value);
}

#[test]
fn saving_nested_document() {
    let field = JsonField::new("value");
    let value = to_value(&json!({"foo": {"bar": 42}, "tags": ["a", "b"], "ok": true}))
        .unwrap();
    assert_eq!(
        field.to_storage(&value).unwrap().as_deref(),
        Some(r#"{"foo":{"bar":42},"ok":true,"tags":["a","b"]}"#)
    );
    assert_eq!(save_and_load(&field, &value), value);
}

#[test]
fn nullable_field_round_trips_null() {
    let field = JsonField::builder("value").nullable().build();
    assert_eq!(save_and_load(&field, &Value::Null), Value::Null);
}

#[test]
fn decimal_precision_encoding_with_float_field() {
    let field = JsonField::new("value");
    let d = dec("0.1") + dec("0.2");

    let stored = field.to_storage(&Value::Decimal(d)).unwrap();
    assert_eq!(stored.as_deref(), Some("0.3"));

    // A float field reads the exact digits back as a binary float
    assert_eq!(field.from_storage(stored.as_deref()).unwrap(), Value::Float(0.3));
}

#[test]
fn decimal_field_keeps_exact_value() {
    let field = JsonField::decimal("value");
    let d = dec("0.1") + dec("0.2");

    let loaded = save_and_load(&field, &Value::Decimal(d.clone()));
    assert_eq!(loaded, Value::Decimal(d));
    assert_ne!(
        loaded.as_decimal().map(ToString::to_string).as_deref(),
        Some("0.30000000000000004")
    );
}

#[test]
fn decimal_field_keeps_every_digit_of_a_float_sum() {
    // Exact value of the double nearest to 0.1 + 0.2
    let text = "0.3000000000000000444089209850062616169452667236328125";
    let field = JsonField::decimal("value");

    let loaded = field.from_storage(Some(text)).unwrap();
    assert_eq!(loaded, Value::Decimal(dec(text)));
    assert_ne!(loaded, Value::Decimal(dec("0.3")));

    let stored = field.to_storage(&loaded).unwrap();
    assert_eq!(stored.as_deref(), Some(text));
}

#[test]
fn float_field_reads_long_decimal_as_nearest_float() {
    let text = "0.3000000000000000444089209850062616169452667236328125";
    let field = JsonField::new("value");
    assert_eq!(field.from_storage(Some(text)).unwrap(), Value::Float(0.1 + 0.2));
}

#[test]
fn decimal_field_reads_every_number_as_decimal() {
    let field = JsonField::decimal("value");
    let loaded = field.from_storage(Some(r#"{"qty":3,"price":19.990}"#)).unwrap();

    assert_eq!(loaded.get("qty"), Some(&Value::Decimal(Decimal::from(3i64))));
    let price = loaded.get("price").and_then(Value::as_decimal).unwrap();
    assert_eq!(price.to_string(), "19.990");
}

#[test]
fn decimal_field_accepts_extreme_exponents() {
    let field = JsonField::decimal("value");
    for text in ["1e99", "0e100", "1.000e66", "5e-400"] {
        let loaded = field.from_storage(Some(text)).unwrap();
        assert_eq!(loaded, Value::Decimal(dec(text)), "{} should load exactly", text);
    }
}

#[test]
fn decimal_field_rejects_scale_overflow() {
    init_tracing();
    let field = JsonField::decimal("value");
    let err = field.from_storage(Some("1e99999999999999999999")).unwrap_err();
    assert!(matches!(err, Error::Parse(DecodeError::InvalidDecimal(_))));
}

#[test]
fn float_field_rejects_overflowing_literal() {
    init_tracing();
    let field = JsonField::new("value");
    let err = field.from_storage(Some("[1e400]")).unwrap_err();
    assert!(matches!(err, Error::Parse(DecodeError::InvalidNumber(_))));
}

#[test]
fn malformed_storage_text_is_parse_error() {
    init_tracing();
    let field = JsonField::new("value");
    for text in ["{foo:", r#"{"a":1"#, "", "[1,2", r#"{"a":1} extra"#] {
        let err = field.from_storage(Some(text)).unwrap_err();
        assert!(err.is_parse(), "{:?} should be a parse error", text);
    }
}

#[test]
fn typed_values_store_through_serde() {
    #[derive(serde::Serialize)]
    struct Settings {
        theme: &'static str,
        font_size: u32,
        recent: Vec<&'static str>,
    }

    let field = JsonField::new("settings");
    let stored = field
        .to_storage_serialize(&Settings {
            theme: "dark",
            font_size: 12,
            recent: vec!["a.txt"],
        })
        .unwrap();
    assert_eq!(
        stored.as_deref(),
        Some(r#"{"font_size":12,"recent":["a.txt"],"theme":"dark"}"#)
    );
}

#[test]
fn typed_decimal_fields_store_as_numbers() {
    #[derive(serde::Serialize)]
    struct Price {
        amount: Decimal,
        currency: &'static str,
    }

    let field = JsonField::decimal("price");
    let stored = field
        .to_storage_serialize(&Price {
            amount: dec("19.99"),
            currency: "EUR",
        })
        .unwrap();
    assert_eq!(stored.as_deref(), Some(r#"{"amount":19.99,"currency":"EUR"}"#));

    let loaded = field.from_storage(stored.as_deref()).unwrap();
    assert_eq!(loaded.get("amount"), Some(&Value::Decimal(dec("19.99"))));
    assert_eq!(loaded.get("currency"), Some(&Value::from("EUR")));
}

#[test]
fn typed_integers_beyond_i64_are_serialization_errors() {
    #[derive(serde::Serialize)]
    struct Counter {
        hits: u64,
    }

    let field = JsonField::new("counter");
    let err = field.to_storage_serialize(&Counter { hits: u64::MAX }).unwrap_err();
    assert!(matches!(err, Error::Serialization(EncodeError::Unserializable(_))));

    let fits = field.to_storage_serialize(&Counter { hits: 7 }).unwrap();
    assert_eq!(fits.as_deref(), Some(r#"{"hits":7}"#));
}

#[test]
fn non_string_map_keys_are_serialization_errors() {
    let mut map = HashMap::new();
    map.insert((1, 2), "pair");

    let field = JsonField::new("value");
    let err = field.to_storage_serialize(&map).unwrap_err();
    assert!(err.is_serialization());
}

#[test]
fn display_dump_matches_storage_text() {
    let field = JsonField::new("value");
    let value = to_value(&json!([1, "two", null])).unwrap();
    assert_eq!(
        field.value_to_string(&value).unwrap(),
        field.to_storage(&value).unwrap().unwrap()
    );
}

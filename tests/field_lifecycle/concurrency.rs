//! Sharing one field definition across threads

use jsonfield::prelude::*;
use std::sync::Arc;
use std::thread;

#[test]
fn shared_field_encodes_identically_on_every_thread() {
    let field = Arc::new(JsonField::decimal("value"));
    let value = to_value(&json!({"b": [1, 2, 3], "a": "x"})).unwrap();
    let expected = field.to_storage(&value).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let field = Arc::clone(&field);
            let value = value.clone();
            thread::spawn(move || {
                (0..100)
                    .map(|_| field.to_storage(&value).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for stored in handle.join().unwrap() {
            assert_eq!(stored, expected);
        }
    }
}

#[test]
fn per_call_overrides_on_other_threads_do_not_leak() {
    let config = CodecConfig::new();

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..50 {
                    let v = config
                        .decode_with("2.5", &jsonfield::DecodeOptions::decimal())
                        .unwrap();
                    assert!(matches!(v, Value::Decimal(_)));
                }
            });
        }
        s.spawn(|| {
            for _ in 0..50 {
                assert_eq!(config.decode("2.5").unwrap(), Value::Float(2.5));
            }
        });
    });

    assert_eq!(config.numeric_strategy(), NumericStrategy::Float);
}

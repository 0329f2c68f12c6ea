//! Substituting the codec and overriding options per call

use jsonfield::prelude::*;
use jsonfield::{
    DecodeError, DecodeOptions, EncodeError, EncodeOptions, JsonCodec, StandardCodec,
};
use std::result::Result;
use std::sync::{Arc, Mutex};

/// Records the options of every call, then delegates to the standard codec
#[derive(Default)]
struct RecordingCodec {
    encodes: Mutex<Vec<EncodeOptions>>,
    decodes: Mutex<Vec<DecodeOptions>>,
}

impl JsonCodec for RecordingCodec {
    fn encode(&self, value: &Value, options: &EncodeOptions) -> Result<String, EncodeError> {
        self.encodes.lock().unwrap().push(options.clone());
        StandardCodec.encode(value, options)
    }

    fn decode(&self, text: &str, options: &DecodeOptions) -> Result<Value, DecodeError> {
        self.decodes.lock().unwrap().push(options.clone());
        StandardCodec.decode(text, options)
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Stores everything upper-cased inside a JSON string; stands in for a
/// completely different wire format
struct ShoutingCodec;

impl JsonCodec for ShoutingCodec {
    fn encode(&self, value: &Value, _: &EncodeOptions) -> Result<String, EncodeError> {
        match value {
            Value::String(s) => Ok(format!("\"{}\"", s.to_uppercase())),
            other => Err(EncodeError::Unserializable(other.type_name().to_string())),
        }
    }

    fn decode(&self, text: &str, _: &DecodeOptions) -> Result<Value, DecodeError> {
        text.strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .map(|t| Value::from(t.to_lowercase()))
            .ok_or(DecodeError::UnexpectedEnd)
    }
}

#[test]
fn field_uses_stored_options_by_default() {
    let recorder = Arc::new(RecordingCodec::default());
    let field = JsonField::builder("value")
        .codec(recorder.clone())
        .encode_options(EncodeOptions::ascii())
        .decimal()
        .build();

    field.to_storage(&to_value(&json!({"foo": "bar"})).unwrap()).unwrap();
    field.from_storage(Some(r#"{"foo":"bar"}"#)).unwrap();

    assert_eq!(recorder.encodes.lock().unwrap().as_slice(), &[EncodeOptions::ascii()]);
    assert_eq!(recorder.decodes.lock().unwrap().as_slice(), &[DecodeOptions::decimal()]);
    assert_eq!(field.codec().codec_name(), "recording");
}

#[test]
fn explicit_options_win_for_one_call() {
    let recorder = Arc::new(RecordingCodec::default());
    let config = CodecConfig::new().with_codec(recorder.clone());

    let lossless = EncodeOptions::lossless();
    config.encode_with(&Value::Float(f64::NAN), &lossless).unwrap();
    config.decode_with("1.5", &DecodeOptions::decimal()).unwrap();

    // Subsequent calls fall back to the untouched stored defaults
    config.encode(&Value::Int(1)).unwrap();
    config.decode("1.5").unwrap();

    assert_eq!(
        recorder.encodes.lock().unwrap().as_slice(),
        &[lossless, EncodeOptions::default()]
    );
    assert_eq!(
        recorder.decodes.lock().unwrap().as_slice(),
        &[DecodeOptions::decimal(), DecodeOptions::default()]
    );
    assert_eq!(config.encode_options(), &EncodeOptions::default());
    assert_eq!(config.decode_options(), &DecodeOptions::default());
}

#[test]
fn replacement_codec_is_used_wholesale() {
    let field = JsonField::builder("shout").codec(Arc::new(ShoutingCodec)).build();

    let stored = field.to_storage(&Value::from("hello")).unwrap();
    assert_eq!(stored.as_deref(), Some(r#""HELLO""#));
    assert_eq!(field.from_storage(stored.as_deref()).unwrap(), Value::from("hello"));

    let err = field.to_storage(&Value::Int(1)).unwrap_err();
    assert!(err.is_serialization());
    assert_eq!(field.codec().codec_name(), "custom");
}

#[test]
fn settings_document_configures_field() {
    let settings = serde_json::from_str(
        r#"{"encode":{"non_finite":"wrap"},"decode":{"special_floats":true,"numbers":"decimal"}}"#,
    )
    .unwrap();
    let field = JsonField::builder("value").settings(settings).build();

    let stored = field.to_storage(&Value::Float(f64::NEG_INFINITY)).unwrap();
    assert_eq!(stored.as_deref(), Some(r#"{"$f64":"-Inf"}"#));
    assert_eq!(
        field.from_storage(stored.as_deref()).unwrap(),
        Value::Float(f64::NEG_INFINITY)
    );
    assert_eq!(field.codec().numeric_strategy(), NumericStrategy::Decimal);
}

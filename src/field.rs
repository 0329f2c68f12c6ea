//! JSON field adapter
//!
//! [`JsonField`] is the storage-facing half of a JSON-in-a-text-column field.
//! It owns a [`CodecConfig`] and knows how NULL and defaults behave; it never
//! touches a database itself.
//!
//! ## Load vs assign
//!
//! Values loaded from storage go through [`JsonField::from_storage`].
//! Values assigned by application code are already [`Value`]s and never get
//! decoded, so there is nothing to detect at runtime.

use crate::error::{Error, Result};
use jsonfield_core::Value;
use jsonfield_wire::{
    to_value, CodecConfig, CodecSettings, DecodeOptions, EncodeOptions, JsonCodec,
    NumericStrategy,
};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

/// Zero-argument producer of a fresh default value
pub type DefaultFactory = Arc<dyn Fn() -> Value + Send + Sync>;

/// Configured default of a field
#[derive(Clone)]
pub enum FieldDefault {
    /// A fixed value, cloned on every resolution
    Value(Value),
    /// A factory, called on every resolution
    Factory(DefaultFactory),
}

impl FieldDefault {
    /// Produce a default value that the caller owns outright
    pub fn resolve(&self) -> Value {
        match self {
            FieldDefault::Value(v) => v.clone(),
            FieldDefault::Factory(f) => f(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDefault::Value(v) => f.debug_tuple("Value").field(v).finish(),
            FieldDefault::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// A JSON-encoded text field
///
/// Cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct JsonField {
    name: String,
    codec: CodecConfig,
    nullable: bool,
    default: Option<FieldDefault>,
}

impl JsonField {
    /// Non-nullable field with the standard codec and float numbers
    pub fn new(name: impl Into<String>) -> Self {
        JsonFieldBuilder::new(name).build()
    }

    /// Non-nullable field that decodes every number as an exact decimal
    pub fn decimal(name: impl Into<String>) -> Self {
        JsonFieldBuilder::new(name).decimal().build()
    }

    /// Start building a field
    pub fn builder(name: impl Into<String>) -> JsonFieldBuilder {
        JsonFieldBuilder::new(name)
    }

    /// Field name, used in log events
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The codec configuration this field was defined with
    pub fn codec(&self) -> &CodecConfig {
        &self.codec
    }

    /// Whether `Null` is stored as SQL NULL
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether a default was configured
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Convert a value into the text column representation
    ///
    /// Returns `None` (SQL NULL) for `Value::Null` on a nullable field.
    pub fn to_storage(&self, value: &Value) -> Result<Option<String>> {
        if self.nullable && value.is_null() {
            return Ok(None);
        }
        let text = self.codec.encode(value)?;
        trace!(field = %self.name, bytes = text.len(), "encoded field value");
        Ok(Some(text))
    }

    /// Convert any `Serialize` type into the text column representation
    ///
    /// [`Decimal`](jsonfield_core::Decimal) fields are written as exact
    /// number literals, not strings.
    pub fn to_storage_serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Option<String>> {
        let value = to_value(value)?;
        self.to_storage(&value)
    }

    /// Store raw bytes as a JSON string
    ///
    /// The bytes must be UTF-8; they are stored as the string they spell,
    /// not as a byte array.
    pub fn bytes_to_storage(&self, bytes: &[u8]) -> Result<Option<String>> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
            valid_up_to: e.valid_up_to(),
        })?;
        self.to_storage(&Value::from(text))
    }

    /// Convert stored text back into a value
    ///
    /// This is the load entry point: storage calls it on every fetched row.
    /// SQL NULL becomes `Value::Null`.
    pub fn from_storage(&self, stored: Option<&str>) -> Result<Value> {
        let Some(text) = stored else {
            return Ok(Value::Null);
        };
        match self.codec.decode(text) {
            Ok(value) => {
                trace!(field = %self.name, bytes = text.len(), "decoded field value");
                Ok(value)
            }
            Err(e) => {
                warn!(
                    field = %self.name,
                    bytes = text.len(),
                    offset = ?e.offset(),
                    error = %e,
                    "Stored text failed to decode"
                );
                Err(e.into())
            }
        }
    }

    /// Text form of a value for display and data dumps
    ///
    /// Unlike [`to_storage`](Self::to_storage) this always yields text, so a
    /// null value renders as `null`.
    pub fn value_to_string(&self, value: &Value) -> Result<String> {
        Ok(self.codec.encode(value)?)
    }

    /// Resolve the field default
    ///
    /// Every call returns an independent value. Without a configured default,
    /// nullable fields default to `Null` and others to the empty string.
    pub fn default_value(&self) -> Value {
        match &self.default {
            Some(default) => default.resolve(),
            None if self.nullable => Value::Null,
            None => Value::String(String::new()),
        }
    }
}

/// Builder for [`JsonField`]
///
/// # Example
///
/// ```
/// use jsonfield::{JsonField, Value};
///
/// let field = JsonField::builder("payload")
///     .nullable()
///     .decimal()
///     .default_with(|| Value::Array(Vec::new()))
///     .build();
///
/// assert_eq!(field.to_storage(&Value::Null).unwrap(), None);
/// assert_eq!(field.default_value(), Value::Array(Vec::new()));
/// ```
#[derive(Debug, Clone)]
pub struct JsonFieldBuilder {
    name: String,
    codec: CodecConfig,
    nullable: bool,
    default: Option<FieldDefault>,
}

impl JsonFieldBuilder {
    /// Create a new builder with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            codec: CodecConfig::new(),
            nullable: false,
            default: None,
        }
    }

    /// Store `Null` as SQL NULL.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Decode every number as an exact decimal.
    pub fn decimal(mut self) -> Self {
        self.codec = self.codec.with_numeric_strategy(NumericStrategy::Decimal);
        self
    }

    /// Use a complete codec configuration.
    pub fn config(mut self, config: CodecConfig) -> Self {
        self.codec = config;
        self
    }

    /// Take stored options from a settings document.
    ///
    /// Keeps the codec implementation already chosen.
    pub fn settings(mut self, settings: CodecSettings) -> Self {
        self.codec = self
            .codec
            .with_encode_options(settings.encode)
            .with_decode_options(settings.decode);
        self
    }

    /// Substitute the codec implementation.
    pub fn codec(mut self, codec: Arc<dyn JsonCodec>) -> Self {
        self.codec = self.codec.with_codec(codec);
        self
    }

    /// Stored encode options.
    pub fn encode_options(mut self, options: EncodeOptions) -> Self {
        self.codec = self.codec.with_encode_options(options);
        self
    }

    /// Stored decode options.
    pub fn decode_options(mut self, options: DecodeOptions) -> Self {
        self.codec = self.codec.with_decode_options(options);
        self
    }

    /// Fixed default, cloned on every resolution.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    /// Default produced by calling `factory` on every resolution.
    pub fn default_with<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(FieldDefault::Factory(Arc::new(factory)));
        self
    }

    /// Finish the field definition.
    pub fn build(self) -> JsonField {
        JsonField {
            name: self.name,
            codec: self.codec,
            nullable: self.nullable,
            default: self.default,
        }
    }
}

//! Codec configuration
//!
//! A [`CodecConfig`] bundles the codec implementation with the encode and
//! decode options it was defined with. It is resolved once and then shared:
//! per-call overrides are passed by reference and never written back.
//!
//! ## Thread Safety
//!
//! `CodecConfig` is `Clone + Send + Sync`. The codec is held in an `Arc`, so
//! cloning a configuration never copies codec state.

use crate::json::{
    decode_json_with, encode_json_with, CodecSettings, DecodeError, DecodeOptions, EncodeError,
    EncodeOptions, NumericStrategy,
};
use jsonfield_core::Value;
use std::fmt;
use std::sync::Arc;

/// Encode/decode capability a configuration delegates to
///
/// Implement this to substitute a different JSON implementation wholesale.
/// The options passed in are either the configuration's stored defaults or
/// the caller's per-call override, never a merge of the two.
pub trait JsonCodec: Send + Sync {
    /// Encode a value to text
    fn encode(&self, value: &Value, options: &EncodeOptions) -> Result<String, EncodeError>;

    /// Decode text to a value
    fn decode(&self, text: &str, options: &DecodeOptions) -> Result<Value, DecodeError>;

    /// Short name used in logs and `Debug` output
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// The built-in compact JSON codec
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodec;

impl JsonCodec for StandardCodec {
    fn encode(&self, value: &Value, options: &EncodeOptions) -> Result<String, EncodeError> {
        encode_json_with(value, options)
    }

    fn decode(&self, text: &str, options: &DecodeOptions) -> Result<Value, DecodeError> {
        decode_json_with(text, options)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

/// Immutable codec configuration
#[derive(Clone)]
pub struct CodecConfig {
    codec: Arc<dyn JsonCodec>,
    encode: EncodeOptions,
    decode: DecodeOptions,
}

impl CodecConfig {
    /// Standard codec, float numeric strategy
    pub fn new() -> Self {
        CodecConfig {
            codec: Arc::new(StandardCodec),
            encode: EncodeOptions::default(),
            decode: DecodeOptions::default(),
        }
    }

    /// Standard codec, decimal numeric strategy
    pub fn decimal() -> Self {
        Self::new().with_numeric_strategy(NumericStrategy::Decimal)
    }

    /// Standard codec with options taken from a settings document
    pub fn from_settings(settings: CodecSettings) -> Self {
        CodecConfig {
            codec: Arc::new(StandardCodec),
            encode: settings.encode,
            decode: settings.decode,
        }
    }

    /// Replace the codec implementation
    pub fn with_codec(mut self, codec: Arc<dyn JsonCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Replace the stored encode options
    pub fn with_encode_options(mut self, options: EncodeOptions) -> Self {
        self.encode = options;
        self
    }

    /// Replace the stored decode options
    pub fn with_decode_options(mut self, options: DecodeOptions) -> Self {
        self.decode = options;
        self
    }

    /// Set the numeric decode strategy, keeping the other decode options
    pub fn with_numeric_strategy(mut self, strategy: NumericStrategy) -> Self {
        self.decode.numbers = strategy;
        self
    }

    /// Stored encode options
    pub fn encode_options(&self) -> &EncodeOptions {
        &self.encode
    }

    /// Stored decode options
    pub fn decode_options(&self) -> &DecodeOptions {
        &self.decode
    }

    /// Numeric decode strategy
    pub fn numeric_strategy(&self) -> NumericStrategy {
        self.decode.numbers
    }

    /// Name of the codec implementation
    pub fn codec_name(&self) -> &'static str {
        self.codec.name()
    }

    /// Encode with the stored options
    pub fn encode(&self, value: &Value) -> Result<String, EncodeError> {
        self.codec.encode(value, &self.encode)
    }

    /// Encode with options that apply to this call only
    pub fn encode_with(&self, value: &Value, options: &EncodeOptions) -> Result<String, EncodeError> {
        self.codec.encode(value, options)
    }

    /// Decode with the stored options
    pub fn decode(&self, text: &str) -> Result<Value, DecodeError> {
        self.codec.decode(text, &self.decode)
    }

    /// Decode with options that apply to this call only
    pub fn decode_with(&self, text: &str, options: &DecodeOptions) -> Result<Value, DecodeError> {
        self.codec.decode(text, options)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CodecConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecConfig")
            .field("codec", &self.codec.name())
            .field("encode", &self.encode)
            .field("decode", &self.decode)
            .finish()
    }
}

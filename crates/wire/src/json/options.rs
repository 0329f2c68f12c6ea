//! Encode and decode options
//!
//! Options are plain data. They can be built in code or deserialized from a
//! settings document; every field has a default, so partial documents work.

use serde::{Deserialize, Serialize};

/// Default nesting limit for both directions
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How JSON number literals are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericStrategy {
    /// Integers that fit in `i64` become `Int`, everything else `Float`
    #[default]
    Float,
    /// Every number literal becomes an exact `Decimal`
    Decimal,
}

/// What the encoder does with NaN and the infinities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFinitePolicy {
    /// Fail with `EncodeError::NonFiniteFloat`
    #[default]
    Reject,
    /// Emit `{"$f64":"NaN|+Inf|-Inf"}`
    Wrap,
}

/// How decimals are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalFormat {
    /// Bare number literal with the exact digits, e.g. `0.30`
    #[default]
    Number,
    /// Quoted string with the exact digits, e.g. `"0.30"`
    String,
}

/// Options for a single encode call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Escape every non-ASCII character as `\uXXXX`
    pub ensure_ascii: bool,
    /// Handling of NaN and infinities
    pub non_finite: NonFinitePolicy,
    /// Representation of decimal numbers
    pub decimals: DecimalFormat,
    /// Maximum number of nested arrays/objects
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            ensure_ascii: false,
            non_finite: NonFinitePolicy::Reject,
            decimals: DecimalFormat::Number,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    /// ASCII-only output, safe for columns with a non-UTF-8 collation
    pub fn ascii() -> Self {
        EncodeOptions {
            ensure_ascii: true,
            ..Default::default()
        }
    }

    /// Wrap non-finite floats instead of rejecting them
    ///
    /// Pair with [`DecodeOptions::lossless`] to read them back.
    pub fn lossless() -> Self {
        EncodeOptions {
            non_finite: NonFinitePolicy::Wrap,
            ..Default::default()
        }
    }
}

/// Options for a single decode call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Numeric decode strategy
    pub numbers: NumericStrategy,
    /// Recognise `{"$f64": ...}` wrappers as floats
    pub special_floats: bool,
    /// Maximum number of nested arrays/objects
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            numbers: NumericStrategy::Float,
            special_floats: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Parse every number literal as an exact decimal
    pub fn decimal() -> Self {
        DecodeOptions {
            numbers: NumericStrategy::Decimal,
            ..Default::default()
        }
    }

    /// Unwrap `$f64` markers written by [`EncodeOptions::lossless`]
    pub fn lossless() -> Self {
        DecodeOptions {
            special_floats: true,
            ..Default::default()
        }
    }
}

/// Serializable bundle of both option sets
///
/// ```
/// use jsonfield_wire::{CodecSettings, NumericStrategy};
///
/// let settings: CodecSettings =
///     serde_json::from_str(r#"{"decode":{"numbers":"decimal"}}"#).unwrap();
/// assert_eq!(settings.decode.numbers, NumericStrategy::Decimal);
/// assert!(!settings.encode.ensure_ascii);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecSettings {
    /// Stored encode options
    pub encode: EncodeOptions,
    /// Stored decode options
    pub decode: DecodeOptions,
}

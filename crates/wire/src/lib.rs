//! Wire encoding for jsonfield
//!
//! This crate implements the text encoding contract for jsonfield values:
//! canonical compact JSON, with an exact-decimal numeric strategy and a
//! pluggable codec seam.
//!
//! ## Wire Encoding Rules
//!
//! | Value Type | JSON Encoding |
//! |------------|--------------|
//! | Null | `null` |
//! | Bool | `true`/`false` |
//! | Int | integer literal |
//! | Float (finite) | number with `.` or exponent |
//! | Float (non-finite) | error, or `{"$f64": "..."}` when allowed |
//! | Decimal | exact digits, e.g. `0.30` |
//! | String | `"..."` |
//! | Array | `[...]` |
//! | Object | `{...}`, keys sorted |
//!
//! ## Examples
//!
//! ```
//! use jsonfield_wire::{CodecConfig, DecodeOptions};
//! use jsonfield_core::{Decimal, Value};
//!
//! let config = CodecConfig::new();
//! let json = config.encode(&Value::Int(42)).unwrap();
//! assert_eq!(json, "42");
//!
//! // Per-call override: exact decimals for this one decode
//! let value = config.decode_with("0.3", &DecodeOptions::decimal()).unwrap();
//! assert_eq!(value, Value::Decimal(Decimal::new(3, 1)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod json;

// Re-export main types
pub use codec::{CodecConfig, JsonCodec, StandardCodec};
pub use json::{
    decode_json, decode_json_with, encode_json, encode_json_with, encode_string, to_value,
    CodecSettings, DecimalFormat, DecodeError, DecodeOptions, EncodeError, EncodeOptions,
    NonFinitePolicy, NumericStrategy, DEFAULT_MAX_DEPTH,
};

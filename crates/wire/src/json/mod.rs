//! JSON wire encoding for jsonfield values
//!
//! This module implements compact JSON encoding and strict decoding for the
//! [`Value`](jsonfield_core::Value) type. Two optional extensions exist:
//!
//! - exact decimals, selected by [`NumericStrategy::Decimal`]
//! - `{"$f64": "NaN|+Inf|-Inf"}` for non-finite floats, opt-in on both sides

mod decode;
mod encode;
mod options;
mod ser;

pub use decode::{decode_json, decode_json_with, DecodeError};
pub use encode::{encode_json, encode_json_with, encode_string, EncodeError};
pub use ser::to_value;
pub use options::{
    CodecSettings, DecimalFormat, DecodeOptions, EncodeOptions, NonFinitePolicy, NumericStrategy,
    DEFAULT_MAX_DEPTH,
};

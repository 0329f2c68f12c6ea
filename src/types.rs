//! Public types for the jsonfield API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Core value types
pub use jsonfield_core::{Decimal, ParseDecimalError, Value};

// Codec and configuration
pub use jsonfield_wire::{to_value, CodecConfig, CodecSettings, JsonCodec, StandardCodec};

// Options
pub use jsonfield_wire::{
    DecimalFormat, DecodeOptions, EncodeOptions, NonFinitePolicy, NumericStrategy,
};

// Wire errors
pub use jsonfield_wire::{DecodeError, EncodeError};

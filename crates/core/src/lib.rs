//! Core types for jsonfield
//!
//! This crate defines the [`Value`] data model shared by the wire codec and
//! the field adapter, plus the exact [`Decimal`] number it carries. It has no
//! knowledge of any text format.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decimal;
pub mod value;

pub use decimal::{Decimal, ParseDecimalError, DECIMAL_TOKEN};
pub use value::Value;

//! # jsonfield
//!
//! Structured values stored as compact JSON text.
//!
//! jsonfield converts between an in-memory [`Value`] and the canonical JSON
//! text held in a text column. Numbers can be decoded as binary floats or as
//! exact decimals, and the JSON implementation itself can be swapped out.
//!
//! ## Quick Start
//!
//! ```
//! use jsonfield::prelude::*;
//!
//! let field = JsonField::decimal("price");
//!
//! let stored = field.to_storage(&Value::Decimal(Decimal::new(1999, 2)))?;
//! assert_eq!(stored.as_deref(), Some("19.99"));
//!
//! let loaded = field.from_storage(stored.as_deref())?;
//! assert_eq!(loaded, Value::Decimal(Decimal::new(1999, 2)));
//! # Ok::<(), jsonfield::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`Value`] - the data model (`jsonfield-core`)
//! - [`CodecConfig`] - encoder, parser and their options (`jsonfield-wire`)
//! - [`JsonField`] - NULL handling, defaults and the load entry point

#![warn(missing_docs)]

mod error;
mod field;
mod types;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use field::{DefaultFactory, FieldDefault, JsonField, JsonFieldBuilder};
pub use types::*;

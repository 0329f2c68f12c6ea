//! Convenient imports for jsonfield.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```
//! use jsonfield::prelude::*;
//!
//! let field = JsonField::new("value");
//! let value = to_value(&json!({"foo": "bar"})).unwrap();
//! let stored = field.to_storage(&value).unwrap();
//! assert_eq!(stored.as_deref(), Some(r#"{"foo":"bar"}"#));
//! ```

// Main entry points
pub use crate::field::{JsonField, JsonFieldBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::types::{to_value, CodecConfig, Decimal, NumericStrategy, Value};

// Re-export serde_json for convenience
pub use serde_json::json;

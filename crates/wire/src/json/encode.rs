//! JSON encoding for jsonfield values
//!
//! Output is compact (`,` and `:` with no whitespace) and deterministic:
//! object keys are always written in sorted order.

use super::options::{DecimalFormat, EncodeOptions, NonFinitePolicy};
use jsonfield_core::{Decimal, Value};
use std::collections::HashMap;
use std::fmt::Write;
use thiserror::Error;

/// Encode error types
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    /// NaN or an infinity under `NonFinitePolicy::Reject`
    #[error("Cannot encode non-finite float: {0}")]
    NonFiniteFloat(f64),

    /// Nesting deeper than `max_depth`
    #[error("Nesting depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),

    /// An application type has no faithful Value form
    #[error("Value is not serializable: {0}")]
    Unserializable(String),
}

/// Encode a Value to JSON string with default options
pub fn encode_json(value: &Value) -> Result<String, EncodeError> {
    encode_json_with(value, &EncodeOptions::default())
}

/// Encode a Value to JSON string
pub fn encode_json_with(value: &Value, options: &EncodeOptions) -> Result<String, EncodeError> {
    let mut encoder = Encoder {
        options,
        out: String::new(),
    };
    encoder.write_value(value, 0)?;
    Ok(encoder.out)
}

/// Encode a string with proper JSON escaping
pub fn encode_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    write_string(&mut result, s, false);
    result
}

struct Encoder<'a> {
    options: &'a EncodeOptions,
    out: String,
}

impl Encoder<'_> {
    fn write_value(&mut self, value: &Value, depth: usize) -> Result<(), EncodeError> {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => {
                let _ = write!(self.out, "{}", i);
            }
            Value::Float(f) => self.write_float(*f)?,
            Value::Decimal(d) => self.write_decimal(d),
            Value::String(s) => write_string(&mut self.out, s, self.options.ensure_ascii),
            Value::Array(arr) => self.write_array(arr, depth)?,
            Value::Object(obj) => self.write_object(obj, depth)?,
        }
        Ok(())
    }

    /// Encode a float, using the $f64 wrapper for non-finite values if allowed
    fn write_float(&mut self, f: f64) -> Result<(), EncodeError> {
        if f.is_finite() {
            self.out.push_str(&format_normal_float(f));
            return Ok(());
        }
        if self.options.non_finite == NonFinitePolicy::Reject {
            return Err(EncodeError::NonFiniteFloat(f));
        }
        let marker = if f.is_nan() {
            "NaN"
        } else if f > 0.0 {
            "+Inf"
        } else {
            "-Inf"
        };
        let _ = write!(self.out, r#"{{"$f64":"{}"}}"#, marker);
        Ok(())
    }

    fn write_decimal(&mut self, d: &Decimal) {
        match self.options.decimals {
            DecimalFormat::Number => {
                let _ = write!(self.out, "{}", d);
            }
            DecimalFormat::String => {
                let _ = write!(self.out, "\"{}\"", d);
            }
        }
    }

    fn enter(&self, depth: usize) -> Result<usize, EncodeError> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(EncodeError::DepthLimitExceeded(self.options.max_depth));
        }
        Ok(depth)
    }

    fn write_array(&mut self, arr: &[Value], depth: usize) -> Result<(), EncodeError> {
        let depth = self.enter(depth)?;
        self.out.push('[');
        for (i, element) in arr.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.write_value(element, depth)?;
        }
        self.out.push(']');
        Ok(())
    }

    /// Encode an object with deterministic key ordering
    fn write_object(&mut self, obj: &HashMap<String, Value>, depth: usize) -> Result<(), EncodeError> {
        let depth = self.enter(depth)?;

        let mut entries: Vec<_> = obj.iter().collect();
        entries.sort_by_key(|(k, _)| *k);

        self.out.push('{');
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            write_string(&mut self.out, key, self.options.ensure_ascii);
            self.out.push(':');
            self.write_value(value, depth)?;
        }
        self.out.push('}');
        Ok(())
    }
}

/// Format a finite float as the shortest literal that reads back identically
///
/// Large and small magnitudes use an exponent (`1e+300`); whole values keep
/// a decimal point.
fn format_normal_float(f: f64) -> String {
    let s = match serde_json::Number::from_f64(f) {
        Some(n) => n.to_string(),
        None => f.to_string(),
    };
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{}.0", s)
    }
}

fn write_string(out: &mut String, s: &str, ensure_ascii: bool) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c < '\u{20}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c if ensure_ascii && !c.is_ascii() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

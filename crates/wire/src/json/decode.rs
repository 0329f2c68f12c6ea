//! JSON decoding for jsonfield values
//!
//! Strict RFC 8259 parser. The numeric strategy decides whether number
//! literals become binary floats or exact decimals; optionally `$f64`
//! wrappers are unwrapped back into non-finite floats.

use super::options::{DecodeOptions, NumericStrategy};
use jsonfield_core::{Decimal, Value};
use std::collections::HashMap;
use thiserror::Error;

/// Decode error types
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// Invalid JSON syntax
    #[error("Invalid JSON at byte {offset}: {reason}")]
    InvalidJson {
        /// What was wrong
        reason: String,
        /// Byte offset into the input
        offset: usize,
    },

    /// Invalid number format, or a float literal beyond the f64 range
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Number literal whose exponent is beyond the decimal scale range
    #[error("Number does not fit an exact decimal: {0}")]
    InvalidDecimal(String),

    /// Invalid value in $f64 wrapper
    #[error("Invalid $f64 value: {0}")]
    InvalidF64Wrapper(String),

    /// Unexpected end of input
    #[error("Unexpected end of input")]
    UnexpectedEnd,

    /// Unexpected character
    #[error("Unexpected character {ch:?} at byte {offset}")]
    UnexpectedChar {
        /// The offending character
        ch: char,
        /// Byte offset into the input
        offset: usize,
    },

    /// Content after the top-level value
    #[error("Trailing characters at byte {0}")]
    TrailingCharacters(usize),

    /// Nesting deeper than `max_depth`
    #[error("Nesting depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),
}

impl DecodeError {
    /// Byte offset of the failure, when the parser knows it
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::InvalidJson { offset, .. }
            | DecodeError::UnexpectedChar { offset, .. }
            | DecodeError::TrailingCharacters(offset) => Some(*offset),
            _ => None,
        }
    }
}

/// Decode a JSON string to Value with default options
pub fn decode_json(json: &str) -> Result<Value, DecodeError> {
    decode_json_with(json, &DecodeOptions::default())
}

/// Decode a JSON string to Value
pub fn decode_json_with(json: &str, options: &DecodeOptions) -> Result<Value, DecodeError> {
    let mut parser = JsonParser::new(json, options);
    parser.skip_whitespace();
    let value = parser.parse_value(0)?;
    parser.skip_whitespace();

    if parser.pos < parser.input.len() {
        return Err(DecodeError::TrailingCharacters(parser.pos));
    }
    Ok(value)
}

struct JsonParser<'a> {
    input: &'a str,
    pos: usize,
    options: &'a DecodeOptions,
}

impl<'a> JsonParser<'a> {
    fn new(input: &'a str, options: &'a DecodeOptions) -> Self {
        JsonParser {
            input,
            pos: 0,
            options,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn invalid(&self, reason: &str) -> DecodeError {
        DecodeError::InvalidJson {
            reason: reason.to_string(),
            offset: self.pos,
        }
    }

    fn unexpected(&self, ch: char) -> DecodeError {
        DecodeError::UnexpectedChar {
            ch,
            offset: self.pos,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek() {
            self.advance();
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.skip_whitespace();

        match self.peek() {
            None => Err(DecodeError::UnexpectedEnd),
            Some('n') => self.parse_literal("null", Value::Null),
            Some('t') => self.parse_literal("true", Value::Bool(true)),
            Some('f') => self.parse_literal("false", Value::Bool(false)),
            Some('"') => self.parse_string().map(Value::String),
            Some('[') => self.parse_array(depth),
            Some('{') => self.parse_object_or_wrapper(depth),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) => Err(self.unexpected(c)),
        }
    }

    fn parse_literal(&mut self, literal: &str, value: Value) -> Result<Value, DecodeError> {
        let rest = &self.input[self.pos..];
        if rest.starts_with(literal) {
            self.pos += literal.len();
            Ok(value)
        } else if literal.starts_with(rest) {
            Err(DecodeError::UnexpectedEnd)
        } else {
            Err(self.invalid(&format!("Expected '{}'", literal)))
        }
    }

    fn parse_string(&mut self) -> Result<String, DecodeError> {
        self.advance(); // consume opening quote
        let mut result = String::new();

        loop {
            match self.peek() {
                None => return Err(DecodeError::UnexpectedEnd),
                Some('"') => {
                    self.advance();
                    return Ok(result);
                }
                Some('\\') => {
                    self.advance();
                    self.parse_escape(&mut result)?;
                }
                Some(c) if c < '\u{20}' => {
                    return Err(self.invalid("Control character in string"));
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), DecodeError> {
        let c = self.peek().ok_or(DecodeError::UnexpectedEnd)?;
        let simple = match c {
            '"' => Some('"'),
            '\\' => Some('\\'),
            '/' => Some('/'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'b' => Some('\x08'),
            'f' => Some('\x0c'),
            'u' => None,
            c => return Err(self.invalid(&format!("Invalid escape: \\{}", c))),
        };
        self.advance();

        if let Some(ch) = simple {
            out.push(ch);
            return Ok(());
        }

        let unit = self.parse_hex4()?;
        let code = match unit {
            0xD800..=0xDBFF => {
                if !self.input[self.pos..].starts_with("\\u") {
                    return Err(self.invalid("Unpaired high surrogate"));
                }
                self.pos += 2;
                let low = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.invalid("Invalid low surrogate"));
                }
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(self.invalid("Unpaired low surrogate")),
            unit => u32::from(unit),
        };

        let ch = char::from_u32(code).ok_or_else(|| self.invalid("Invalid unicode codepoint"))?;
        out.push(ch);
        Ok(())
    }

    fn parse_hex4(&mut self) -> Result<u16, DecodeError> {
        let end = self.pos + 4;
        let hex = self
            .input
            .get(self.pos..end)
            .ok_or(DecodeError::UnexpectedEnd)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(self.invalid("Invalid unicode escape"));
        }
        let unit = u16::from_str_radix(hex, 16).map_err(|_| self.invalid("Invalid unicode escape"))?;
        self.pos = end;
        Ok(unit)
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
        self.pos - start
    }

    fn parse_number(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;

        if self.peek() == Some('-') {
            self.advance();
        }

        // Integer part: a single zero or a non-zero digit run
        let int_start = self.pos;
        let int_digits = self.skip_digits();
        let num_so_far = || self.input[start..self.pos].to_string();
        if int_digits == 0 {
            return Err(DecodeError::InvalidNumber(num_so_far()));
        }
        if int_digits > 1 && self.input[int_start..].starts_with('0') {
            return Err(DecodeError::InvalidNumber(num_so_far()));
        }

        let mut is_float = false;

        if self.peek() == Some('.') {
            is_float = true;
            self.advance();
            if self.skip_digits() == 0 {
                return Err(DecodeError::InvalidNumber(self.input[start..self.pos].to_string()));
            }
        }

        if let Some('e' | 'E') = self.peek() {
            is_float = true;
            self.advance();
            if let Some('+' | '-') = self.peek() {
                self.advance();
            }
            if self.skip_digits() == 0 {
                return Err(DecodeError::InvalidNumber(self.input[start..self.pos].to_string()));
            }
        }

        let num_str = &self.input[start..self.pos];

        match self.options.numbers {
            NumericStrategy::Decimal => parse_decimal(num_str).map(Value::Decimal),
            NumericStrategy::Float => parse_float_or_int(num_str, is_float),
        }
    }

    fn enter(&self, depth: usize) -> Result<usize, DecodeError> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(DecodeError::DepthLimitExceeded(self.options.max_depth));
        }
        Ok(depth)
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let depth = self.enter(depth)?;
        self.advance(); // consume '['
        self.skip_whitespace();

        let mut arr = Vec::new();

        if self.peek() == Some(']') {
            self.advance();
            return Ok(Value::Array(arr));
        }

        loop {
            arr.push(self.parse_value(depth)?);
            self.skip_whitespace();

            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(']') => {
                    self.advance();
                    return Ok(Value::Array(arr));
                }
                Some(c) => return Err(self.unexpected(c)),
                None => return Err(DecodeError::UnexpectedEnd),
            }
        }
    }

    fn parse_object_or_wrapper(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let obj = self.parse_object_raw(depth)?;

        if self.options.special_floats && obj.len() == 1 {
            if let Some(Value::String(marker)) = obj.get("$f64") {
                return decode_f64_wrapper(marker);
            }
        }

        Ok(Value::Object(obj))
    }

    fn parse_object_raw(&mut self, depth: usize) -> Result<HashMap<String, Value>, DecodeError> {
        let depth = self.enter(depth)?;
        self.advance(); // consume '{'
        self.skip_whitespace();

        let mut map = HashMap::new();

        if self.peek() == Some('}') {
            self.advance();
            return Ok(map);
        }

        loop {
            self.skip_whitespace();

            match self.peek() {
                Some('"') => {}
                None => return Err(DecodeError::UnexpectedEnd),
                Some(_) => return Err(self.invalid("Expected string key")),
            }
            let key = self.parse_string()?;

            self.skip_whitespace();

            match self.peek() {
                Some(':') => self.advance(),
                None => return Err(DecodeError::UnexpectedEnd),
                Some(_) => return Err(self.invalid("Expected ':'")),
            }

            // Duplicate keys: last one wins
            let value = self.parse_value(depth)?;
            map.insert(key, value);

            self.skip_whitespace();

            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some('}') => {
                    self.advance();
                    return Ok(map);
                }
                Some(c) => return Err(self.unexpected(c)),
                None => return Err(DecodeError::UnexpectedEnd),
            }
        }
    }
}

fn parse_float_or_int(num_str: &str, is_float: bool) -> Result<Value, DecodeError> {
    if !is_float {
        if let Ok(i) = num_str.parse::<i64>() {
            return Ok(Value::Int(i));
        }
    }
    // Integers outside the i64 range fall back to f64; overflow to an
    // infinity is an error since no finite float reads back as that literal
    match num_str.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Value::Float(f)),
        _ => Err(DecodeError::InvalidNumber(num_str.to_string())),
    }
}

/// Parse a grammar-checked number literal into an exact decimal
///
/// Every digit is kept; only an exponent that pushes the scale outside
/// `i64` fails.
fn parse_decimal(num_str: &str) -> Result<Decimal, DecodeError> {
    num_str
        .parse()
        .map_err(|_| DecodeError::InvalidDecimal(num_str.to_string()))
}

/// Decode $f64 wrapper (special floats)
fn decode_f64_wrapper(marker: &str) -> Result<Value, DecodeError> {
    let f = match marker {
        "NaN" => f64::NAN,
        "+Inf" => f64::INFINITY,
        "-Inf" => f64::NEG_INFINITY,
        "-0.0" => -0.0_f64,
        _ => return Err(DecodeError::InvalidF64Wrapper(marker.to_string())),
    };
    Ok(Value::Float(f))
}

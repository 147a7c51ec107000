//! Column type inference and typed values.
//!
//! A column's type is decided by trying conversions in a fixed priority
//! order: integer first, then float, then text. The first conversion that
//! succeeds wins, so `"0"` is an integer and `"0.0"` or `"1e3"` is a float.
//!
//! # Example
//!
//! ```
//! use csv_query::types::{detect_type, ColumnType};
//!
//! assert_eq!(detect_type("123"), ColumnType::Integer);
//! assert_eq!(detect_type("3.14"), ColumnType::Float);
//! assert_eq!(detect_type(" "), ColumnType::Text);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// The inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Signed 64-bit integers.
    Integer,
    /// 64-bit floating point numbers.
    Float,
    /// Anything that is neither an integer nor a float.
    Text,
}

impl ColumnType {
    /// Returns `true` for [`ColumnType::Integer`] and [`ColumnType::Float`].
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Lowercase name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Determine the most specific type `value` converts to.
///
/// Surrounding whitespace is ignored for the numeric attempts, but an empty
/// or whitespace-only string is always [`ColumnType::Text`]. Integers that
/// do not fit in an `i64` still parse as floats.
#[must_use]
pub fn detect_type(value: &str) -> ColumnType {
    if parse_integer(value).is_some() {
        ColumnType::Integer
    } else if parse_float(value).is_some() {
        ColumnType::Float
    } else {
        ColumnType::Text
    }
}

/// A field converted to its column's type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer value.
    Integer(i64),
    /// A floating point value.
    Float(f64),
    /// A text value, kept verbatim.
    Text(String),
}

impl Value {
    /// Convert `text` to `column_type`, or `None` if it does not fit.
    ///
    /// Text conversion never fails and keeps surrounding whitespace.
    #[must_use]
    pub fn parse(column_type: ColumnType, text: &str) -> Option<Self> {
        match column_type {
            ColumnType::Integer => parse_integer(text).map(Self::Integer),
            ColumnType::Float => parse_float(text).map(Self::Float),
            ColumnType::Text => Some(Self::Text(text.to_string())),
        }
    }

    /// Compare two values of the same variant.
    ///
    /// Returns `None` for mismatched variants and for float comparisons
    /// involving NaN.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

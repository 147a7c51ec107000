//! Comparison operators and aggregate functions.
//!
//! Both are closed enumerations parsed from their textual form with
//! [`FromStr`] and evaluated with a plain `match`.
//!
//! ```
//! use csv_query::ops::{AggregateFunc, Operator};
//!
//! let op: Operator = ">".parse().unwrap();
//! assert_eq!(op, Operator::GreaterThan);
//!
//! let func: AggregateFunc = "avg".parse().unwrap();
//! assert_eq!(func.apply(&[1.0, 2.0, 3.0]), Some(2.0));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::types::Value;

/// A binary comparison between a field and a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `=`
    Equal,
}

impl Operator {
    /// The symbol this operator is written as.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::Equal => "=",
        }
    }

    /// Evaluate `lhs <op> rhs`.
    ///
    /// Values that cannot be ordered against each other (NaN, mismatched
    /// variants) never satisfy any operator.
    #[must_use]
    pub fn evaluate(self, lhs: &Value, rhs: &Value) -> bool {
        let Some(ordering) = lhs.compare(rhs) else {
            return false;
        };
        match self {
            Self::GreaterThan => ordering == Ordering::Greater,
            Self::LessThan => ordering == Ordering::Less,
            Self::Equal => ordering == Ordering::Equal,
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Self::GreaterThan),
            "<" => Ok(Self::LessThan),
            "=" => Ok(Self::Equal),
            other => Err(Error::UnsupportedOperator {
                symbol: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A reduction over every value of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunc {
    /// Arithmetic mean.
    Avg,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
}

impl AggregateFunc {
    /// All supported functions, in the order they are documented.
    pub const ALL: [Self; 3] = [Self::Avg, Self::Min, Self::Max];

    /// The name this function is written as; also the result column name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Reduce `values`, or `None` when there is nothing to reduce.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn apply(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let result = match self {
            Self::Avg => values.iter().sum::<f64>() / values.len() as f64,
            Self::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        };
        Some(result)
    }
}

impl FromStr for AggregateFunc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avg" => Ok(Self::Avg),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(Error::UnsupportedAggregate {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AggregateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

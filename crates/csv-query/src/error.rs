//! Error types for csv-query.
//!
//! Every failure a table operation can hit is a variant of [`Error`]. None of
//! them are recoverable at the row level: the first bad row aborts the whole
//! operation.

use thiserror::Error;

use crate::ops::AggregateFunc;
use crate::types::ColumnType;

/// The main error type for table operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The comparison operator is not one of `>`, `<`, `=`.
    #[error("unsupported operator '{symbol}' (expected one of '>', '<', '=')")]
    UnsupportedOperator {
        /// The operator symbol that was supplied.
        symbol: String,
    },

    /// The aggregate function is not one of `avg`, `min`, `max`.
    #[error("unsupported aggregate function '{name}' (expected one of avg, min, max)")]
    UnsupportedAggregate {
        /// The function name that was supplied.
        name: String,
    },

    /// The referenced column is not known to the table.
    #[error("missing column '{column}'")]
    MissingColumn {
        /// Name of the column that was looked up.
        column: String,
    },

    /// A value could not be converted to the column's inferred type.
    ///
    /// Column types come from the first row only, so a later row holding a
    /// differently shaped value ends up here.
    #[error("cannot convert '{value}' in column '{column}' to {expected}")]
    InvalidValue {
        /// Column the value belongs to.
        column: String,
        /// The raw value that failed to convert.
        value: String,
        /// The inferred type of the column.
        expected: ColumnType,
    },

    /// An aggregate was requested over a column that is not numeric.
    #[error("column '{column}' is {found}, not numeric; it cannot be aggregated")]
    NonNumericColumn {
        /// Name of the column.
        column: String,
        /// The inferred type of the column.
        found: ColumnType,
    },

    /// An aggregate was requested over a table with no rows.
    #[error("cannot compute {func}({column}) over an empty table")]
    EmptyAggregate {
        /// Name of the column.
        column: String,
        /// The requested aggregate function.
        func: AggregateFunc,
    },
}

/// Convenience type alias for Results using the csv-query Error type.
pub type Result<T> = std::result::Result<T, Error>;

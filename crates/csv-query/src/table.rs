//! In-memory tables with first-row type inference.
//!
//! A [`Table`] is an ordered list of [`Row`]s plus the type of every column.
//! Column types are inferred once, from the first row, when the table is
//! built. [`Table::filter`] and [`Table::aggregate`] never touch the table
//! they are called on; they return a new one.
//!
//! # Example
//!
//! ```
//! use csv_query::table::{Row, Table};
//!
//! let rows = vec![
//!     Row::from_iter([("name", "iphone 15 pro"), ("price", "999")]),
//!     Row::from_iter([("name", "redmi note 12"), ("price", "199")]),
//! ];
//! let table = Table::new(rows);
//!
//! let cheap = table.filter("price", "<", "500").unwrap();
//! assert_eq!(cheap.len(), 1);
//!
//! let avg = table.aggregate("price", "avg").unwrap();
//! assert_eq!(avg.rows()[0].get("avg").unwrap().as_f64(), Some(599.0));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::ops::{AggregateFunc, Operator};
use crate::types::{detect_type, ColumnType, Value};

/// A single cell of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A value exactly as it was read from the source.
    Raw(String),
    /// A computed number, such as an aggregate result.
    Number(f64),
}

impl Field {
    /// The field as text. Numbers use their shortest display form.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Raw(text) => Cow::Borrowed(text),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// The field as a float, if it is or parses as one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Raw(text) => text.trim().parse().ok(),
            Self::Number(n) => Some(*n),
        }
    }

    /// The type this field would give its column.
    #[must_use]
    pub fn detect_type(&self) -> ColumnType {
        match self {
            Self::Raw(text) => detect_type(text),
            Self::Number(_) => ColumnType::Float,
        }
    }

    /// Convert the field to `column_type`.
    #[must_use]
    pub fn to_value(&self, column_type: ColumnType) -> Option<Value> {
        Value::parse(column_type, &self.as_text())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// An ordered mapping from column name to field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, Field)>,
}

impl Row {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` to `field`, keeping the column's position if it exists.
    pub fn insert(&mut self, column: impl Into<String>, field: impl Into<Field>) {
        let column = column.into();
        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = field,
            None => self.fields.push((column, field)),
        }
    }

    /// Look up a field by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, field)| field)
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// `(column, field)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Field>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, field) in iter {
            row.insert(column, field);
        }
        row
    }
}

/// Rows plus the inferred type of every column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    rows: Vec<Row>,
    column_types: HashMap<String, ColumnType>,
}

impl Table {
    /// Wrap `rows`, inferring column types from the first row.
    ///
    /// Later rows are not inspected; a value that does not match its column's
    /// type only surfaces when an operation has to convert it.
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        let column_types = rows
            .first()
            .map(|first| {
                first
                    .iter()
                    .map(|(column, field)| {
                        let column_type = field.detect_type();
                        trace!(column, %column_type, "inferred column type");
                        (column.to_string(), column_type)
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { rows, column_types }
    }

    /// The rows, in order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in the first row's order; empty for an empty table.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.columns().collect())
            .unwrap_or_default()
    }

    /// The inferred type of every column.
    #[must_use]
    pub fn column_types(&self) -> &HashMap<String, ColumnType> {
        &self.column_types
    }

    /// The inferred type of `column`, if the table knows it.
    #[must_use]
    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        self.column_types.get(column).copied()
    }

    fn require_type(&self, column: &str) -> Result<ColumnType> {
        self.column_type(column).ok_or_else(|| Error::MissingColumn {
            column: column.to_string(),
        })
    }

    /// Keep the rows where `column <operator_symbol> value` holds.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedOperator`] unless the symbol is `>`, `<` or `=`
    /// - [`Error::MissingColumn`] if the column has no inferred type
    /// - [`Error::InvalidValue`] if `value` or any row's field does not
    ///   convert to the column's type
    pub fn filter(&self, column: &str, operator_symbol: &str, value: &str) -> Result<Self> {
        let operator: Operator = operator_symbol.parse()?;
        self.filter_by(column, operator, value)
    }

    /// [`Table::filter`] with an already parsed operator.
    ///
    /// # Errors
    ///
    /// See [`Table::filter`].
    pub fn filter_by(&self, column: &str, operator: Operator, value: &str) -> Result<Self> {
        let column_type = self.require_type(column)?;
        let invalid = |raw: &str| Error::InvalidValue {
            column: column.to_string(),
            value: raw.to_string(),
            expected: column_type,
        };

        let target = Value::parse(column_type, value).ok_or_else(|| invalid(value))?;

        let mut kept = Vec::new();
        for row in &self.rows {
            let field = row.get(column).ok_or_else(|| Error::MissingColumn {
                column: column.to_string(),
            })?;
            let actual = field
                .to_value(column_type)
                .ok_or_else(|| invalid(field.as_text().as_ref()))?;
            if operator.evaluate(&actual, &target) {
                kept.push(row.clone());
            }
        }

        debug!(
            column,
            %operator,
            value,
            matched = kept.len(),
            total = self.rows.len(),
            "filtered table"
        );
        Ok(Self::new(kept))
    }

    /// Reduce `column` with the aggregate function named `func`.
    ///
    /// The result is a one-row table `{func: result}`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedAggregate`] unless `func` is `avg`, `min` or `max`
    /// - [`Error::EmptyAggregate`] if the table has no rows
    /// - [`Error::MissingColumn`] if the column has no inferred type
    /// - [`Error::NonNumericColumn`] if the column is text
    /// - [`Error::InvalidValue`] if any row's field is not a number
    pub fn aggregate(&self, column: &str, func: &str) -> Result<Self> {
        let func: AggregateFunc = func.parse()?;
        self.aggregate_by(column, func)
    }

    /// [`Table::aggregate`] with an already parsed function.
    ///
    /// # Errors
    ///
    /// See [`Table::aggregate`].
    pub fn aggregate_by(&self, column: &str, func: AggregateFunc) -> Result<Self> {
        let empty = || Error::EmptyAggregate {
            column: column.to_string(),
            func,
        };
        if self.rows.is_empty() {
            return Err(empty());
        }

        let column_type = self.require_type(column)?;
        if !column_type.is_numeric() {
            return Err(Error::NonNumericColumn {
                column: column.to_string(),
                found: column_type,
            });
        }

        let values = self
            .rows
            .iter()
            .map(|row| {
                let field = row.get(column).ok_or_else(|| Error::MissingColumn {
                    column: column.to_string(),
                })?;
                field.as_f64().ok_or_else(|| Error::InvalidValue {
                    column: column.to_string(),
                    value: field.as_text().into_owned(),
                    expected: ColumnType::Float,
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let result = func.apply(&values).ok_or_else(empty)?;
        debug!(column, %func, result, rows = values.len(), "aggregated column");

        let mut row = Row::new();
        row.insert(func.name(), result);
        let mut column_types = HashMap::with_capacity(1);
        column_types.insert(func.name().to_string(), ColumnType::Float);
        Ok(Self {
            rows: vec![row],
            column_types,
        })
    }
}

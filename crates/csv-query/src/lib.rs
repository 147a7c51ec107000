//! csv-query: filtering and aggregation over in-memory CSV tables
//!
//! This crate holds the query core of the `csv-query` tool: per-column type
//! inference, a single-comparison filter, a single-column aggregate and a
//! grid renderer. Reading files and parsing command lines live in the
//! `csv-query-cli` crate.
//!
//! # Quick Start
//!
//! ```
//! use csv_query::{Row, Table};
//!
//! let table = Table::new(vec![
//!     Row::from_iter([("name", "iphone 15 pro"), ("brand", "apple"), ("price", "999")]),
//!     Row::from_iter([("name", "galaxy s23 ultra"), ("brand", "samsung"), ("price", "1199")]),
//! ]);
//!
//! let apple = table.filter("brand", "=", "apple").unwrap();
//! assert_eq!(apple.len(), 1);
//!
//! let max = table.aggregate("price", "max").unwrap();
//! assert!(max.to_string().contains("1199"));
//! ```
//!
//! # Type Inference
//!
//! Each column gets a [`ColumnType`] from its value in the first row only:
//! integer if it parses as one, else float, else text. Later rows are never
//! re-inspected, so a stray non-numeric value in a numeric column makes
//! filters and aggregates over that column fail.
//!
//! # Error Handling
//!
//! Operations return [`Result<T, Error>`] and fail on the first problem:
//!
//! ```
//! use csv_query::{Error, Row, Table};
//!
//! let table = Table::new(vec![Row::from_iter([("name", "poco x5 pro")])]);
//! assert!(matches!(
//!     table.aggregate("name", "avg"),
//!     Err(Error::NonNumericColumn { .. })
//! ));
//! assert!(matches!(
//!     Table::new(Vec::new()).aggregate("price", "avg"),
//!     Err(Error::EmptyAggregate { .. })
//! ));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod ops;
pub mod render;
pub mod table;
pub mod types;

pub use error::{Error, Result};
pub use ops::{AggregateFunc, Operator};
pub use table::{Field, Row, Table};
pub use types::{detect_type, ColumnType, Value};

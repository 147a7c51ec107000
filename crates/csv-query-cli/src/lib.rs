//! csv-query CLI library
//!
//! This module exposes the CLI components for testing and reuse. [`run`]
//! executes one query: load the file, apply at most one filter, then at most
//! one aggregate.

pub mod args;
pub mod csv_reader;
pub mod error;
pub mod expression;

pub use error::{CliError, Phase, Result};

use std::io::Write;

use csv_query::Table;
use tracing::{debug, info_span};

use crate::args::Args;
use crate::expression::{parse_aggregate, parse_filter};

/// Run the query described by `args` and return the resulting table.
///
/// # Errors
///
/// Returns the first error hit while loading the file, parsing an
/// expression, filtering or aggregating.
pub fn run(args: &Args) -> Result<Table> {
    let path = args.input_path()?;
    let delimiter = args.delimiter_byte()?;
    let table = csv_reader::load_table(path, delimiter)?;
    apply(table, args.filter.as_deref(), args.aggregate.as_deref())
}

/// Write the rendered table, followed by a newline, to `out`.
///
/// # Errors
///
/// Returns `CliError::IoError` when `out` is closed or fails, e.g. stdout
/// piped into a reader that exits early.
pub fn write_table<W: Write>(mut out: W, table: &Table) -> Result<()> {
    writeln!(out, "{table}")?;
    out.flush()?;
    Ok(())
}

/// Apply an optional `--where` and then an optional `--aggregate`
/// expression to `table`.
///
/// # Errors
///
/// Expression and table errors come back tagged with their [`Phase`].
pub fn apply(table: Table, filter: Option<&str>, aggregate: Option<&str>) -> Result<Table> {
    let mut table = table;

    if let Some(expr) = filter {
        let _span = info_span!("filter", expr).entered();
        let parsed = parse_filter(expr)?;
        debug!(?parsed, "parsed filter expression");
        table = table
            .filter(&parsed.column, &parsed.operator, &parsed.value)
            .map_err(|e| CliError::query(Phase::Filter, e))?;
    }

    if let Some(expr) = aggregate {
        let _span = info_span!("aggregate", expr).entered();
        let parsed = parse_aggregate(expr)?;
        debug!(?parsed, "parsed aggregate expression");
        table = table
            .aggregate(&parsed.column, &parsed.func)
            .map_err(|e| CliError::query(Phase::Aggregate, e))?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv_query::{Error, Row};

    fn phones() -> Table {
        let data = [
            ["iphone 15 pro", "apple", "999", "4.9"],
            ["galaxy s23 ultra", "samsung", "1199", "4.8"],
            ["redmi note 12", "xiaomi", "199", "4.6"],
            ["poco x5 pro", "xiaomi", "299", "4.4"],
        ];
        Table::new(
            data.iter()
                .map(|values| {
                    ["name", "brand", "price", "rating"]
                        .into_iter()
                        .zip(values.iter().copied())
                        .collect::<Row>()
                })
                .collect(),
        )
    }

    #[test]
    fn test_apply_nothing_returns_input() {
        let table = phones();
        let result = apply(table.clone(), None, None).unwrap();
        assert_eq!(result, table);
    }

    #[test]
    fn test_apply_filter_then_aggregate() {
        let result = apply(phones(), Some("brand=xiaomi"), Some("price=max")).unwrap();
        assert_eq!(result.rows()[0].get("max").unwrap().as_f64(), Some(299.0));
    }

    #[test]
    fn test_apply_unsupported_operator_is_filter_error() {
        let err = apply(phones(), Some("price!=999"), None).unwrap_err();
        assert!(matches!(
            err,
            CliError::QueryError {
                phase: Phase::Filter,
                source: Error::UnsupportedOperator { .. },
            }
        ));
        assert!(err.to_string().starts_with("filter error: "));
    }

    #[test]
    fn test_apply_non_numeric_aggregate_is_aggregate_error() {
        let err = apply(phones(), None, Some("name=avg")).unwrap_err();
        assert!(matches!(
            err,
            CliError::QueryError {
                phase: Phase::Aggregate,
                source: Error::NonNumericColumn { .. },
            }
        ));
    }

    #[test]
    fn test_apply_unknown_function_is_aggregate_error() {
        let err = apply(phones(), None, Some("price=sum")).unwrap_err();
        assert!(err.to_string().starts_with("aggregate error: "));
    }

    #[test]
    fn test_apply_aggregate_over_empty_filter() {
        let err = apply(phones(), Some("price>5000"), Some("price=avg")).unwrap_err();
        assert!(matches!(
            err,
            CliError::QueryError {
                phase: Phase::Aggregate,
                source: Error::EmptyAggregate { .. },
            }
        ));
    }

    #[test]
    fn test_filter_error_skips_aggregate() {
        let err = apply(phones(), Some("weight>1"), Some("price=sum")).unwrap_err();
        assert!(matches!(
            err,
            CliError::QueryError {
                phase: Phase::Filter,
                source: Error::MissingColumn { .. },
            }
        ));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_table_appends_newline() {
        let mut out = Vec::new();
        write_table(&mut out, &phones()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('+'));
        assert!(text.ends_with("+\n"));
    }

    #[test]
    fn test_write_table_to_closed_pipe_is_an_error() {
        let err = write_table(ClosedPipe, &phones()).unwrap_err();
        assert!(matches!(err, CliError::IoError { path: None, .. }));
        assert_eq!(err.exit_code(), 1);
    }
}

//! CLI error types for file I/O, CSV parsing, expressions and query errors.
//!
//! This module provides the [`CliError`] enum which wraps every error that can
//! occur while running a query. Failures raised while filtering or aggregating
//! carry the [`Phase`] they happened in, so the message printed to stderr
//! starts with `filter error:` or `aggregate error:`.

use std::fmt;
use std::io;

/// The query step an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The `--where` step.
    Filter,
    /// The `--aggregate` step.
    Aggregate,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Filter => f.write_str("filter"),
            Phase::Aggregate => f.write_str("aggregate"),
        }
    }
}

/// CLI error type encompassing all possible error conditions.
#[derive(Debug)]
pub enum CliError {
    /// An I/O error occurred while reading the input file.
    IoError {
        /// The underlying I/O error.
        source: io::Error,
        /// Path that caused the error, if known.
        path: Option<String>,
    },
    /// The CSV data could not be parsed.
    CsvParseError {
        /// Description of the parse error.
        message: String,
        /// Line number where the error occurred, if known.
        line: Option<usize>,
    },
    /// The command line is incomplete.
    Usage {
        /// What is missing.
        message: String,
    },
    /// An invalid argument was provided.
    InvalidArgument {
        /// Name of the invalid argument.
        argument: String,
        /// Description of why it's invalid.
        reason: String,
        /// Suggestion for valid values.
        suggestion: Option<String>,
    },
    /// A `--where` or `--aggregate` expression did not match its format.
    InvalidExpression {
        /// The step the expression was meant for.
        phase: Phase,
        /// The expression as given.
        expression: String,
        /// The expected shape, e.g. `COLUMN=FUNC`.
        expected: &'static str,
    },
    /// A table operation failed.
    QueryError {
        /// The step that failed.
        phase: Phase,
        /// The underlying csv-query error.
        source: csv_query::Error,
    },
}

impl CliError {
    /// Process exit code for this error: 2 for usage problems, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage { .. } | CliError::InvalidArgument { .. } => 2,
            CliError::IoError { .. }
            | CliError::CsvParseError { .. }
            | CliError::InvalidExpression { .. }
            | CliError::QueryError { .. } => 1,
        }
    }

    /// Attach a phase to a csv-query error.
    pub fn query(phase: Phase, source: csv_query::Error) -> Self {
        CliError::QueryError { phase, source }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::IoError { source, path } => {
                if let Some(p) = path {
                    write!(f, "I/O error with file '{p}': {source}. ")?;
                    write!(
                        f,
                        "Check that the file exists and you have read permissions."
                    )
                } else {
                    write!(f, "I/O error: {source}")
                }
            }
            CliError::CsvParseError { message, line } => {
                if let Some(l) = line {
                    write!(f, "CSV parse error on line {l}: {message}")
                } else {
                    write!(f, "CSV parse error: {message}")
                }
            }
            CliError::Usage { message } => write!(f, "usage error: {message}"),
            CliError::InvalidArgument {
                argument,
                reason,
                suggestion,
            } => {
                write!(f, "Invalid argument '{argument}': {reason}")?;
                if let Some(s) = suggestion {
                    write!(f, ". {s}")?;
                }
                Ok(())
            }
            CliError::InvalidExpression {
                phase,
                expression,
                expected,
            } => write!(
                f,
                "{phase} error: invalid {phase} format '{expression}', expected {expected}"
            ),
            CliError::QueryError { phase, source } => write!(f, "{phase} error: {source}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::IoError { source, .. } => Some(source),
            CliError::QueryError { source, .. } => Some(source),
            CliError::CsvParseError { .. }
            | CliError::Usage { .. }
            | CliError::InvalidArgument { .. }
            | CliError::InvalidExpression { .. } => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::IoError {
            source: err,
            path: None,
        }
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line() as usize);
        CliError::CsvParseError {
            message: err.to_string(),
            line,
        }
    }
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Display Implementation Tests
    // ==========================================================================

    #[test]
    fn test_display_io_error_with_path() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = CliError::IoError {
            source: io_err,
            path: Some("/path/to/file.csv".to_string()),
        };

        let display = format!("{err}");
        assert!(display.contains("/path/to/file.csv"));
        assert!(display.contains("file not found"));
        assert!(display.contains("Check that the file exists"));
    }

    #[test]
    fn test_display_io_error_without_path() {
        let err = CliError::IoError {
            source: io::Error::other("disk on fire"),
            path: None,
        };

        let display = format!("{err}");
        assert!(display.contains("I/O error"));
        assert!(display.contains("disk on fire"));
    }

    #[test]
    fn test_display_csv_parse_error_with_line() {
        let err = CliError::CsvParseError {
            message: "found record with 2 fields".to_string(),
            line: Some(4),
        };

        assert_eq!(
            format!("{err}"),
            "CSV parse error on line 4: found record with 2 fields"
        );
    }

    #[test]
    fn test_display_usage() {
        let err = CliError::Usage {
            message: "a CSV file is required".to_string(),
        };
        assert_eq!(format!("{err}"), "usage error: a CSV file is required");
    }

    #[test]
    fn test_display_invalid_argument_with_suggestion() {
        let err = CliError::InvalidArgument {
            argument: "delimiter".to_string(),
            reason: "must be a single ASCII character".to_string(),
            suggestion: Some("Try ';' or '\\t'".to_string()),
        };

        let display = format!("{err}");
        assert!(display.contains("'delimiter'"));
        assert!(display.contains("single ASCII character"));
        assert!(display.contains("Try ';'"));
    }

    #[test]
    fn test_display_invalid_expression_has_phase_prefix() {
        let err = CliError::InvalidExpression {
            phase: Phase::Filter,
            expression: "age30".to_string(),
            expected: "COLUMN<OP>VALUE",
        };
        assert_eq!(
            format!("{err}"),
            "filter error: invalid filter format 'age30', expected COLUMN<OP>VALUE"
        );
    }

    #[test]
    fn test_display_query_error_has_phase_prefix() {
        let err = CliError::query(
            Phase::Aggregate,
            csv_query::Error::UnsupportedAggregate {
                name: "sum".to_string(),
            },
        );
        let display = format!("{err}");
        assert!(display.starts_with("aggregate error: "));
        assert!(display.contains("'sum'"));
    }

    // ==========================================================================
    // Exit Codes and Sources
    // ==========================================================================

    #[test]
    fn test_exit_codes() {
        let usage = CliError::Usage {
            message: String::new(),
        };
        assert_eq!(usage.exit_code(), 2);

        let query = CliError::query(
            Phase::Filter,
            csv_query::Error::MissingColumn {
                column: "x".to_string(),
            },
        );
        assert_eq!(query.exit_code(), 1);

        let io = CliError::from(io::Error::new(io::ErrorKind::NotFound, "nope"));
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err = CliError::query(
            Phase::Filter,
            csv_query::Error::MissingColumn {
                column: "x".to_string(),
            },
        );
        assert!(err.source().is_some());

        let err = CliError::Usage {
            message: "missing file".to_string(),
        };
        assert!(err.source().is_none());
    }

    #[test]
    fn test_from_csv_error() {
        let result: std::result::Result<csv::StringRecord, csv::Error> = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b\n1,2,3".as_bytes())
            .records()
            .last()
            .unwrap();

        let csv_err = result.unwrap_err();
        let cli_err: CliError = csv_err.into();
        assert!(matches!(cli_err, CliError::CsvParseError { .. }));
    }
}

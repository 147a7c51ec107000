//! Parsing of `--where` and `--aggregate` expressions.
//!
//! Both expressions are matched in full against a regular expression and
//! every captured part is trimmed:
//!
//! - filter: `(column)(operator)(value)` where the operator is one or two of
//!   `! < > =` and the column stops at the first operator character;
//! - aggregate: `(column)=(avg|min|max)`.
//!
//! The filter pattern deliberately accepts operators such as `!=` and `>=`.
//! Whether an operator is supported is decided by the table, so those fail
//! as unsupported operators rather than as malformed expressions.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CliError, Phase, Result};

const FILTER_PATTERN: &str = r"^(.+?)([!<>=]{1,2})(.+)$";
const AGGREGATE_PATTERN: &str = r"^(.+?)=(avg|min|max)$";

/// A parsed `--where` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpr {
    /// Column to compare.
    pub column: String,
    /// Operator symbol as written, e.g. `>` or `!=`.
    pub operator: String,
    /// Constant to compare against.
    pub value: String,
}

/// A parsed `--aggregate` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateExpr {
    /// Column to reduce.
    pub column: String,
    /// Aggregate function name.
    pub func: String,
}

fn filter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FILTER_PATTERN).expect("filter pattern is valid"))
}

fn aggregate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(AGGREGATE_PATTERN).expect("aggregate pattern is valid"))
}

/// Match `expr` in full and return its trimmed capture groups.
///
/// Returns `None` when the expression does not match.
pub fn parse_expression(expr: &str, pattern: &Regex) -> Option<Vec<String>> {
    let captures = pattern.captures(expr)?;
    Some(
        captures
            .iter()
            .skip(1)
            .map(|group| group.map_or_else(String::new, |m| m.as_str().trim().to_string()))
            .collect(),
    )
}

/// Parse a `--where` expression such as `price>500`.
pub fn parse_filter(expr: &str) -> Result<FilterExpr> {
    let invalid = || CliError::InvalidExpression {
        phase: Phase::Filter,
        expression: expr.to_string(),
        expected: "COLUMN<OP>VALUE",
    };
    let mut parts = parse_expression(expr, filter_regex())
        .ok_or_else(invalid)?
        .into_iter();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(column), Some(operator), Some(value)) => Ok(FilterExpr {
            column,
            operator,
            value,
        }),
        _ => Err(invalid()),
    }
}

/// Parse an `--aggregate` expression such as `rating=avg`.
pub fn parse_aggregate(expr: &str) -> Result<AggregateExpr> {
    let invalid = || CliError::InvalidExpression {
        phase: Phase::Aggregate,
        expression: expr.to_string(),
        expected: "COLUMN=FUNC with FUNC one of avg, min, max",
    };
    let mut parts = parse_expression(expr, aggregate_regex())
        .ok_or_else(invalid)?
        .into_iter();
    match (parts.next(), parts.next()) {
        (Some(column), Some(func)) => Ok(AggregateExpr { column, func }),
        _ => Err(invalid()),
    }
}

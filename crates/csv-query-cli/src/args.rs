//! CLI argument parsing module.
//!
//! This module defines the command-line interface for csv-query using clap.
//! The CLI follows the pattern:
//! `csv-query <input.csv> [-w COLUMN<OP>VALUE] [-a COLUMN=FUNC]`
//!
//! # Examples
//!
//! ```bash
//! # Print the whole table
//! csv-query phones.csv
//!
//! # Keep rows matching a comparison
//! csv-query phones.csv --where 'price>500'
//!
//! # Aggregate one column
//! csv-query phones.csv -a 'rating=avg'
//!
//! # Both, with the file given as a flag
//! csv-query -f phones.csv -w 'brand=xiaomi' -a 'price=max'
//!
//! # Semicolon-separated input
//! csv-query -d ';' phones.csv
//! ```

use clap::{ArgAction, ArgGroup, Parser};

use crate::error::{CliError, Result};

/// csv-query: filter and aggregate a CSV file from the command line
#[derive(Parser, Debug)]
#[command(name = "csv-query")]
#[command(author, version, about = "Filter and aggregate CSV files")]
#[command(long_about = "csv-query loads a CSV file, infers a type for every column \
    from its first row, applies at most one filter and at most one aggregate, \
    and prints the result as a table.")]
#[command(after_help = "Examples:\n  \
    csv-query data.csv\n  \
    csv-query data.csv --where 'age>30'\n  \
    csv-query data.csv -a 'salary=avg'\n  \
    csv-query -f data.csv -w 'name=Mike' -a 'age=max'")]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["file", "file_flag"])
))]
pub struct Args {
    /// Path to the CSV file
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Path to the CSV file (alternative to the positional argument)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file_flag: Option<String>,

    /// Filter rows: COLUMN>VALUE, COLUMN<VALUE or COLUMN=VALUE
    #[arg(short = 'w', long = "where", value_name = "COLUMN<OP>VALUE")]
    pub filter: Option<String>,

    /// Aggregate a numeric column: COLUMN=avg, COLUMN=min or COLUMN=max
    #[arg(short, long, value_name = "COLUMN=FUNC")]
    pub aggregate: Option<String>,

    /// Field delimiter of the input file
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// The CSV file to read. The positional argument wins over `--file`.
    pub fn input_path(&self) -> Result<&str> {
        self.file
            .as_deref()
            .or(self.file_flag.as_deref())
            .ok_or_else(|| CliError::Usage {
                message: "a CSV file is required, either as FILE or with --file".to_string(),
            })
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| CliError::InvalidArgument {
                argument: "delimiter".to_string(),
                reason: format!("'{}' is not a single ASCII character", self.delimiter),
                suggestion: Some("Use a delimiter such as ',' or ';'".to_string()),
            })
    }

    /// Default log directive for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

//! csv-query command-line interface
//!
//! Loads a CSV file, applies an optional filter and aggregate, and prints the
//! result as a table on stdout. Errors go to stderr with a non-zero exit code.

use std::process::ExitCode;

use csv_query_cli::args::Args;
use tracing_subscriber::EnvFilter;

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse_args();
    init_logging(args.log_level());

    let result = csv_query_cli::run(&args)
        .and_then(|table| csv_query_cli::write_table(std::io::stdout().lock(), &table));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "query failed");
            eprintln!("error: {err}");
            let code = u8::try_from(err.exit_code()).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

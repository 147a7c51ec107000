//! CSV loading module for reading a whole file into a [`Table`].
//!
//! The first record is the header and supplies the column names. Every later
//! record becomes one [`Row`] of raw string fields, keyed by those names in
//! header order. Records whose field count differs from the header are
//! rejected with the offending line number.

use crate::error::{CliError, Result};
use csv::ReaderBuilder;
use csv_query::{Row, Table};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Read every row from a CSV file into a table.
///
/// The file is opened, read to the end and closed before this returns.
///
/// # Errors
///
/// Returns `CliError::IoError` if the file cannot be opened, or
/// `CliError::CsvParseError` if the CSV is malformed.
pub fn load_table<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CliError::IoError {
        source: e,
        path: Some(path.display().to_string()),
    })?;
    let rows = read_rows(BufReader::new(file), delimiter)?;
    info!(path = %path.display(), rows = rows.len(), "loaded CSV file");
    Ok(Table::new(rows))
}

/// Parse CSV data from a reader into rows of raw string fields.
///
/// This is useful for testing or parsing from non-file sources.
pub fn read_rows<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Row>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| CliError::CsvParseError {
            message: e.to_string(),
            line: Some(1),
        })?
        .iter()
        .map(String::from)
        .collect();
    debug!(?headers, "read CSV header");

    let mut rows: Vec<Row> = Vec::new();
    for (line_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| CliError::CsvParseError {
            message: e.to_string(),
            line: e
                .position()
                .map_or(Some(line_idx + 2), |p| usize::try_from(p.line()).ok()),
        })?;
        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.as_str(), value))
                .collect(),
        );
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv_query::{ColumnType, Field};
    use std::io::Cursor;
    use std::io::Write;

    const PHONES: &str = "name,brand,price,rating\n\
                          iphone 15 pro,apple,999,4.9\n\
                          galaxy s23 ultra,samsung,1199,4.8\n\
                          redmi note 12,xiaomi,199,4.6\n\
                          poco x5 pro,xiaomi,299,4.4\n";

    #[test]
    fn test_read_rows_keeps_header_order() {
        let rows = read_rows(Cursor::new(PHONES), b',').unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0].columns().collect::<Vec<_>>(),
            vec!["name", "brand", "price", "rating"]
        );
        assert_eq!(
            rows[1].get("name"),
            Some(&Field::Raw("galaxy s23 ultra".to_string()))
        );
    }

    #[test]
    fn test_loaded_table_infers_types() {
        let table = Table::new(read_rows(Cursor::new(PHONES), b',').unwrap());
        assert_eq!(table.column_type("name"), Some(ColumnType::Text));
        assert_eq!(table.column_type("price"), Some(ColumnType::Integer));
        assert_eq!(table.column_type("rating"), Some(ColumnType::Float));
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let csv_data = "name,price\n\"  padded \", 12 \n";
        let rows = read_rows(Cursor::new(csv_data), b',').unwrap();
        assert_eq!(rows[0].get("name").unwrap().to_string(), "  padded ");
        assert_eq!(rows[0].get("price").unwrap().to_string(), " 12 ");
    }

    #[test]
    fn test_quoted_delimiters() {
        let csv_data = "name,note\n\"smith, john\",\"said \"\"hi\"\"\"\n";
        let rows = read_rows(Cursor::new(csv_data), b',').unwrap();
        assert_eq!(rows[0].get("name").unwrap().to_string(), "smith, john");
        assert_eq!(rows[0].get("note").unwrap().to_string(), "said \"hi\"");
    }

    #[test]
    fn test_custom_delimiter() {
        let csv_data = "name;price\nwidget;10\n";
        let rows = read_rows(Cursor::new(csv_data), b';').unwrap();
        assert_eq!(rows[0].get("price").unwrap().to_string(), "10");
    }

    #[test]
    fn test_header_only_csv_has_no_rows() {
        let rows = read_rows(Cursor::new("name,brand,price,rating\n"), b',').unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        let rows = read_rows(Cursor::new(""), b',').unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let csv_data = "a,b\n1,2\n3\n";
        let result = read_rows(Cursor::new(csv_data), b',');
        match result {
            Err(CliError::CsvParseError { line, .. }) => assert_eq!(line, Some(3)),
            other => panic!("Expected CsvParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_error_file_not_found() {
        let result = load_table("/nonexistent/path/to/file.csv", b',');
        match result {
            Err(CliError::IoError { path, .. }) => {
                assert!(path.unwrap().contains("nonexistent"));
            }
            other => panic!("Expected IoError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PHONES.as_bytes()).unwrap();

        let table = load_table(file.path(), b',').unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.columns(), vec!["name", "brand", "price", "rating"]);
    }
}

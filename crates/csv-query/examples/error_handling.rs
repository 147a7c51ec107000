//! Error Handling Examples
//!
//! This example walks through every way a table operation can fail.
//!
//! Run with: `cargo run --example error_handling`

use csv_query::{Error, Row, Table};

fn phones() -> Table {
    let data = [
        ("iphone 15 pro", "apple", "999"),
        ("galaxy s23 ultra", "samsung", "1199"),
        ("redmi note 12", "xiaomi", "n/a"),
    ];
    Table::new(
        data.iter()
            .map(|(name, brand, price)| {
                Row::from_iter([("name", *name), ("brand", *brand), ("price", *price)])
            })
            .collect(),
    )
}

fn report(title: &str, result: Result<Table, Error>) {
    println!("{title}:");
    match result {
        Ok(table) => println!("   Unexpected success:\n{table}"),
        Err(Error::UnsupportedOperator { symbol }) => {
            println!("   Caught UnsupportedOperator '{symbol}' (expected)");
            println!("   Fix: use one of '>', '<', '='");
        }
        Err(Error::UnsupportedAggregate { name }) => {
            println!("   Caught UnsupportedAggregate '{name}' (expected)");
            println!("   Fix: use avg, min or max");
        }
        Err(Error::MissingColumn { column }) => {
            println!("   Caught MissingColumn '{column}' (expected)");
        }
        Err(Error::NonNumericColumn { column, found }) => {
            println!("   Caught NonNumericColumn: '{column}' is {found} (expected)");
        }
        Err(Error::InvalidValue {
            column,
            value,
            expected,
        }) => {
            println!("   Caught InvalidValue: '{value}' in '{column}' is not {expected} (expected)");
            println!("   Note: column types come from the first row only");
        }
        Err(Error::EmptyAggregate { column, func }) => {
            println!("   Caught EmptyAggregate for {func}({column}) (expected)");
        }
    }
    println!();
}

fn main() {
    println!("=== Error Handling Examples ===");
    println!();

    let table = phones();

    report("1. Unsupported operator", table.filter("price", "!=", "999"));
    report("2. Unsupported aggregate", table.aggregate("price", "sum"));
    report("3. Missing column", table.filter("weight", ">", "100"));
    report("4. Non-numeric column", table.aggregate("name", "avg"));
    report("5. Value of the wrong type", table.filter("price", ">", "cheap"));
    report("6. Row of the wrong type", table.aggregate("price", "max"));
    report(
        "7. Empty table",
        Table::new(Vec::new()).aggregate("price", "avg"),
    );

    println!("=== Successful Query ===");
    match table.filter("brand", "=", "apple") {
        Ok(apple) => println!("{apple}"),
        Err(e) => println!("   Unexpected error: {e}"),
    }
}

//! SQL generation: `CREATE TABLE` + multi-row `INSERT` from either parsed
//! CSV rows or flattened JSON records.
//!
//! Every column is typed `VARCHAR(255)`. The default `Raw` quoting wraps
//! values in single quotes and leaves embedded quotes untouched;
//! `SqlQuoting::Escaped` doubles them instead. The two entry points do not
//! share a layout: the CSV path renders one column definition per line and
//! joins with `","`, the JSON path renders a single-line `CREATE TABLE` and
//! joins with `", "`.

use crate::convert::csv::CsvTable;
use crate::convert::normalize::{normalize, render_scalar};
use crate::convert::types::{ConvertError, FlatRecord, SqlProfile, SqlQuoting};

/// Table name used when the caller supplies none.
pub const DEFAULT_TABLE: &str = "json_table";

fn literal(value: &str, quoting: SqlQuoting) -> String {
    match quoting {
        SqlQuoting::Raw => format!("'{}'", value),
        SqlQuoting::Escaped => format!("'{}'", value.replace('\'', "''")),
    }
}

/// Render SQL from a parsed CSV table. Every cell is quoted as-is.
pub fn from_csv(table: &CsvTable, table_name: &str, profile: &SqlProfile) -> String {
    let mut create = format!("CREATE TABLE {} (\n", table_name);
    create.push_str(
        &table
            .columns
            .iter()
            .map(|column| format!("{} VARCHAR(255)", column))
            .collect::<Vec<_>>()
            .join(",\n"),
    );
    create.push_str("\n);\n");

    let mut insert = format!(
        "INSERT INTO {} ({}) VALUES\n",
        table_name,
        table.columns.join(",")
    );
    insert.push_str(
        &table
            .rows
            .iter()
            .map(|row| {
                let cells = row
                    .iter()
                    .map(|cell| literal(cell, profile.quoting))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("({})", cells)
            })
            .collect::<Vec<_>>()
            .join(",\n"),
    );
    insert.push_str(";\n");

    format!("{}\n{}", create, insert)
}

/// Render SQL from flattened JSON records.
///
/// Columns come from the FIRST record's keys only; later records project
/// onto them, with extra keys silently dropped and missing keys rendering
/// as empty literals.
pub fn from_json(
    records: &[FlatRecord],
    table_name: &str,
    profile: &SqlProfile,
) -> Result<String, ConvertError> {
    let first = records.first().ok_or(ConvertError::EmptyInput)?;
    let columns: Vec<&String> = first.keys().collect();

    let create = format!(
        "CREATE TABLE {} ({});",
        table_name,
        columns
            .iter()
            .map(|column| format!("{} VARCHAR(255)", column))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let mut cells = Vec::with_capacity(columns.len());
        for column in &columns {
            let rendered = match record.get(column.as_str()) {
                Some(value) => render_scalar(&normalize(value)?),
                None => String::new(),
            };
            cells.push(literal(&rendered, profile.quoting));
        }
        rows.push(format!("({})", cells.join(", ")));
    }

    let insert = format!(
        "INSERT INTO {} ({}) VALUES\n{};",
        table_name,
        columns
            .iter()
            .map(|column| column.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        rows.join(",\n")
    );

    Ok(format!("{}\n{}", create, insert))
}

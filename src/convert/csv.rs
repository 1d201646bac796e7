//! CSV codec: encode flat records to CSV text, decode CSV text back into
//! documents.
//!
//! The default (legacy) profile applies no quoting at all; a field holding
//! a comma or newline corrupts the row. RFC 4180 quoting is available as an
//! explicit opt-in on the encode side only. Decode always splits naively.

use crate::convert::normalize::{coerce_number, normalize, render_scalar};
use crate::convert::types::{ConvertError, CsvProfile, CsvQuoting, Document, FlatRecord};
use serde_json::Value;

/// A naively parsed CSV input: header columns plus raw string rows.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Encode records against an inferred column schema.
///
/// Header first, then one line per record; cells for absent columns render
/// as empty strings. Rows join with `\n`.
pub fn encode(records: &[FlatRecord], columns: &[String], profile: &CsvProfile) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);

    lines.push(
        columns
            .iter()
            .map(|column| quote_field(column, profile.quoting))
            .collect::<Vec<_>>()
            .join(","),
    );

    for record in records {
        let row = columns
            .iter()
            .map(|column| {
                let cell = record.get(column).map(render_scalar).unwrap_or_default();
                quote_field(&cell, profile.quoting)
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }

    lines.join("\n")
}

fn quote_field(field: &str, quoting: CsvQuoting) -> String {
    match quoting {
        CsvQuoting::Raw => field.to_string(),
        CsvQuoting::Rfc4180 => {
            if field.contains(',')
                || field.contains('"')
                || field.contains('\n')
                || field.contains('\r')
            {
                format!("\"{}\"", field.replace('"', "\"\""))
            } else {
                field.to_string()
            }
        }
    }
}

/// Split CSV text into header columns and data rows.
///
/// Blank lines are discarded; the first remaining line is the header. Both
/// header and rows split naively on `,` with no quoted-field support. Text
/// with no non-blank line at all is an empty input.
pub fn parse_table(text: &str) -> Result<CsvTable, ConvertError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().ok_or(ConvertError::EmptyInput)?;
    let columns = header.split(',').map(str::to_string).collect();
    let rows = lines
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect();

    Ok(CsvTable { columns, rows })
}

/// Decode CSV text into documents, rebuilding two-level keys from the
/// underscore naming convention.
///
/// A column name containing `_` splits at the first underscore into
/// key/subkey and nests; a leading underscore nests under the empty outer
/// key. Flat columns coerce fully-numeric cells to numbers; nested cells
/// stay strings. Rows shorter than the header leave flat columns unset but
/// still materialize the (possibly empty) nested map.
pub fn decode(text: &str) -> Result<Vec<Document>, ConvertError> {
    let table = parse_table(text)?;
    let mut documents = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let mut document = Document::new();

        for (index, column) in table.columns.iter().enumerate() {
            let cell = row.get(index);

            match column.split_once('_') {
                Some((key, subkey)) => {
                    let entry = document
                        .entry(key.to_string())
                        .or_insert_with(|| Value::Object(Document::new()));
                    if let (Some(cell), Value::Object(nested)) = (cell, entry) {
                        nested.insert(
                            subkey.to_string(),
                            normalize(&Value::String(cell.clone()))?,
                        );
                    }
                }
                None => {
                    if let Some(cell) = cell {
                        let value = coerce_number(cell)
                            .unwrap_or_else(|| Value::String(cell.clone()));
                        document.insert(column.clone(), value);
                    }
                }
            }
        }

        documents.push(document);
    }

    Ok(documents)
}

//! # Recast - JSON/CSV/SQL Conversion Toolkit
//!
//! A library for converting tabular document data between MongoDB-style
//! extended JSON (arrays of documents with `$oid`/`$date` wrappers), flat
//! CSV, and SQL (`CREATE TABLE` + `INSERT`) scripts.
//!
//! ## Pipelines
//!
//! - **JSON → CSV**: flatten documents, infer the column union, emit CSV
//! - **CSV → JSON**: rebuild documents, nesting `key_subkey` columns
//! - **CSV → SQL** / **JSON → SQL**: one `CREATE TABLE` + one multi-row
//!   `INSERT`, every column `VARCHAR(255)`
//!
//! ## Quick Start
//!
//! ```rust
//! use recast::convert::{json_to_csv, ConvertOptions};
//!
//! # fn main() -> Result<(), recast::convert::ConvertError> {
//! let input = r#"[
//!     {"_id": {"$oid": "abc123"}, "tags": ["a", "b"]},
//!     {"_id": {"$oid": "def456"}, "tags": ["c"]}
//! ]"#;
//!
//! let out = json_to_csv(input, &ConvertOptions::default())?;
//! assert_eq!(out.content, "_id,tags\nabc123,a-b\ndef456,c");
//! assert_eq!(out.file_name, "json_to_csv.csv");
//! # Ok(())
//! # }
//! ```
//!
//! ### SQL generation
//!
//! ```rust
//! use recast::convert::{csv_to_sql, ConvertOptions};
//!
//! # fn main() -> Result<(), recast::convert::ConvertError> {
//! let options = ConvertOptions {
//!     base_name: Some("people".to_string()),
//!     ..ConvertOptions::default()
//! };
//! let out = csv_to_sql("name,age\nAlice,30", &options)?;
//! assert!(out.content.starts_with("CREATE TABLE people"));
//! # Ok(())
//! # }
//! ```

pub mod convert;

// Re-export the conversion surface for convenience
pub use convert::{
    csv_to_json, csv_to_sql, json_to_csv, json_to_sql, Conversion, ConvertError, ConvertOptions,
    Direction,
};

/// Run one conversion by direction. Thin dispatcher over the four pipeline
/// functions, for shells that pick the direction at runtime.
pub fn convert(
    direction: Direction,
    input: &str,
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    match direction {
        Direction::JsonToCsv => json_to_csv(input, options),
        Direction::CsvToJson => csv_to_json(input, options),
        Direction::CsvToSql => csv_to_sql(input, options),
        Direction::JsonToSql => json_to_sql(input, options),
    }
}

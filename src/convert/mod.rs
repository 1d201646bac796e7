//! Conversion engine: value normalization, record flattening, column-schema
//! inference, and the four directional codecs between MongoDB extended
//! JSON, flat CSV, and SQL.

pub mod csv;
pub mod flatten;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod sql;
pub mod types;

pub use csv::CsvTable;
pub use pipeline::{
    csv_to_json, csv_to_sql, json_to_csv, json_to_csv_documents, json_to_sql,
    json_to_sql_documents, parse_documents,
};
pub use types::{
    Conversion, ConvertError, ConvertOptions, CsvProfile, CsvQuoting, Direction, Document,
    FlatRecord, SqlProfile, SqlQuoting,
};

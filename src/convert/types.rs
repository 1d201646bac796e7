use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One parsed input document. Key order is the document's own order
/// (serde_json is built with `preserve_order`).
pub type Document = serde_json::Map<String, serde_json::Value>;

/// A flattened document: one scalar per source key, same key order.
pub type FlatRecord = serde_json::Map<String, serde_json::Value>;

/// Errors a conversion can report. Every variant is terminal for the
/// invocation; no partial output is ever produced.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The parsed document collection has zero documents. Recoverable,
    /// user-visible condition.
    #[error("input contains no documents")]
    EmptyInput,

    /// The input buffer is not valid JSON (or not an array of objects).
    #[error("failed to parse JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// A `$date` wrapper held something that is not a timestamp.
    #[error("unparseable $date value: {0}")]
    InvalidDate(String),
}

/// How CSV fields are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CsvQuoting {
    /// Legacy behavior: fields are emitted verbatim. A value containing a
    /// comma or newline corrupts the row (documented limitation).
    Raw,
    /// RFC 4180: fields containing the delimiter, quotes, or newlines are
    /// double-quoted with inner quotes doubled.
    Rfc4180,
}

/// How SQL string literals are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlQuoting {
    /// Legacy behavior: single quotes around the value, embedded quotes
    /// untouched (`'O'Brien'`).
    Raw,
    /// Embedded single quotes are doubled (`'O''Brien'`).
    Escaped,
}

/// Format profile for the JSON→CSV pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvProfile {
    /// Delimiter joining array elements into one cell.
    pub array_delimiter: String,
    pub quoting: CsvQuoting,
}

impl Default for CsvProfile {
    fn default() -> Self {
        CsvProfile {
            array_delimiter: String::from("-"),
            quoting: CsvQuoting::Raw,
        }
    }
}

/// Format profile for the SQL pipelines. The array delimiter differs from
/// the CSV profile's on purpose: the two source pipelines never shared one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlProfile {
    /// Delimiter joining array elements into one value.
    pub array_delimiter: String,
    pub quoting: SqlQuoting,
}

impl Default for SqlProfile {
    fn default() -> Self {
        SqlProfile {
            array_delimiter: String::from(","),
            quoting: SqlQuoting::Raw,
        }
    }
}

/// The four directional conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    JsonToCsv,
    CsvToJson,
    CsvToSql,
    JsonToSql,
}

impl Direction {
    /// Output base name used when the caller supplies none.
    pub fn default_base_name(self) -> &'static str {
        match self {
            Direction::JsonToCsv => "json_to_csv",
            Direction::CsvToJson => "csv_to_json",
            Direction::CsvToSql => "csv_to_sql",
            Direction::JsonToSql => "json_to_sql",
        }
    }

    /// Suggested file extension for the output.
    pub fn extension(self) -> &'static str {
        match self {
            Direction::JsonToCsv => "csv",
            Direction::CsvToJson => "json",
            Direction::CsvToSql | Direction::JsonToSql => "sql",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(self) -> &'static str {
        match self {
            Direction::JsonToCsv => "text/csv",
            Direction::CsvToJson => "application/json",
            Direction::CsvToSql | Direction::JsonToSql => "text/sql",
        }
    }
}

/// Caller-supplied parameters for one conversion. The optional base name is
/// the only state the surrounding shell holds between invocations; it also
/// doubles as the SQL table name unless `table_name` overrides it.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub base_name: Option<String>,
    pub table_name: Option<String>,
    pub csv: CsvProfile,
    pub sql: SqlProfile,
}

impl ConvertOptions {
    /// Full output file name for the given direction.
    pub fn file_name(&self, direction: Direction) -> String {
        let base = self
            .base_name
            .as_deref()
            .unwrap_or_else(|| direction.default_base_name());
        format!("{}.{}", base, direction.extension())
    }

    /// Table name for the SQL pipelines: explicit override, then the output
    /// base name, then the fixed default.
    pub fn table(&self) -> &str {
        self.table_name
            .as_deref()
            .or(self.base_name.as_deref())
            .unwrap_or(crate::convert::sql::DEFAULT_TABLE)
    }
}

/// The result handed back to the shell: output text plus the name and MIME
/// type to persist it under.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub content: String,
    pub file_name: String,
    pub mime_type: &'static str,
}

impl Conversion {
    pub fn new(content: String, direction: Direction, options: &ConvertOptions) -> Self {
        Conversion {
            content,
            file_name: options.file_name(direction),
            mime_type: direction.mime_type(),
        }
    }
}

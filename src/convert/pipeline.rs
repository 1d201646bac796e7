//! The four directional conversion pipelines.
//!
//! Each pipeline is a pure, single-pass function of its input text and a
//! [`ConvertOptions`], returning the output text bundled with the file name
//! and MIME type the shell should persist it under. The `*_documents`
//! variants accept an already-parsed collection, for callers that parse the
//! input themselves.

use crate::convert::csv;
use crate::convert::flatten::flatten_all;
use crate::convert::schema::infer_columns;
use crate::convert::sql;
use crate::convert::types::{Conversion, ConvertError, ConvertOptions, Direction, Document};

/// Parse a JSON array of documents.
pub fn parse_documents(input: &str) -> Result<Vec<Document>, ConvertError> {
    Ok(serde_json::from_str(input)?)
}

/// JSON → CSV.
pub fn json_to_csv(input: &str, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    json_to_csv_documents(&parse_documents(input)?, options)
}

/// JSON → CSV over an already-parsed collection.
pub fn json_to_csv_documents(
    documents: &[Document],
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    if documents.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    let records = flatten_all(documents, &options.csv.array_delimiter)?;
    let columns = infer_columns(&records)?;
    let content = csv::encode(&records, &columns, &options.csv);
    Ok(Conversion::new(content, Direction::JsonToCsv, options))
}

/// CSV → JSON. Output is pretty-printed with two-space indentation.
pub fn csv_to_json(input: &str, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    let documents = csv::decode(input)?;
    if documents.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    let content = serde_json::to_string_pretty(&documents)?;
    Ok(Conversion::new(content, Direction::CsvToJson, options))
}

/// CSV → SQL.
pub fn csv_to_sql(input: &str, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    let table = csv::parse_table(input)?;
    if table.rows.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    let content = sql::from_csv(&table, options.table(), &options.sql);
    Ok(Conversion::new(content, Direction::CsvToSql, options))
}

/// JSON → SQL.
pub fn json_to_sql(input: &str, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    json_to_sql_documents(&parse_documents(input)?, options)
}

/// JSON → SQL over an already-parsed collection.
pub fn json_to_sql_documents(
    documents: &[Document],
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    if documents.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    let records = flatten_all(documents, &options.sql.array_delimiter)?;
    let content = sql::from_json(&records, options.table(), &options.sql)?;
    Ok(Conversion::new(content, Direction::JsonToSql, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MONGO_EXPORT: &str = r#"[
        {"_id": {"$oid": "abc123"}, "tags": ["a", "b"]},
        {"_id": {"$oid": "def456"}, "tags": ["c"]}
    ]"#;

    #[test]
    fn test_json_to_csv_end_to_end() {
        let out = json_to_csv(MONGO_EXPORT, &ConvertOptions::default()).unwrap();
        assert_eq!(out.content, "_id,tags\nabc123,a-b\ndef456,c");
        assert_eq!(out.file_name, "json_to_csv.csv");
        assert_eq!(out.mime_type, "text/csv");
    }

    #[test]
    fn test_json_to_sql_uses_comma_join() {
        let out = json_to_sql(MONGO_EXPORT, &ConvertOptions::default()).unwrap();
        assert_eq!(
            out.content,
            "CREATE TABLE json_table (_id VARCHAR(255), tags VARCHAR(255));\n\
             INSERT INTO json_table (_id, tags) VALUES\n\
             ('abc123', 'a,b'),\n\
             ('def456', 'c');"
        );
        assert_eq!(out.file_name, "json_to_sql.sql");
        assert_eq!(out.mime_type, "text/sql");
    }

    #[test]
    fn test_empty_json_array_is_empty_input() {
        for result in [
            json_to_csv("[]", &ConvertOptions::default()),
            json_to_sql("[]", &ConvertOptions::default()),
        ] {
            assert!(matches!(result, Err(ConvertError::EmptyInput)));
        }
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        assert!(matches!(
            json_to_csv("not json", &ConvertOptions::default()),
            Err(ConvertError::Json(_))
        ));
    }

    #[test]
    fn test_csv_to_json_pretty_prints() {
        let out = csv_to_json("name,age\nAlice,30\n", &ConvertOptions::default()).unwrap();
        let expected = serde_json::to_string_pretty(&json!([{"name": "Alice", "age": 30}]))
            .unwrap();
        assert_eq!(out.content, expected);
        assert_eq!(out.file_name, "csv_to_json.json");
        assert_eq!(out.mime_type, "application/json");
    }

    #[test]
    fn test_csv_to_sql_table_name_from_base_name() {
        let options = ConvertOptions {
            base_name: Some(String::from("people")),
            ..ConvertOptions::default()
        };
        let out = csv_to_sql("name\nAlice\n", &options).unwrap();
        assert!(out.content.starts_with("CREATE TABLE people (\n"));
        assert_eq!(out.file_name, "people.sql");
    }

    #[test]
    fn test_csv_without_rows_is_empty_input() {
        for result in [
            csv_to_json("name,age\n", &ConvertOptions::default()),
            csv_to_sql("name,age\n", &ConvertOptions::default()),
            csv_to_json("", &ConvertOptions::default()),
        ] {
            assert!(matches!(result, Err(ConvertError::EmptyInput)));
        }
    }

    // Schema stability: the emitted header always equals the inferred
    // column union.
    #[test]
    fn test_header_matches_inferred_schema() {
        let options = ConvertOptions::default();
        let documents = parse_documents(
            r#"[{"b": 1, "a": 2}, {"c": {"$oid": "x"}, "a": 3}]"#,
        )
        .unwrap();
        let out = json_to_csv_documents(&documents, &options).unwrap();

        let records = flatten_all(&documents, &options.csv.array_delimiter).unwrap();
        let columns = infer_columns(&records).unwrap();
        let header = csv::parse_table(&out.content).unwrap().columns;
        assert_eq!(header, columns);
    }

    // CSV→JSON→CSV is idempotent as long as no value holds a delimiter.
    #[test]
    fn test_csv_round_trip_without_delimiters() {
        let input_csv = "name,age\nAlice,30\nBob,25";
        let options = ConvertOptions::default();

        let json = csv_to_json(input_csv, &options).unwrap();
        let back = json_to_csv(&json.content, &options).unwrap();
        assert_eq!(back.content, input_csv);
    }

    // With an embedded comma the round trip corrupts, per the legacy
    // no-quoting profile.
    #[test]
    fn test_csv_round_trip_with_embedded_comma_corrupts() {
        let documents = parse_documents(r#"[{"note": "a,b", "next": "c"}]"#).unwrap();
        let options = ConvertOptions::default();

        let csv_out = json_to_csv_documents(&documents, &options).unwrap();
        let json_out = csv_to_json(&csv_out.content, &options).unwrap();
        let reparsed = parse_documents(&json_out.content).unwrap();
        assert_eq!(reparsed[0].get("note").unwrap(), &json!("a"));
        assert_ne!(&reparsed, &documents);
    }
}

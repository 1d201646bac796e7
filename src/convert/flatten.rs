//! Record flattening: one document in, one single-level record out.

use crate::convert::normalize::{normalize, render_scalar};
use crate::convert::types::{ConvertError, Document, FlatRecord};
use serde_json::Value;

/// Flatten one document, walking keys in document order.
///
/// Array values normalize each element and join the rendered pieces with
/// `array_delimiter` (the CSV and SQL pipelines pass different delimiters).
/// Every other value stores `normalize(value)` un-stringified so numeric
/// typing survives for later decisions.
pub fn flatten(document: &Document, array_delimiter: &str) -> Result<FlatRecord, ConvertError> {
    let mut record = FlatRecord::new();

    for (key, value) in document {
        match value {
            Value::Array(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.push(render_scalar(&normalize(item)?));
                }
                record.insert(key.clone(), Value::String(parts.join(array_delimiter)));
            }
            other => {
                record.insert(key.clone(), normalize(other)?);
            }
        }
    }

    Ok(record)
}

/// Flatten a whole collection, one record per document.
pub fn flatten_all(
    documents: &[Document],
    array_delimiter: &str,
) -> Result<Vec<FlatRecord>, ConvertError> {
    documents
        .iter()
        .map(|document| flatten(document, array_delimiter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_scalars_kept_untouched() {
        let doc = document(json!({"name": "Alice", "age": 30, "active": true}));
        let record = flatten(&doc, "-").unwrap();

        assert_eq!(record.get("name").unwrap(), &json!("Alice"));
        assert_eq!(record.get("age").unwrap(), &json!(30));
        assert_eq!(record.get("active").unwrap(), &json!(true));
    }

    #[test]
    fn test_wrappers_unwrap() {
        let doc = document(json!({
            "_id": {"$oid": "abc123"},
            "created": {"$date": "2020-01-01T00:00:00Z"}
        }));
        let record = flatten(&doc, "-").unwrap();

        assert_eq!(record.get("_id").unwrap(), &json!("abc123"));
        assert_eq!(
            record.get("created").unwrap(),
            &json!("2020-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_array_joins_with_csv_delimiter() {
        let doc = document(json!({"tags": ["a", "b", "c"]}));
        let record = flatten(&doc, "-").unwrap();
        assert_eq!(record.get("tags").unwrap(), &json!("a-b-c"));
    }

    #[test]
    fn test_array_joins_with_sql_delimiter() {
        let doc = document(json!({"tags": ["a", "b", "c"]}));
        let record = flatten(&doc, ",").unwrap();
        assert_eq!(record.get("tags").unwrap(), &json!("a,b,c"));
    }

    #[test]
    fn test_array_elements_normalize_before_joining() {
        let doc = document(json!({
            "ids": [{"$oid": "abc"}, {"$oid": "def"}],
            "counts": [1, 2, 3]
        }));
        let record = flatten(&doc, "-").unwrap();

        assert_eq!(record.get("ids").unwrap(), &json!("abc-def"));
        assert_eq!(record.get("counts").unwrap(), &json!("1-2-3"));
    }

    #[test]
    fn test_non_wrapper_object_passes_through() {
        let doc = document(json!({"address": {"street": "Main St"}}));
        let record = flatten(&doc, "-").unwrap();
        assert_eq!(record.get("address").unwrap(), &json!({"street": "Main St"}));
    }

    #[test]
    fn test_key_order_preserved() {
        let doc = document(json!({"z": 1, "a": 2, "m": 3}));
        let record = flatten(&doc, "-").unwrap();
        let keys: Vec<&String> = record.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_record_count_matches_input() {
        let docs = vec![
            document(json!({"a": 1})),
            document(json!({"b": 2})),
            document(json!({"c": 3})),
        ];
        assert_eq!(flatten_all(&docs, "-").unwrap().len(), 3);
    }
}

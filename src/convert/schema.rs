//! Column-schema inference over a collection of flat records.

use crate::convert::normalize::{normalize, render_scalar};
use crate::convert::types::{ConvertError, FlatRecord};
use std::collections::HashSet;

/// Derive the ordered, de-duplicated union of column names.
///
/// Records are walked in order, keys in record order, columns inserted at
/// first sight. The column name is `"<key>_<normalized>"` whenever the
/// normalized form of the stored value differs from the value itself,
/// otherwise the bare key. Flattening already normalized every stored
/// value, so on flattened input the suffix branch is inert.
pub fn infer_columns(records: &[FlatRecord]) -> Result<Vec<String>, ConvertError> {
    let mut columns = Vec::new();
    let mut seen = HashSet::new();

    for record in records {
        for (key, value) in record {
            let normalized = normalize(value)?;
            let column = if &normalized != value {
                format!("{}_{}", key, render_scalar(&normalized))
            } else {
                key.clone()
            };
            if seen.insert(column.clone()) {
                columns.push(column);
            }
        }
    }

    Ok(columns)
}

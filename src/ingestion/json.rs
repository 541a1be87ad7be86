//! JSON survey loading.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"Country":"France"}, {"Country":"Spain"}]`
//! - A single JSON object (one record)
//! - Newline-delimited JSON (NDJSON): `{"Country":"France"}\n{"Country":"Spain"}\n`
//!
//! Records keep their raw values; nothing is validated here beyond "each row is an object".

use std::fs;
use std::path::Path;

use crate::error::{SurveyError, SurveyResult};
use crate::types::{SurveyDataSet, SurveyRecord};

/// Load survey records from a JSON file.
pub fn load_records_from_path(path: impl AsRef<Path>) -> SurveyResult<SurveyDataSet> {
    let text = fs::read_to_string(path)?;
    load_records_from_str(&text)
}

/// Load survey records from an in-memory JSON string.
pub fn load_records_from_str(input: &str) -> SurveyResult<SurveyDataSet> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SurveyError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => records_from_values(items),
            serde_json::Value::Object(_) => records_from_values(vec![v]),
            _ => Err(SurveyError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        // Fall back to NDJSON.
        let mut values = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let v = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
                SurveyError::SchemaMismatch {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                }
            })?;
            values.push(v);
        }
        records_from_values(values)
    }
}

fn records_from_values(values: Vec<serde_json::Value>) -> SurveyResult<SurveyDataSet> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx0, v)| match v {
            serde_json::Value::Object(map) => Ok(SurveyRecord::from_map(map)),
            _ => Err(SurveyError::SchemaMismatch {
                message: format!("row {} is not a json object", idx0 + 1),
            }),
        })
        .collect::<SurveyResult<Vec<_>>>()
        .map(SurveyDataSet::new)
}

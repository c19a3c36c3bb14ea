//! Schema-free tabular view over hit records
//!
//! The annotation service decides which fields a hit carries. A `HitTable`
//! turns a list of JSON objects into columns and rows without assuming any
//! of them: columns are the union of record keys in the order they are first
//! seen, and a record missing a column gets `null` in that cell.

use crate::error::{FunfamError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rows of hit records with a column list derived from their keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl HitTable {
    /// Build a table from raw hit records.
    ///
    /// Every record must be a JSON object; anything else is reported with its
    /// index so the offending hit can be found in the raw response.
    pub fn from_records(records: &[Value]) -> Result<Self> {
        let mut objects = Vec::with_capacity(records.len());
        let mut columns: Vec<String> = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or_else(|| FunfamError::MalformedRecord {
                index,
                reason: format!("expected an object, found {}", json_type_name(record)),
            })?;

            for key in object.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
            objects.push(object);
        }

        let rows = objects
            .into_iter()
            .map(|object| {
                columns
                    .iter()
                    .map(|column| object.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows re-keyed by column name
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect::<Map<String, Value>>()
            })
            .collect()
    }

    /// Render as CSV with a header line
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        if self.columns.is_empty() {
            return output;
        }

        let header: Vec<String> = self.columns.iter().map(|c| csv_escape(c)).collect();
        output.push_str(&header.join(","));
        output.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|v| csv_escape(&cell_text(v))).collect();
            output.push_str(&cells.join(","));
            output.push('\n');
        }

        output
    }
}

/// Text of a single cell. Nested values are kept as compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Escape CSV value
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// JSON Format Support (Save/Load Operations)
// ============================================================================
//
// Human-readable persistence with a versioned metadata header. Cell
// encoding is driven by the declared column type, so load never guesses:
// Missing is JSON null, non-finite floats are tagged strings (JSON has no
// NaN literal), temporal values are their canonical text forms.

use std::io::{Read, Write};

use reframe_types::{DataType, Value};
use serde::{Deserialize, Serialize};

use crate::{Column, Table, TableError};

const FORMAT_VERSION: &str = "1";

/// Root JSON document structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDocument {
    /// Metadata about the format
    pub reframe: JsonMetadata,
    /// Columns in table order
    pub columns: Vec<JsonColumn>,
}

/// Format metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonMetadata {
    /// Format version (for future compatibility)
    pub version: String,
    /// Timestamp when exported
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// One column: name, declared type, and cell values
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonColumn {
    pub name: String,
    pub dtype: JsonDataType,
    pub values: Vec<serde_json::Value>,
}

/// Wire form of DataType
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonDataType {
    Integer,
    Float,
    Boolean,
    Text,
    Categorical { levels: Vec<String> },
    Date,
    Timestamp,
}

impl From<&DataType> for JsonDataType {
    fn from(dtype: &DataType) -> Self {
        match dtype {
            DataType::Integer => JsonDataType::Integer,
            DataType::Float => JsonDataType::Float,
            DataType::Boolean => JsonDataType::Boolean,
            DataType::Text => JsonDataType::Text,
            DataType::Categorical { levels } => {
                JsonDataType::Categorical { levels: levels.clone() }
            }
            DataType::Date => JsonDataType::Date,
            DataType::Timestamp => JsonDataType::Timestamp,
        }
    }
}

impl From<JsonDataType> for DataType {
    fn from(dtype: JsonDataType) -> Self {
        match dtype {
            JsonDataType::Integer => DataType::Integer,
            JsonDataType::Float => DataType::Float,
            JsonDataType::Boolean => DataType::Boolean,
            JsonDataType::Text => DataType::Text,
            JsonDataType::Categorical { levels } => DataType::Categorical { levels },
            JsonDataType::Date => DataType::Date,
            JsonDataType::Timestamp => DataType::Timestamp,
        }
    }
}

fn encode_cell(value: &Value) -> serde_json::Value {
    use serde_json::Value as J;
    match value {
        Value::Missing => J::Null,
        Value::Integer(i) => J::from(*i),
        Value::Float(f) if f.is_finite() => J::from(*f),
        // JSON has no NaN/Infinity literals
        Value::Float(f) if f.is_nan() => J::from("NaN"),
        Value::Float(f) if *f > 0.0 => J::from("Infinity"),
        Value::Float(_) => J::from("-Infinity"),
        Value::Boolean(b) => J::from(*b),
        Value::Text(s) => J::from(s.as_str()),
        Value::Categorical { label, .. } => J::from(label.as_str()),
        Value::Date(d) => J::from(d.to_string()),
        Value::Timestamp(ts) => J::from(ts.to_string()),
    }
}

fn decode_cell(cell: &serde_json::Value, dtype: &DataType, column: &str) -> Result<Value, TableError> {
    use serde_json::Value as J;

    let fail = || TableError::Format(format!("cannot decode {} as {} in column '{}'", cell, dtype, column));

    if cell.is_null() {
        return Ok(Value::Missing);
    }

    match dtype {
        DataType::Integer => cell.as_i64().map(Value::Integer).ok_or_else(fail),
        DataType::Float => match cell {
            J::Number(n) => n.as_f64().map(Value::Float).ok_or_else(fail),
            J::String(s) => match s.as_str() {
                "NaN" => Ok(Value::Float(f64::NAN)),
                "Infinity" => Ok(Value::Float(f64::INFINITY)),
                "-Infinity" => Ok(Value::Float(f64::NEG_INFINITY)),
                _ => Err(fail()),
            },
            _ => Err(fail()),
        },
        DataType::Boolean => cell.as_bool().map(Value::Boolean).ok_or_else(fail),
        DataType::Text => cell.as_str().map(|s| Value::Text(s.to_string())).ok_or_else(fail),
        DataType::Categorical { levels } => {
            let label = cell.as_str().ok_or_else(fail)?;
            Value::categorical(label, levels).ok_or_else(fail)
        }
        DataType::Date => {
            let s = cell.as_str().ok_or_else(fail)?;
            Ok(Value::Date(s.parse().map_err(TableError::Type)?))
        }
        DataType::Timestamp => {
            let s = cell.as_str().ok_or_else(fail)?;
            Ok(Value::Timestamp(s.parse().map_err(TableError::Type)?))
        }
    }
}

impl Table {
    /// Write this table as a JSON document
    pub fn save_json<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let columns = self
            .names()
            .iter()
            .map(|name| {
                let column = self.column(name)?;
                Ok(JsonColumn {
                    name: name.clone(),
                    dtype: column.dtype().into(),
                    values: column.iter().map(encode_cell).collect(),
                })
            })
            .collect::<Result<Vec<_>, TableError>>()?;

        let doc = JsonDocument {
            reframe: JsonMetadata {
                version: FORMAT_VERSION.to_string(),
                timestamp: chrono::Utc::now(),
            },
            columns,
        };

        serde_json::to_writer_pretty(writer, &doc)?;
        Ok(())
    }

    /// Read a table back from a JSON document
    pub fn load_json<R: Read>(reader: R) -> Result<Table, TableError> {
        let doc: JsonDocument = serde_json::from_reader(reader)?;

        if doc.reframe.version != FORMAT_VERSION {
            log::warn!(
                "loading document with format version {} (current is {})",
                doc.reframe.version,
                FORMAT_VERSION
            );
        }

        let columns = doc
            .columns
            .into_iter()
            .map(|jc| {
                let dtype: DataType = jc.dtype.into();
                let values = jc
                    .values
                    .iter()
                    .map(|cell| decode_cell(cell, &dtype, &jc.name))
                    .collect::<Result<Vec<_>, _>>()?;
                let column = Column::new(dtype, values).map_err(|e| e.with_column(&jc.name))?;
                Ok((jc.name, column))
            })
            .collect::<Result<Vec<_>, TableError>>()?;

        Table::new(columns)
    }
}

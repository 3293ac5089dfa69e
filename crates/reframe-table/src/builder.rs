//! Ingestion boundary
//!
//! Collaborators that extract records from external sources (spreadsheets,
//! OCR output, survey files) hand the engine a typed column declaration
//! plus row values. Everything source-format-specific stays on their side;
//! this builder only checks arity and types.

use reframe_types::{DataType, Value};

use crate::{Column, Table, TableError};

/// Accumulates typed rows into a Table
#[derive(Debug, Clone)]
pub struct TableBuilder {
    names: Vec<String>,
    dtypes: Vec<DataType>,
    columns: Vec<Vec<Value>>,
}

impl TableBuilder {
    /// Declare the column layout: unique names with their types
    pub fn new(columns: Vec<(&str, DataType)>) -> Result<TableBuilder, TableError> {
        let mut names: Vec<String> = Vec::with_capacity(columns.len());
        let mut dtypes = Vec::with_capacity(columns.len());
        for (name, dtype) in columns {
            if names.iter().any(|n| n == name) {
                return Err(TableError::DuplicateColumn(name.to_string()));
            }
            names.push(name.to_string());
            dtypes.push(dtype);
        }
        let cols = vec![Vec::new(); names.len()];
        Ok(TableBuilder { names, dtypes, columns: cols })
    }

    /// Append one row; values must match the declared arity and types
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<&mut Self, TableError> {
        if values.len() != self.names.len() {
            return Err(TableError::RowArityMismatch {
                expected: self.names.len(),
                actual: values.len(),
            });
        }
        for (i, value) in values.iter().enumerate() {
            if !value.matches_type(&self.dtypes[i]) {
                return Err(TableError::TypeMismatch {
                    column: self.names[i].clone(),
                    expected: self.dtypes[i].to_string(),
                    actual: value.type_name().to_string(),
                });
            }
        }
        for (i, value) in values.into_iter().enumerate() {
            self.columns[i].push(value);
        }
        Ok(self)
    }

    pub fn finish(self) -> Result<Table, TableError> {
        let columns = self
            .names
            .into_iter()
            .zip(self.dtypes)
            .zip(self.columns)
            .map(|((name, dtype), values)| {
                // Values were validated on push, so this cannot fail on types
                Column::new(dtype, values).map(|c| (name, c))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Table::new(columns)
    }
}

// ============================================================================
// Column
// ============================================================================

use reframe_types::{DataType, Value};

use crate::TableError;

/// Typed, nullable vector storage - the atomic unit of data.
///
/// Every element is either a concrete value of the declared type or
/// `Value::Missing`. The declared type never changes because a cell is
/// missing; it changes only through an explicit, whole-column `cast`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    dtype: DataType,
    values: Vec<Value>,
}

impl Column {
    /// Construct a column, validating every value against the declared type
    pub fn new(dtype: DataType, values: Vec<Value>) -> Result<Self, TableError> {
        for value in &values {
            if !value.matches_type(&dtype) {
                return Err(TableError::TypeMismatch {
                    column: String::new(),
                    expected: dtype.to_string(),
                    actual: value.type_name().to_string(),
                });
            }
        }
        Ok(Column { dtype, values })
    }

    pub fn dtype(&self) -> &DataType {
        &self.dtype
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// New column with the value at `index` replaced
    pub fn with_replaced(&self, index: usize, value: Value) -> Result<Column, TableError> {
        if index >= self.values.len() {
            return Err(TableError::LengthMismatch {
                column: String::new(),
                expected: self.values.len(),
                actual: index,
            });
        }
        if !value.matches_type(&self.dtype) {
            return Err(TableError::TypeMismatch {
                column: String::new(),
                expected: self.dtype.to_string(),
                actual: value.type_name().to_string(),
            });
        }
        let mut values = self.values.clone();
        values[index] = value;
        Ok(Column { dtype: self.dtype.clone(), values })
    }

    /// Cast the whole column to a target type.
    ///
    /// Atomic: the first value that cannot be converted fails the whole
    /// cast and the original column is untouched.
    pub fn cast(&self, target: &DataType) -> Result<Column, TableError> {
        let values = self
            .values
            .iter()
            .map(|v| v.cast(target))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Column { dtype: target.clone(), values })
    }

    /// New column keeping only the rows at `indices`, in that order
    pub(crate) fn take(&self, indices: &[usize]) -> Column {
        let values = indices.iter().map(|&i| self.values[i].clone()).collect();
        Column { dtype: self.dtype.clone(), values }
    }

    pub(crate) fn append(&mut self, other: &Column) {
        self.values.extend(other.values.iter().cloned());
    }
}

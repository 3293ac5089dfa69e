//! Row-wise concatenation
//!
//! A thin structural wrapper used by multi-file ingestion: stack tables
//! with identical column sets. Not a join and not a reshape - column sets
//! must match exactly (names and types), though order may differ.

use crate::{Column, Table, TableError};

impl Table {
    /// Concatenate `others` below `self`, matching columns by name.
    ///
    /// Every table must carry exactly the columns of `self` with identical
    /// types; the output uses `self`'s column order and is ungrouped.
    pub fn bind_rows(&self, others: &[&Table]) -> Result<Table, TableError> {
        let mut combined: Vec<(String, Column)> = self
            .names()
            .iter()
            .map(|name| Ok((name.clone(), self.column(name)?.clone())))
            .collect::<Result<Vec<_>, TableError>>()?;

        for other in others {
            if other.n_cols() != self.n_cols() {
                return Err(TableError::ShapeMismatch(format!(
                    "expected columns ({}), got ({})",
                    self.names().join(", "),
                    other.names().join(", ")
                )));
            }
            for (name, column) in combined.iter_mut() {
                let incoming = other.column(name).map_err(|_| {
                    TableError::ShapeMismatch(format!(
                        "column '{}' missing from bound table (has: {})",
                        name,
                        other.names().join(", ")
                    ))
                })?;
                if incoming.dtype() != column.dtype() {
                    return Err(TableError::ShapeMismatch(format!(
                        "column '{}' is {} in one table and {} in another",
                        name,
                        column.dtype(),
                        incoming.dtype()
                    )));
                }
                column.append(incoming);
            }
        }

        Table::new(combined)
    }
}

#[cfg(test)]
mod tests {
    use reframe_types::{DataType, Value};

    use super::*;

    fn t(names: &[(&str, DataType)], rows: Vec<Vec<Value>>) -> Table {
        let mut b = crate::TableBuilder::new(names.to_vec()).unwrap();
        for row in rows {
            b.push_row(row).unwrap();
        }
        b.finish().unwrap()
    }

    #[test]
    fn stacks_identical_column_sets() {
        let a = t(
            &[("x", DataType::Integer), ("y", DataType::Text)],
            vec![vec![Value::Integer(1), Value::Text("a".into())]],
        );
        // Same columns, different order: still binds, using a's order
        let b = t(
            &[("y", DataType::Text), ("x", DataType::Integer)],
            vec![vec![Value::Text("b".into()), Value::Integer(2)]],
        );

        let bound = a.bind_rows(&[&b]).unwrap();
        assert_eq!(bound.n_rows(), 2);
        assert_eq!(bound.names(), &["x".to_string(), "y".to_string()]);
        assert_eq!(bound.column("x").unwrap().get(1), Some(&Value::Integer(2)));
    }

    #[test]
    fn rejects_differing_column_sets() {
        let a = t(&[("x", DataType::Integer)], vec![]);
        let b = t(&[("z", DataType::Integer)], vec![]);
        assert!(matches!(a.bind_rows(&[&b]), Err(TableError::ShapeMismatch(_))));
    }

    #[test]
    fn rejects_differing_types() {
        let a = t(&[("x", DataType::Integer)], vec![]);
        let b = t(&[("x", DataType::Float)], vec![]);
        assert!(matches!(a.bind_rows(&[&b]), Err(TableError::ShapeMismatch(_))));
    }
}

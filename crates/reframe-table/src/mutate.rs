//! Computed columns
//!
//! mutate adds or replaces a column without changing row count. The
//! callback sees, for each row, the full ordered slice of its group (the
//! whole table counts as one group when ungrouped) plus the row's position
//! in that slice - which is how per-group computed columns (deviation from
//! group mean, running totals, shifts) are expressed.

use reframe_types::{DataType, Value};

use crate::{Column, GroupSlice, Table, TableError};

impl Table {
    /// Add or replace column `name` with values computed per row.
    ///
    /// `f` receives the row's group slice (in current arrange order) and
    /// the row's position within it; the result column has exactly one
    /// value per input row, placed in original row order. Group metadata
    /// is preserved.
    pub fn mutate<F>(&self, name: &str, dtype: DataType, f: F) -> Result<Table, TableError>
    where
        F: Fn(&GroupSlice<'_>, usize) -> Result<Value, TableError>,
    {
        let mut out_values = vec![Value::Missing; self.n_rows()];

        for (_, indices) in self.group_index_sets() {
            let slice = self.slice(&indices);
            for pos in 0..indices.len() {
                let value = f(&slice, pos)?;
                if !value.matches_type(&dtype) {
                    return Err(TableError::TypeMismatch {
                        column: name.to_string(),
                        expected: dtype.to_string(),
                        actual: value.type_name().to_string(),
                    });
                }
                out_values[indices[pos]] = value;
            }
        }

        let column = Column::new(dtype, out_values).map_err(|e| e.with_column(name))?;
        self.with_column(name, column)
    }
}

#[cfg(test)]
mod tests {
    use reframe_types::{DataType, Value};

    use crate::{Column, GroupMeta, Table, TableError};

    fn incomes() -> Table {
        Table::new(vec![
            (
                "person".to_string(),
                Column::new(
                    DataType::Text,
                    vec![
                        Value::Text("A".into()),
                        Value::Text("A".into()),
                        Value::Text("B".into()),
                    ],
                )
                .unwrap(),
            ),
            (
                "income".to_string(),
                Column::new(
                    DataType::Integer,
                    vec![Value::Integer(100), Value::Integer(110), Value::Integer(200)],
                )
                .unwrap(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn ungrouped_mutate_sees_whole_table() {
        let t = incomes();
        let t2 = t
            .mutate("n_rows", DataType::Integer, |slice, _| {
                Ok(Value::Integer(slice.len() as i64))
            })
            .unwrap();
        assert_eq!(t2.column("n_rows").unwrap().values(), &[
            Value::Integer(3),
            Value::Integer(3),
            Value::Integer(3)
        ]);
    }

    #[test]
    fn grouped_mutate_computes_relative_to_group() {
        let t = incomes();
        let meta = GroupMeta::compute(&t, &["person".to_string()]).unwrap();
        let grouped = t.with_groups(meta);

        // income minus group mean, without changing row count
        let t2 = grouped
            .mutate("delta", DataType::Float, |slice, pos| {
                let col = slice.column_index("income")?;
                let sum: f64 =
                    slice.values(col).filter_map(|v| v.as_f64()).sum();
                let mean = sum / slice.len() as f64;
                let x = slice.value(col, pos).as_f64().unwrap_or(f64::NAN);
                Ok(Value::Float(x - mean))
            })
            .unwrap();

        assert_eq!(t2.n_rows(), 3);
        assert_eq!(t2.column("delta").unwrap().values(), &[
            Value::Float(-5.0),
            Value::Float(5.0),
            Value::Float(0.0)
        ]);
        // Grouping survives mutate
        assert!(t2.is_grouped());
    }

    #[test]
    fn result_type_is_enforced() {
        let t = incomes();
        let err = t
            .mutate("bad", DataType::Integer, |_, _| Ok(Value::Text("oops".into())))
            .unwrap_err();
        assert!(matches!(err, TableError::TypeMismatch { .. }));
    }

    #[test]
    fn failed_mutate_leaves_input_untouched() {
        let t = incomes();
        let result = t.mutate("x", DataType::Integer, |_, _| {
            Err(TableError::Format("boom".into()))
        });
        assert!(result.is_err());
        assert_eq!(t.n_cols(), 2);
    }
}

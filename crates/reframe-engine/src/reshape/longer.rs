//! Wide to long: melt value columns into name/value pairs

use reframe_table::{Column, Table, TableError};
use reframe_types::{DataType, Value};

use super::MixedTypePolicy;
use crate::EngineError;

/// Melt `columns` into two new columns: `names_to` holds the source
/// column's name as Text, `values_to` holds its cell value.
///
/// Every other column becomes an identifier column, repeated once per
/// melted column. Output rows are row-major: all melted cells of input
/// row 0 first, in the order `columns` was given. Missing cells melt
/// like any other value unless `drop_missing` asks for them to be
/// skipped (the usual choice when the wide layout encoded absence as an
/// empty cell rather than a real observation).
///
/// The melted columns must share a common supertype (Integer and Float
/// unify to Float); otherwise the pivot fails unless
/// `MixedTypePolicy::CoerceToText` was requested.
pub fn pivot_longer(
    table: &Table,
    columns: &[&str],
    names_to: &str,
    values_to: &str,
    drop_missing: bool,
    policy: MixedTypePolicy,
) -> Result<Table, EngineError> {
    if columns.is_empty() {
        return Err(TableError::ShapeMismatch(
            "pivot_longer needs at least one value column".to_string(),
        )
        .into());
    }

    let pivot_cols = columns
        .iter()
        .map(|name| table.column_index(name))
        .collect::<Result<Vec<_>, _>>()?;

    let value_type = unified_value_type(table, columns, &pivot_cols, policy)?;

    let id_cols: Vec<usize> = (0..table.n_cols()).filter(|c| !pivot_cols.contains(c)).collect();

    let mut id_values: Vec<Vec<Value>> = vec![Vec::new(); id_cols.len()];
    let mut names = Vec::new();
    let mut cells = Vec::new();
    for row in 0..table.n_rows() {
        for (&col, &name) in pivot_cols.iter().zip(columns) {
            let cell = &table.column_at(col).values()[row];
            if drop_missing && cell.is_missing() {
                continue;
            }
            for (slot, &id_col) in id_values.iter_mut().zip(&id_cols) {
                slot.push(table.column_at(id_col).values()[row].clone());
            }
            names.push(Value::Text(name.to_string()));
            cells.push(cell.cast(&value_type)?);
        }
    }

    let mut out: Vec<(String, Column)> = Vec::with_capacity(id_cols.len() + 2);
    for (&col, values) in id_cols.iter().zip(id_values) {
        out.push((
            table.names()[col].clone(),
            Column::new(table.column_at(col).dtype().clone(), values)?,
        ));
    }
    out.push((names_to.to_string(), Column::new(DataType::Text, names)?));
    out.push((values_to.to_string(), Column::new(value_type, cells)?));

    Ok(Table::new(out)?)
}

/// Fold the melted columns' types into one, or fail with the full list of
/// offending columns
fn unified_value_type(
    table: &Table,
    columns: &[&str],
    pivot_cols: &[usize],
    policy: MixedTypePolicy,
) -> Result<DataType, EngineError> {
    let mut unified = table.column_at(pivot_cols[0]).dtype().clone();
    for &col in &pivot_cols[1..] {
        match unified.common_supertype(table.column_at(col).dtype()) {
            Some(wider) => unified = wider,
            None => {
                return match policy {
                    MixedTypePolicy::CoerceToText => Ok(DataType::Text),
                    MixedTypePolicy::Error => Err(EngineError::HeterogeneousPivotType {
                        columns: columns.iter().map(|c| c.to_string()).collect(),
                        types: pivot_cols
                            .iter()
                            .map(|&c| table.column_at(c).dtype().to_string())
                            .collect(),
                    }),
                };
            }
        }
    }
    Ok(unified)
}

#[cfg(test)]
mod tests {
    use reframe_table::TableBuilder;

    use super::*;

    /// One row per person, one column per year
    fn wide() -> Table {
        let mut b = TableBuilder::new(vec![
            ("person", DataType::Text),
            ("y2014", DataType::Integer),
            ("y2015", DataType::Integer),
        ])
        .unwrap();
        b.push_row(vec![Value::Text("A".into()), Value::Integer(100), Value::Integer(110)])
            .unwrap();
        b.push_row(vec![Value::Text("B".into()), Value::Integer(200), Value::Missing])
            .unwrap();
        b.finish().unwrap()
    }

    #[test]
    fn melts_row_major_in_given_column_order() {
        let out =
            pivot_longer(&wide(), &["y2014", "y2015"], "year", "income", false, MixedTypePolicy::Error)
                .unwrap();

        assert_eq!(out.names(), &[
            "person".to_string(),
            "year".to_string(),
            "income".to_string()
        ]);
        assert_eq!(out.n_rows(), 4);
        assert_eq!(out.column("person").unwrap().values(), &[
            Value::Text("A".into()),
            Value::Text("A".into()),
            Value::Text("B".into()),
            Value::Text("B".into()),
        ]);
        assert_eq!(out.column("year").unwrap().values(), &[
            Value::Text("y2014".into()),
            Value::Text("y2015".into()),
            Value::Text("y2014".into()),
            Value::Text("y2015".into()),
        ]);
        assert_eq!(out.column("income").unwrap().values(), &[
            Value::Integer(100),
            Value::Integer(110),
            Value::Integer(200),
            Value::Missing, // B's missing 2015 cell melts as Missing
        ]);
    }

    #[test]
    fn drop_missing_skips_empty_cells() {
        let out =
            pivot_longer(&wide(), &["y2014", "y2015"], "year", "income", true, MixedTypePolicy::Error)
                .unwrap();
        // B's empty 2015 cell produces no row at all
        assert_eq!(out.n_rows(), 3);
        assert_eq!(out.column("income").unwrap().values(), &[
            Value::Integer(100),
            Value::Integer(110),
            Value::Integer(200),
        ]);
    }

    #[test]
    fn integer_and_float_columns_unify_to_float() {
        let mut b = TableBuilder::new(vec![
            ("a", DataType::Integer),
            ("b", DataType::Float),
        ])
        .unwrap();
        b.push_row(vec![Value::Integer(1), Value::Float(2.5)]).unwrap();
        let t = b.finish().unwrap();

        let out = pivot_longer(&t, &["a", "b"], "k", "v", false, MixedTypePolicy::Error).unwrap();
        assert_eq!(out.column("v").unwrap().dtype(), &DataType::Float);
        assert_eq!(out.column("v").unwrap().values(), &[Value::Float(1.0), Value::Float(2.5)]);
    }

    #[test]
    fn mixed_types_fail_by_default() {
        let mut b = TableBuilder::new(vec![
            ("a", DataType::Integer),
            ("b", DataType::Text),
        ])
        .unwrap();
        b.push_row(vec![Value::Integer(1), Value::Text("x".into())]).unwrap();
        let t = b.finish().unwrap();

        let err = pivot_longer(&t, &["a", "b"], "k", "v", false, MixedTypePolicy::Error).unwrap_err();
        assert!(matches!(err, EngineError::HeterogeneousPivotType { .. }));
    }

    #[test]
    fn mixed_types_coerce_to_text_on_request() {
        let mut b = TableBuilder::new(vec![
            ("a", DataType::Integer),
            ("b", DataType::Text),
        ])
        .unwrap();
        b.push_row(vec![Value::Integer(1), Value::Text("x".into())]).unwrap();
        let t = b.finish().unwrap();

        let out = pivot_longer(&t, &["a", "b"], "k", "v", false, MixedTypePolicy::CoerceToText).unwrap();
        assert_eq!(out.column("v").unwrap().dtype(), &DataType::Text);
        assert_eq!(out.column("v").unwrap().values(), &[
            Value::Text("1".into()),
            Value::Text("x".into()),
        ]);
    }

    #[test]
    fn unknown_value_column_fails() {
        let err = pivot_longer(&wide(), &["nope"], "k", "v", false, MixedTypePolicy::Error).unwrap_err();
        assert!(matches!(err, EngineError::Table(TableError::UnknownColumn { .. })));
    }

    #[test]
    fn new_name_colliding_with_id_column_fails() {
        let err = pivot_longer(&wide(), &["y2014", "y2015"], "person", "v", false, MixedTypePolicy::Error)
            .unwrap_err();
        assert!(matches!(err, EngineError::Table(TableError::DuplicateColumn(_))));
    }
}

//! Long to wide: spread name/value pairs into columns

use std::collections::HashMap;

use itertools::Itertools;
use reframe_table::{Column, Table};
use reframe_types::Value;

use crate::group::Reducer;
use crate::EngineError;

/// Spread `values_from` into one column per distinct value of
/// `names_from`.
///
/// Every other column identifies output rows: one row per distinct id
/// tuple, in first-encounter order. New columns appear in first-encounter
/// order of their name value; a Missing name value is an error, since
/// there is no column it could name.
///
/// An (id, name) combination with no input row widens to Missing. A
/// combination with more than one row is ambiguous and fails unless an
/// `aggregate` reducer is supplied, in which case the reducer is applied
/// to every cell (including singletons) and the output column type is
/// the reducer's.
pub fn pivot_wider(
    table: &Table,
    names_from: &str,
    values_from: &str,
    aggregate: Option<Reducer>,
) -> Result<Table, EngineError> {
    let names_col = table.column_index(names_from)?;
    let values_col = table.column_index(values_from)?;
    let id_cols: Vec<usize> =
        (0..table.n_cols()).filter(|&c| c != names_col && c != values_col).collect();

    let value_type = match aggregate {
        Some(reducer) => reducer.output_type(Some(table.column_at(values_col).dtype()))?,
        None => table.column_at(values_col).dtype().clone(),
    };

    // First-encounter orders for output rows (id tuples) and columns
    // (name labels)
    let mut id_order: Vec<Vec<Value>> = Vec::new();
    let mut id_index: HashMap<Vec<Value>, usize> = HashMap::new();
    let mut label_order: Vec<String> = Vec::new();
    let mut label_index: HashMap<String, usize> = HashMap::new();
    let mut cells: HashMap<(usize, usize), Vec<usize>> = HashMap::new();

    for row in 0..table.n_rows() {
        let name_value = &table.column_at(names_col).values()[row];
        if name_value.is_missing() {
            return Err(EngineError::MissingPivotName { row });
        }
        let label = name_value.to_string();

        let id: Vec<Value> =
            id_cols.iter().map(|&c| table.column_at(c).values()[row].clone()).collect();

        let id_idx = match id_index.get(&id) {
            Some(&idx) => idx,
            None => {
                id_index.insert(id.clone(), id_order.len());
                id_order.push(id);
                id_order.len() - 1
            }
        };
        let label_idx = match label_index.get(&label) {
            Some(&idx) => idx,
            None => {
                label_index.insert(label.clone(), label_order.len());
                label_order.push(label);
                label_order.len() - 1
            }
        };

        cells.entry((id_idx, label_idx)).or_default().push(row);
    }

    let mut out: Vec<(String, Column)> = Vec::with_capacity(id_cols.len() + label_order.len());

    for (k, &col) in id_cols.iter().enumerate() {
        let values = id_order.iter().map(|id| id[k].clone()).collect();
        out.push((
            table.names()[col].clone(),
            Column::new(table.column_at(col).dtype().clone(), values)?,
        ));
    }

    let source = table.column_at(values_col);
    for (label_idx, label) in label_order.iter().enumerate() {
        let mut values = Vec::with_capacity(id_order.len());
        for id_idx in 0..id_order.len() {
            let cell = match cells.get(&(id_idx, label_idx)) {
                None => Value::Missing,
                Some(rows) => match aggregate {
                    Some(reducer) => {
                        let group: Vec<&Value> = rows.iter().map(|&r| &source.values()[r]).collect();
                        reducer.reduce(&group)
                    }
                    None if rows.len() == 1 => source.values()[rows[0]].clone(),
                    None => {
                        return Err(EngineError::DuplicateKey {
                            id_values: id_order[id_idx].iter().map(|v| v.to_string()).collect(),
                            name: label.clone(),
                        });
                    }
                },
            };
            values.push(cell);
        }
        out.push((label.clone(), Column::new(value_type.clone(), values)?));
    }

    log::debug!(
        "pivot_wider({} -> {}): {} rows x {} new columns [{}]",
        names_from,
        values_from,
        id_order.len(),
        label_order.len(),
        label_order.iter().join(", ")
    );

    Ok(Table::new(out)?)
}

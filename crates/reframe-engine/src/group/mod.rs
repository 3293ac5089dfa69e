//! Group Engine
//!
//! Group assignment, grouped mutate, and reducing summarize. Grouping is
//! metadata on the Table value: `group_by` attaches it, `ungroup` drops
//! it, and `summarize` consumes it (output is ungrouped).
//!
//! Groups have no cross-group data dependency, so grouped computation
//! dispatches one task per group when the parallel feature is enabled and
//! the table is large enough; results merge back in group order
//! (summarize) or original row order (grouped mutate), so parallelism is
//! never observable in the output.

mod aggregate;

pub use aggregate::{AggSpec, Reducer};

use reframe_table::{Column, GroupMeta, GroupSlice, Table, TableError};
use reframe_types::{DataType, Value};

use crate::EngineError;

/// Assign group metadata keyed by the named columns.
///
/// Two rows share a group iff their key tuples are equal under strict
/// equality - Missing is a valid, distinguishable key component. Group
/// order is first encounter in current row order, so grouping after
/// arrange respects the arranged order.
pub fn group_by(table: &Table, columns: &[&str]) -> Result<Table, EngineError> {
    let key: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let meta = GroupMeta::compute(table, &key)?;
    log::debug!("group_by({:?}): {} groups over {} rows", columns, meta.n_groups(), table.n_rows());
    Ok(table.clone().with_groups(meta))
}

/// Discard group metadata without altering rows or values
pub fn ungroup(table: &Table) -> Table {
    table.clone().ungrouped()
}

/// Reduce each group to one output row.
///
/// Only valid on a grouped table. Output columns are the group-key
/// columns followed by one column per aggregate; rows appear in
/// first-encountered-group order; the result is ungrouped.
pub fn summarize(table: &Table, aggs: &[AggSpec]) -> Result<Table, EngineError> {
    let meta = table.groups().ok_or(EngineError::GroupRequired("summarize"))?.clone();

    // Resolve aggregates up front so a bad request fails before any work
    let mut resolved: Vec<(Option<usize>, Reducer, DataType)> = Vec::with_capacity(aggs.len());
    for agg in aggs {
        if agg.column.is_none() && agg.reducer != Reducer::Count {
            return Err(EngineError::InvalidAggregate(format!(
                "'{}' needs an input column",
                agg.name
            )));
        }
        let col_idx = agg.column.as_deref().map(|c| table.column_index(c)).transpose()?;
        let input_type = col_idx.map(|i| table.column_at(i).dtype());
        let out_type = agg.reducer.output_type(input_type)?;
        resolved.push((col_idx, agg.reducer, out_type));
    }
    for (i, agg) in aggs.iter().enumerate() {
        if meta.key_columns.contains(&agg.name)
            || aggs[..i].iter().any(|other| other.name == agg.name)
        {
            return Err(TableError::DuplicateColumn(agg.name.clone()).into());
        }
    }

    let compute_group = |indices: &[usize]| -> Vec<Value> {
        resolved
            .iter()
            .map(|(col_idx, reducer, _)| match col_idx {
                Some(ci) => {
                    let values: Vec<&Value> =
                        indices.iter().map(|&row| &table.column_at(*ci).values()[row]).collect();
                    reducer.reduce(&values)
                }
                None => Value::Integer(indices.len() as i64),
            })
            .collect()
    };

    let group_rows: Vec<Vec<Value>> = compute_per_group(table, &meta, compute_group);

    // Assemble: key columns first, then one column per aggregate
    let mut columns: Vec<(String, Column)> = Vec::with_capacity(meta.key_columns.len() + aggs.len());
    for (k, key_name) in meta.key_columns.iter().enumerate() {
        let dtype = table.column(key_name)?.dtype().clone();
        let values = meta.groups.iter().map(|entry| entry.key[k].clone()).collect();
        columns.push((key_name.clone(), Column::new(dtype, values)?));
    }
    for (a, agg) in aggs.iter().enumerate() {
        let dtype = resolved[a].2.clone();
        let values = group_rows.iter().map(|row| row[a].clone()).collect();
        columns.push((agg.name.clone(), Column::new(dtype, values)?));
    }

    Ok(Table::new(columns)?)
}

/// Grouped mutate with per-group parallel dispatch.
///
/// Semantics match `Table::mutate` on a grouped table; this entry point
/// exists so heavy per-group callbacks can fan out across a worker pool.
/// The output column is assembled in original row order regardless of
/// which worker computed which group.
pub fn grouped_mutate<F>(
    table: &Table,
    name: &str,
    dtype: DataType,
    f: F,
) -> Result<Table, EngineError>
where
    F: Fn(&GroupSlice<'_>, usize) -> Result<Value, TableError> + Sync,
{
    let meta = table.groups().ok_or(EngineError::GroupRequired("grouped_mutate"))?;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        let config = crate::ParallelConfig::global();
        if config.should_parallelize_grouped(table.n_rows(), meta.n_groups()) {
            let per_group: Vec<Result<Vec<Value>, TableError>> = meta
                .groups
                .par_iter()
                .map(|entry| {
                    let slice = table.slice(&entry.indices);
                    (0..entry.indices.len()).map(|pos| f(&slice, pos)).collect()
                })
                .collect();

            let mut out_values = vec![Value::Missing; table.n_rows()];
            for (entry, values) in meta.groups.iter().zip(per_group) {
                for (pos, value) in values?.into_iter().enumerate() {
                    if !value.matches_type(&dtype) {
                        return Err(TableError::TypeMismatch {
                            column: name.to_string(),
                            expected: dtype.to_string(),
                            actual: value.type_name().to_string(),
                        }
                        .into());
                    }
                    out_values[entry.indices[pos]] = value;
                }
            }
            let column = Column::new(dtype, out_values)?;
            return Ok(table.with_column(name, column)?);
        }
    }

    Ok(table.mutate(name, dtype, f)?)
}

/// Run `compute` once per group, in parallel when worthwhile; results come
/// back in group order either way.
fn compute_per_group<F>(table: &Table, meta: &GroupMeta, compute: F) -> Vec<Vec<Value>>
where
    F: Fn(&[usize]) -> Vec<Value> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        let config = crate::ParallelConfig::global();
        if config.should_parallelize_grouped(table.n_rows(), meta.n_groups()) {
            return meta.groups.par_iter().map(|entry| compute(&entry.indices)).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = table;

    meta.groups.iter().map(|entry| compute(&entry.indices)).collect()
}

#[cfg(test)]
mod tests {
    use reframe_table::TableBuilder;
    use reframe_types::{DataType, Value};

    use super::*;

    /// The Person/Year/Income fixture: A appears in 2014 and 2015, B only
    /// in 2014
    fn incomes() -> Table {
        let mut b = TableBuilder::new(vec![
            ("person", DataType::Text),
            ("year", DataType::Integer),
            ("income", DataType::Integer),
        ])
        .unwrap();
        b.push_row(vec![Value::Text("A".into()), Value::Integer(2014), Value::Integer(100)])
            .unwrap();
        b.push_row(vec![Value::Text("A".into()), Value::Integer(2015), Value::Integer(110)])
            .unwrap();
        b.push_row(vec![Value::Text("B".into()), Value::Integer(2014), Value::Integer(200)])
            .unwrap();
        b.finish().unwrap()
    }

    #[test]
    fn summarize_mean_and_count() {
        let grouped = group_by(&incomes(), &["person"]).unwrap();
        let out = summarize(
            &grouped,
            &[AggSpec::mean("mean_income", "income"), AggSpec::count("n")],
        )
        .unwrap();

        assert_eq!(out.names(), &["person".to_string(), "mean_income".to_string(), "n".to_string()]);
        assert_eq!(out.n_rows(), 2);
        // (A, 105, 2) then (B, 200, 1), in first-encounter order
        assert_eq!(out.column("person").unwrap().get(0), Some(&Value::Text("A".into())));
        assert_eq!(out.column("mean_income").unwrap().get(0), Some(&Value::Float(105.0)));
        assert_eq!(out.column("n").unwrap().get(0), Some(&Value::Integer(2)));
        assert_eq!(out.column("person").unwrap().get(1), Some(&Value::Text("B".into())));
        assert_eq!(out.column("mean_income").unwrap().get(1), Some(&Value::Float(200.0)));
        assert_eq!(out.column("n").unwrap().get(1), Some(&Value::Integer(1)));
    }

    #[test]
    fn single_row_group_mean_is_that_value() {
        let grouped = group_by(&incomes(), &["person"]).unwrap();
        let out = summarize(&grouped, &[AggSpec::mean("m", "income")]).unwrap();
        assert_eq!(out.column("m").unwrap().get(1), Some(&Value::Float(200.0)));
    }

    #[test]
    fn summarize_requires_grouping() {
        let err = summarize(&incomes(), &[AggSpec::count("n")]).unwrap_err();
        assert!(matches!(err, EngineError::GroupRequired("summarize")));
    }

    #[test]
    fn summarize_output_is_ungrouped() {
        let grouped = group_by(&incomes(), &["person"]).unwrap();
        let out = summarize(&grouped, &[AggSpec::count("n")]).unwrap();
        assert!(!out.is_grouped());
    }

    #[test]
    fn ungroup_keeps_rows_and_values() {
        let grouped = group_by(&incomes(), &["person"]).unwrap();
        let plain = ungroup(&grouped);
        assert!(!plain.is_grouped());
        assert_eq!(plain.n_rows(), 3);
    }

    #[test]
    fn agg_name_clashing_with_key_fails() {
        let grouped = group_by(&incomes(), &["person"]).unwrap();
        let err = summarize(&grouped, &[AggSpec::count("person")]).unwrap_err();
        assert!(matches!(err, EngineError::Table(TableError::DuplicateColumn(_))));
    }

    #[test]
    fn grouped_mutate_matches_sequential_mutate() {
        let grouped = group_by(&incomes(), &["person"]).unwrap();

        let shift = |slice: &GroupSlice<'_>, pos: usize| {
            let col = slice.column_index("income")?;
            Ok(if pos == 0 { Value::Missing } else { slice.value(col, pos - 1).clone() })
        };

        let parallel = grouped_mutate(&grouped, "prev", DataType::Integer, shift).unwrap();
        let sequential = grouped.mutate("prev", DataType::Integer, shift).unwrap();

        assert_eq!(
            parallel.column("prev").unwrap().values(),
            sequential.column("prev").unwrap().values()
        );
        // Row order of the input is preserved
        assert_eq!(parallel.column("prev").unwrap().values(), &[
            Value::Missing,
            Value::Integer(100),
            Value::Missing
        ]);
    }

    #[test]
    fn grouped_mutate_requires_grouping() {
        let err = grouped_mutate(&incomes(), "x", DataType::Integer, |_, _| {
            Ok(Value::Integer(0))
        })
        .unwrap_err();
        assert!(matches!(err, EngineError::GroupRequired(_)));
    }
}

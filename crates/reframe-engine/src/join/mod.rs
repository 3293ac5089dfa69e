//! The relational join family over tables
//!
//! All six variants are hash equi-joins on one or more key column pairs.
//! Key comparison is strict equality with one carve-out: a key tuple with
//! any Missing component never matches anything, on either side, in any
//! variant. Join output is always ungrouped.
//!
//! Inner joins build the hash index on the smaller input and probe with
//! the larger; index building goes to the rayon pool for large inputs
//! when the `parallel` feature is enabled. Either way the output is
//! deterministic: rows ordered by (left row, right row) for inner joins,
//! probe-side order for the outer variants.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use reframe_table::{Column, Table};
use reframe_types::Value;

use crate::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Matched row pairs only; a key on one side matching k rows on the
    /// other contributes k output rows
    Inner,
    /// Every left row, padded with Missing where the right has no match
    Left,
    /// Every right row, padded with Missing where the left has no match
    Right,
    /// Every row from both sides, padded on whichever side has no match
    Full,
    /// Left rows with at least one right match, each at most once, left
    /// columns only
    Semi,
    /// Left rows with no right match, left columns only
    Anti,
}

/// Resolved join keys: column positions on each side, verified pairwise
/// type-equal
struct JoinKeys {
    left_cols: Vec<usize>,
    right_cols: Vec<usize>,
    names: Vec<String>,
}

impl JoinKeys {
    fn resolve(left: &Table, right: &Table, by: &[(&str, &str)]) -> Result<JoinKeys, EngineError> {
        let mut left_cols = Vec::with_capacity(by.len());
        let mut right_cols = Vec::with_capacity(by.len());
        let mut names = Vec::with_capacity(by.len());

        for &(left_name, right_name) in by {
            let l = left.column_index(left_name)?;
            let r = right.column_index(right_name)?;
            let left_type = left.column_at(l).dtype();
            let right_type = right.column_at(r).dtype();
            if left_type != right_type {
                return Err(EngineError::JoinKeyTypeMismatch {
                    left: left_name.to_string(),
                    right: right_name.to_string(),
                    left_type: left_type.to_string(),
                    right_type: right_type.to_string(),
                });
            }
            left_cols.push(l);
            right_cols.push(r);
            names.push(left_name.to_string());
        }

        Ok(JoinKeys { left_cols, right_cols, names })
    }
}

/// Key tuple of one row, or None when any component is Missing
fn key_at(table: &Table, cols: &[usize], row: usize) -> Option<Vec<Value>> {
    let mut key = Vec::with_capacity(cols.len());
    for &col in cols {
        let value = &table.column_at(col).values()[row];
        if value.is_missing() {
            return None;
        }
        key.push(value.clone());
    }
    Some(key)
}

/// Map every non-missing key tuple to its row indices, in row order
fn build_key_index_sequential(table: &Table, cols: &[usize]) -> HashMap<Vec<Value>, Vec<usize>> {
    let mut index: HashMap<Vec<Value>, Vec<usize>> = HashMap::new();
    for row in 0..table.n_rows() {
        if let Some(key) = key_at(table, cols, row) {
            index.entry(key).or_default().push(row);
        }
    }
    index
}

/// Chunked parallel index build: each worker indexes a row range locally,
/// partial maps merge sequentially. Within a key the indices stay sorted
/// because chunks are merged in row order.
fn build_key_index(table: &Table, cols: &[usize]) -> HashMap<Vec<Value>, Vec<usize>> {
    #[cfg(feature = "parallel")]
    {
        let config = crate::ParallelConfig::global();
        if config.should_parallelize_join(table.n_rows()) {
            let rows: Vec<usize> = (0..table.n_rows()).collect();
            let chunk_size = (rows.len() / config.num_threads).max(1000);

            let partials: Vec<HashMap<Vec<Value>, Vec<usize>>> = rows
                .par_chunks(chunk_size)
                .map(|chunk| {
                    let mut local: HashMap<Vec<Value>, Vec<usize>> = HashMap::new();
                    for &row in chunk {
                        if let Some(key) = key_at(table, cols, row) {
                            local.entry(key).or_default().push(row);
                        }
                    }
                    local
                })
                .collect();

            return partials.into_iter().fold(HashMap::new(), |mut acc, partial| {
                for (key, mut indices) in partial {
                    acc.entry(key).or_default().append(&mut indices);
                }
                acc
            });
        }
    }

    build_key_index_sequential(table, cols)
}

/// Join two tables on the given (left, right) key column pairs.
///
/// Output columns for the pairing variants are the merged key columns
/// (named after the left side), then the left non-key columns, then the
/// right non-key columns; a non-key name present on both sides gets an
/// `.x` suffix on the left copy and `.y` on the right. Semi and anti
/// return the left columns unchanged.
pub fn join(
    left: &Table,
    right: &Table,
    by: &[(&str, &str)],
    kind: JoinKind,
) -> Result<Table, EngineError> {
    let keys = JoinKeys::resolve(left, right, by)?;

    match kind {
        JoinKind::Semi | JoinKind::Anti => filtering_join(left, right, &keys, kind),
        _ => {
            let pairs = match kind {
                JoinKind::Inner => inner_pairs(left, right, &keys),
                JoinKind::Left => outer_pairs(left, right, &keys, false),
                JoinKind::Right => right_pairs(left, right, &keys),
                JoinKind::Full => outer_pairs(left, right, &keys, true),
                JoinKind::Semi | JoinKind::Anti => unreachable!(),
            };
            materialize(left, right, &keys, &pairs)
        }
    }
}

/// Semi and anti join: filter left rows on right-key membership.
///
/// A missing left key matches nothing, so semi drops it and anti keeps it.
fn filtering_join(
    left: &Table,
    right: &Table,
    keys: &JoinKeys,
    kind: JoinKind,
) -> Result<Table, EngineError> {
    let mut right_keys: HashSet<Vec<Value>> = HashSet::new();
    for row in 0..right.n_rows() {
        if let Some(key) = key_at(right, &keys.right_cols, row) {
            right_keys.insert(key);
        }
    }

    let want_match = kind == JoinKind::Semi;
    let mut keep = Vec::new();
    for row in 0..left.n_rows() {
        let matched = match key_at(left, &keys.left_cols, row) {
            Some(key) => right_keys.contains(&key),
            None => false,
        };
        if matched == want_match {
            keep.push(row);
        }
    }

    Ok(left.take_rows(&keep))
}

/// Matched (left, right) row pairs in (left, right) order.
///
/// Builds the index on the smaller side. Probing the larger side with a
/// left-built index yields right-major pairs, so that path sorts.
fn inner_pairs(left: &Table, right: &Table, keys: &JoinKeys) -> Vec<(Option<usize>, Option<usize>)> {
    let build_on_right = right.n_rows() <= left.n_rows();
    log::debug!(
        "inner join: building on the {} side ({} vs {} rows)",
        if build_on_right { "right" } else { "left" },
        left.n_rows(),
        right.n_rows()
    );

    let mut pairs: Vec<(usize, usize)> = Vec::new();
    if build_on_right {
        let index = build_key_index(right, &keys.right_cols);
        for l in 0..left.n_rows() {
            if let Some(key) = key_at(left, &keys.left_cols, l) {
                if let Some(rs) = index.get(&key) {
                    pairs.extend(rs.iter().map(|&r| (l, r)));
                }
            }
        }
    } else {
        let index = build_key_index(left, &keys.left_cols);
        for r in 0..right.n_rows() {
            if let Some(key) = key_at(right, &keys.right_cols, r) {
                if let Some(ls) = index.get(&key) {
                    pairs.extend(ls.iter().map(|&l| (l, r)));
                }
            }
        }
        pairs.sort_unstable();
    }

    pairs.into_iter().map(|(l, r)| (Some(l), Some(r))).collect()
}

/// Left (and, with `full`, full) join pairs: every left row in order, once
/// per match or once padded; full appends unmatched right rows afterwards
fn outer_pairs(
    left: &Table,
    right: &Table,
    keys: &JoinKeys,
    full: bool,
) -> Vec<(Option<usize>, Option<usize>)> {
    let index = build_key_index(right, &keys.right_cols);
    let mut matched_right: HashSet<usize> = HashSet::new();
    let mut pairs: Vec<(Option<usize>, Option<usize>)> = Vec::new();

    for l in 0..left.n_rows() {
        let rs = key_at(left, &keys.left_cols, l).and_then(|key| index.get(&key));
        match rs {
            Some(rs) => {
                for &r in rs {
                    if full {
                        matched_right.insert(r);
                    }
                    pairs.push((Some(l), Some(r)));
                }
            }
            None => pairs.push((Some(l), None)),
        }
    }

    if full {
        for r in 0..right.n_rows() {
            if !matched_right.contains(&r) {
                pairs.push((None, Some(r)));
            }
        }
    }

    pairs
}

/// Right join pairs: every right row in order, matched left rows ascending
fn right_pairs(left: &Table, right: &Table, keys: &JoinKeys) -> Vec<(Option<usize>, Option<usize>)> {
    let index = build_key_index(left, &keys.left_cols);
    let mut pairs: Vec<(Option<usize>, Option<usize>)> = Vec::new();

    for r in 0..right.n_rows() {
        let ls = key_at(right, &keys.right_cols, r).and_then(|key| index.get(&key));
        match ls {
            Some(ls) => pairs.extend(ls.iter().map(|&l| (Some(l), Some(r)))),
            None => pairs.push((None, Some(r))),
        }
    }

    pairs
}

/// Assemble the output table for the pairing variants from row pairs.
///
/// Merged key columns take the left value when a left row is present, the
/// right value otherwise; missing sides pad their non-key columns with
/// Missing.
fn materialize(
    left: &Table,
    right: &Table,
    keys: &JoinKeys,
    pairs: &[(Option<usize>, Option<usize>)],
) -> Result<Table, EngineError> {
    let left_nonkey: Vec<usize> =
        (0..left.n_cols()).filter(|c| !keys.left_cols.contains(c)).collect();
    let right_nonkey: Vec<usize> =
        (0..right.n_cols()).filter(|c| !keys.right_cols.contains(c)).collect();

    let left_names: Vec<&str> = left_nonkey.iter().map(|&c| left.names()[c].as_str()).collect();
    let right_names: Vec<&str> = right_nonkey.iter().map(|&c| right.names()[c].as_str()).collect();

    let mut columns: Vec<(String, Column)> =
        Vec::with_capacity(keys.names.len() + left_nonkey.len() + right_nonkey.len());

    for (k, name) in keys.names.iter().enumerate() {
        let dtype = left.column_at(keys.left_cols[k]).dtype().clone();
        let values = pairs
            .iter()
            .map(|&(l, r)| match l {
                Some(l) => left.column_at(keys.left_cols[k]).values()[l].clone(),
                None => {
                    let r = r.expect("join pair with neither side");
                    right.column_at(keys.right_cols[k]).values()[r].clone()
                }
            })
            .collect();
        columns.push((name.clone(), Column::new(dtype, values)?));
    }

    for (&col, &name) in left_nonkey.iter().zip(&left_names) {
        let out_name = if right_names.contains(&name) {
            format!("{}.x", name)
        } else {
            name.to_string()
        };
        let values = pairs
            .iter()
            .map(|&(l, _)| match l {
                Some(l) => left.column_at(col).values()[l].clone(),
                None => Value::Missing,
            })
            .collect();
        columns.push((out_name, Column::new(left.column_at(col).dtype().clone(), values)?));
    }

    for (&col, &name) in right_nonkey.iter().zip(&right_names) {
        let out_name = if left_names.contains(&name) || keys.names.iter().any(|k| k == name) {
            format!("{}.y", name)
        } else {
            name.to_string()
        };
        let values = pairs
            .iter()
            .map(|&(_, r)| match r {
                Some(r) => right.column_at(col).values()[r].clone(),
                None => Value::Missing,
            })
            .collect();
        columns.push((out_name, Column::new(right.column_at(col).dtype().clone(), values)?));
    }

    Ok(Table::new(columns)?)
}

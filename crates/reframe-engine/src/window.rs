//! Positional operators: first, last, lag, lead
//!
//! All four are defined over a group slice in current row order. They are
//! strictly position-based: `lag` looks one row back, not one time unit
//! back, so irregular or gappy orderings shift by rows regardless of any
//! timestamps in them. On an ungrouped table the whole table is one slice;
//! on a grouped table every group has its own boundaries, so a lag never
//! reads across a group edge.

use reframe_table::{GroupSlice, Table};
use reframe_types::Value;

use crate::EngineError;

/// First value of the column within the slice, broadcast to any position
pub fn first(slice: &GroupSlice<'_>, col: usize) -> Value {
    if slice.is_empty() {
        Value::Missing
    } else {
        slice.value(col, 0).clone()
    }
}

/// Last value of the column within the slice
pub fn last(slice: &GroupSlice<'_>, col: usize) -> Value {
    if slice.is_empty() {
        Value::Missing
    } else {
        slice.value(col, slice.len() - 1).clone()
    }
}

/// Value `offset` positions earlier in the slice; Missing when that falls
/// before the slice start
pub fn lag(slice: &GroupSlice<'_>, col: usize, pos: usize, offset: usize) -> Value {
    match pos.checked_sub(offset) {
        Some(earlier) => slice.value(col, earlier).clone(),
        None => Value::Missing,
    }
}

/// Value `offset` positions later in the slice; Missing when that falls
/// past the slice end
pub fn lead(slice: &GroupSlice<'_>, col: usize, pos: usize, offset: usize) -> Value {
    let later = pos + offset;
    if later < slice.len() {
        slice.value(col, later).clone()
    } else {
        Value::Missing
    }
}

/// Add a column holding each group's first value of `column`
pub fn mutate_first(table: &Table, name: &str, column: &str) -> Result<Table, EngineError> {
    let col = table.column_index(column)?;
    let dtype = table.column_at(col).dtype().clone();
    Ok(table.mutate(name, dtype, move |slice, _| Ok(first(slice, col)))?)
}

/// Add a column holding each group's last value of `column`
pub fn mutate_last(table: &Table, name: &str, column: &str) -> Result<Table, EngineError> {
    let col = table.column_index(column)?;
    let dtype = table.column_at(col).dtype().clone();
    Ok(table.mutate(name, dtype, move |slice, _| Ok(last(slice, col)))?)
}

/// Add a column holding `column` shifted `offset` rows down within each
/// group; the first `offset` rows of every group get Missing
pub fn mutate_lag(
    table: &Table,
    name: &str,
    column: &str,
    offset: usize,
) -> Result<Table, EngineError> {
    let col = table.column_index(column)?;
    let dtype = table.column_at(col).dtype().clone();
    Ok(table.mutate(name, dtype, move |slice, pos| Ok(lag(slice, col, pos, offset)))?)
}

/// Add a column holding `column` shifted `offset` rows up within each
/// group; the last `offset` rows of every group get Missing
pub fn mutate_lead(
    table: &Table,
    name: &str,
    column: &str,
    offset: usize,
) -> Result<Table, EngineError> {
    let col = table.column_index(column)?;
    let dtype = table.column_at(col).dtype().clone();
    Ok(table.mutate(name, dtype, move |slice, pos| Ok(lead(slice, col, pos, offset)))?)
}

//! Group metadata and borrowed row/group views
//!
//! Group assignment is a partition of row indices keyed by the values of a
//! designated column subset. It is carried on the Table value itself,
//! threaded immutably through verbs - never ambient state.

use std::collections::HashMap;

use reframe_types::Value;

use crate::{Table, TableError};

/// One group: its key tuple and the member row indices in table order
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEntry {
    pub key: Vec<Value>,
    pub indices: Vec<usize>,
}

/// Partition of a table's rows by the values of the key columns.
///
/// Groups are ordered by first encounter in row order, which makes
/// summarize output deterministic. Missing is a valid, distinguishable
/// key component: rows whose key is missing form their own group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMeta {
    pub key_columns: Vec<String>,
    pub groups: Vec<GroupEntry>,
}

impl GroupMeta {
    /// Partition `table`'s rows by the named key columns.
    ///
    /// Row order is respected: a group's indices are ascending, and groups
    /// appear in order of their first member row.
    pub fn compute(table: &Table, key_columns: &[String]) -> Result<GroupMeta, TableError> {
        let key_indices = key_columns
            .iter()
            .map(|name| table.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen: HashMap<Vec<Value>, usize> = HashMap::new();
        let mut groups: Vec<GroupEntry> = Vec::new();

        for row in 0..table.n_rows() {
            let key: Vec<Value> = key_indices
                .iter()
                .map(|&col| table.column_at(col).values()[row].clone())
                .collect();

            match seen.get(&key) {
                Some(&group_idx) => groups[group_idx].indices.push(row),
                None => {
                    seen.insert(key.clone(), groups.len());
                    groups.push(GroupEntry { key, indices: vec![row] });
                }
            }
        }

        Ok(GroupMeta { key_columns: key_columns.to_vec(), groups })
    }

    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    /// Rebuild metadata after a filter: keep surviving indices and remap
    /// them to their new positions. Groups left empty disappear.
    pub(crate) fn retain_rows(&self, old_to_new: &HashMap<usize, usize>) -> GroupMeta {
        let groups = self
            .groups
            .iter()
            .filter_map(|entry| {
                let indices: Vec<usize> = entry
                    .indices
                    .iter()
                    .filter_map(|idx| old_to_new.get(idx).copied())
                    .collect();
                if indices.is_empty() {
                    None
                } else {
                    Some(GroupEntry { key: entry.key.clone(), indices })
                }
            })
            .collect();
        GroupMeta { key_columns: self.key_columns.clone(), groups }
    }
}

/// Borrowed view of one row, used by filter predicates
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a Table,
    row: usize,
}

impl<'a> RowRef<'a> {
    pub(crate) fn new(table: &'a Table, row: usize) -> Self {
        RowRef { table, row }
    }

    /// Value of the named column in this row
    pub fn get(&self, name: &str) -> Result<&'a Value, TableError> {
        let col = self.table.column_index(name)?;
        Ok(&self.table.column_at(col).values()[self.row])
    }

    /// Value by column position
    pub fn at(&self, col: usize) -> &'a Value {
        &self.table.column_at(col).values()[self.row]
    }

    /// This row's index in the table
    pub fn index(&self) -> usize {
        self.row
    }
}

/// Borrowed view of one group's rows in current table order.
///
/// Mutate callbacks receive this plus a position within it; the positional
/// operators (first/last/lag/lead) are defined entirely in terms of it.
#[derive(Debug, Clone, Copy)]
pub struct GroupSlice<'a> {
    table: &'a Table,
    indices: &'a [usize],
}

impl<'a> GroupSlice<'a> {
    pub(crate) fn new(table: &'a Table, indices: &'a [usize]) -> Self {
        GroupSlice { table, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.table.column_index(name)
    }

    /// Value of column `col` at position `pos` within this group
    pub fn value(&self, col: usize, pos: usize) -> &'a Value {
        &self.table.column_at(col).values()[self.indices[pos]]
    }

    /// Iterate the group's values of column `col` in group order
    pub fn values(&self, col: usize) -> impl Iterator<Item = &'a Value> + '_ {
        self.indices.iter().map(move |&row| &self.table.column_at(col).values()[row])
    }

    /// The row at position `pos` of this group
    pub fn row(&self, pos: usize) -> RowRef<'a> {
        RowRef::new(self.table, self.indices[pos])
    }

    /// Underlying table row indices, in group order
    pub fn indices(&self) -> &'a [usize] {
        self.indices
    }
}

#[cfg(test)]
mod tests {
    use reframe_types::DataType;

    use super::*;
    use crate::Column;

    fn table() -> Table {
        Table::new(vec![
            (
                "k".to_string(),
                Column::new(
                    DataType::Text,
                    vec![
                        Value::Text("a".into()),
                        Value::Text("b".into()),
                        Value::Text("a".into()),
                        Value::Missing,
                    ],
                )
                .unwrap(),
            ),
            (
                "v".to_string(),
                Column::new(
                    DataType::Integer,
                    vec![
                        Value::Integer(1),
                        Value::Integer(2),
                        Value::Integer(3),
                        Value::Integer(4),
                    ],
                )
                .unwrap(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn groups_in_first_encounter_order() {
        let t = table();
        let meta = GroupMeta::compute(&t, &["k".to_string()]).unwrap();
        assert_eq!(meta.n_groups(), 3);
        assert_eq!(meta.groups[0].key, vec![Value::Text("a".into())]);
        assert_eq!(meta.groups[0].indices, vec![0, 2]);
        assert_eq!(meta.groups[1].key, vec![Value::Text("b".into())]);
        assert_eq!(meta.groups[1].indices, vec![1]);
    }

    #[test]
    fn missing_is_its_own_group() {
        let t = table();
        let meta = GroupMeta::compute(&t, &["k".to_string()]).unwrap();
        assert_eq!(meta.groups[2].key, vec![Value::Missing]);
        assert_eq!(meta.groups[2].indices, vec![3]);
    }

    #[test]
    fn slice_views_group_rows_in_order() {
        let t = table();
        let meta = GroupMeta::compute(&t, &["k".to_string()]).unwrap();
        let slice = t.slice(&meta.groups[0].indices);
        assert_eq!(slice.len(), 2);
        assert_eq!(slice.value(1, 0), &Value::Integer(1));
        assert_eq!(slice.value(1, 1), &Value::Integer(3));
    }
}

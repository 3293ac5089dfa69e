// ============================================================================
// Table
// ============================================================================

use std::sync::Arc;

use crate::{group::GroupMeta, Column, GroupSlice, RowRef, TableError};

/// An ordered collection of named, same-length columns.
///
/// Row order 0..N is semantically significant - it is the basis for
/// arrange and the positional operators, not just storage order. A table
/// optionally carries group metadata assigned by `group_by`; operations
/// either maintain it (documented per verb) or drop it.
#[derive(Debug, Clone)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Arc<Column>>,
    groups: Option<GroupMeta>,
}

impl Table {
    /// Build a table from named columns.
    ///
    /// Names must be unique and all columns the same length.
    pub fn new(columns: Vec<(String, Column)>) -> Result<Table, TableError> {
        let mut names = Vec::with_capacity(columns.len());
        let mut cols = Vec::with_capacity(columns.len());
        let expected = columns.first().map(|(_, c)| c.len()).unwrap_or(0);

        for (name, column) in columns {
            if names.contains(&name) {
                return Err(TableError::DuplicateColumn(name));
            }
            if column.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: name,
                    expected,
                    actual: column.len(),
                });
            }
            names.push(name);
            cols.push(Arc::new(column));
        }

        Ok(Table { names, columns: cols, groups: None })
    }

    /// An empty table with no columns and no rows
    pub fn empty() -> Table {
        Table { names: Vec::new(), columns: Vec::new(), groups: None }
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.names.iter().position(|n| n == name).ok_or_else(|| TableError::UnknownColumn {
            name: name.to_string(),
            available: self.names.clone(),
        })
    }

    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        let idx = self.column_index(name)?;
        Ok(&self.columns[idx])
    }

    pub fn column_at(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    /// Borrowed view of one row
    pub fn row(&self, index: usize) -> RowRef<'_> {
        RowRef::new(self, index)
    }

    pub fn groups(&self) -> Option<&GroupMeta> {
        self.groups.as_ref()
    }

    pub fn is_grouped(&self) -> bool {
        self.groups.is_some()
    }

    /// Attach group metadata (used by group_by; the metadata must describe
    /// this table's rows)
    pub fn with_groups(mut self, groups: GroupMeta) -> Table {
        self.groups = Some(groups);
        self
    }

    /// Drop group metadata without touching rows or values
    pub fn ungrouped(mut self) -> Table {
        self.groups = None;
        self
    }

    /// Restrict to the named columns, in the requested order.
    ///
    /// Group metadata survives only if every group-key column survives the
    /// selection; otherwise it is dropped.
    pub fn select(&self, names: &[&str]) -> Result<Table, TableError> {
        let mut out_names = Vec::with_capacity(names.len());
        let mut out_cols = Vec::with_capacity(names.len());
        for &name in names {
            if out_names.iter().any(|n: &String| n == name) {
                return Err(TableError::DuplicateColumn(name.to_string()));
            }
            let idx = self.column_index(name)?;
            out_names.push(name.to_string());
            out_cols.push(Arc::clone(&self.columns[idx]));
        }

        let groups = match &self.groups {
            Some(meta) if meta.key_columns.iter().all(|k| names.contains(&k.as_str())) => {
                Some(meta.clone())
            }
            _ => None,
        };

        Ok(Table { names: out_names, columns: out_cols, groups })
    }

    /// Add a column, or replace one of the same name in place.
    ///
    /// Replacing a group-key column recomputes group metadata; replacing
    /// any other column preserves it (row count and order are unchanged).
    pub fn with_column(&self, name: &str, column: Column) -> Result<Table, TableError> {
        if self.n_cols() > 0 && column.len() != self.n_rows() {
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.n_rows(),
                actual: column.len(),
            });
        }

        let mut out = self.clone();
        match self.names.iter().position(|n| n == name) {
            Some(idx) => {
                out.columns[idx] = Arc::new(column);
                if let Some(meta) = &self.groups {
                    if meta.key_columns.iter().any(|k| k == name) {
                        out.groups = Some(GroupMeta::compute(&out, &meta.key_columns)?);
                    }
                }
            }
            None => {
                out.names.push(name.to_string());
                out.columns.push(Arc::new(column));
            }
        }
        Ok(out)
    }

    /// Remove the named columns. Group metadata survives only if no key
    /// column is dropped.
    pub fn drop_columns(&self, names: &[&str]) -> Result<Table, TableError> {
        for &name in names {
            self.column_index(name)?;
        }
        let keep: Vec<&str> = self
            .names
            .iter()
            .filter(|n| !names.contains(&n.as_str()))
            .map(|n| n.as_str())
            .collect();
        self.select(&keep)
    }

    /// Rename a column; group metadata key names follow the rename
    pub fn rename(&self, old: &str, new: &str) -> Result<Table, TableError> {
        let idx = self.column_index(old)?;
        if old != new && self.names.iter().any(|n| n == new) {
            return Err(TableError::DuplicateColumn(new.to_string()));
        }
        let mut out = self.clone();
        out.names[idx] = new.to_string();
        if let Some(meta) = &mut out.groups {
            for key in &mut meta.key_columns {
                if key == old {
                    *key = new.to_string();
                }
            }
        }
        Ok(out)
    }

    /// New table keeping only the rows at `indices`, in that order.
    ///
    /// Drops group metadata - callers that can maintain it (filter,
    /// arrange) do so themselves.
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        let columns = self.columns.iter().map(|c| Arc::new(c.take(indices))).collect();
        Table { names: self.names.clone(), columns, groups: None }
    }

    /// Group slice covering the whole table in current row order
    pub(crate) fn whole_table_indices(&self) -> Vec<usize> {
        (0..self.n_rows()).collect()
    }

    /// Iterate group slices: one per group when grouped, else a single
    /// slice covering every row. The second element is the group key
    /// (empty when ungrouped).
    pub(crate) fn group_index_sets(&self) -> Vec<(Vec<reframe_types::Value>, Vec<usize>)> {
        match &self.groups {
            Some(meta) => meta
                .groups
                .iter()
                .map(|entry| (entry.key.clone(), entry.indices.clone()))
                .collect(),
            None => vec![(Vec::new(), self.whole_table_indices())],
        }
    }

    /// Borrowed slice over the given row indices
    pub fn slice<'a>(&'a self, indices: &'a [usize]) -> GroupSlice<'a> {
        GroupSlice::new(self, indices)
    }
}

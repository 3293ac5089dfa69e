//! Stable multi-key sorting
//!
//! arrange is the only verb that may change row order without changing row
//! identity; the positional operators depend on the order it establishes.

use std::cmp::Ordering;

use crate::{group::GroupMeta, Table, TableError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Where Missing sorts, regardless of direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullOrder {
    First,
    #[default]
    Last,
}

/// One sort key: a column and a direction
#[derive(Debug, Clone)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column: &str) -> SortKey {
        SortKey { column: column.to_string(), direction: SortDirection::Ascending }
    }

    pub fn desc(column: &str) -> SortKey {
        SortKey { column: column.to_string(), direction: SortDirection::Descending }
    }
}

impl Table {
    /// Stable sort over the given keys; ties keep their prior relative
    /// order. Missing sorts per `nulls` (default Last) on every key,
    /// independent of that key's direction. Group metadata, when present,
    /// is re-derived against the new row order.
    pub fn arrange(&self, keys: &[SortKey], nulls: NullOrder) -> Result<Table, TableError> {
        let key_cols = keys
            .iter()
            .map(|k| Ok((self.column_index(&k.column)?, k.direction)))
            .collect::<Result<Vec<_>, TableError>>()?;

        let mut perm: Vec<usize> = (0..self.n_rows()).collect();
        // Vec::sort_by is stable, which is what makes ties keep input order
        perm.sort_by(|&a, &b| {
            for &(col, direction) in &key_cols {
                let va = &self.column_at(col).values()[a];
                let vb = &self.column_at(col).values()[b];

                let cmp = match (va.is_missing(), vb.is_missing()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => match nulls {
                        NullOrder::First => Ordering::Less,
                        NullOrder::Last => Ordering::Greater,
                    },
                    (false, true) => match nulls {
                        NullOrder::First => Ordering::Greater,
                        NullOrder::Last => Ordering::Less,
                    },
                    (false, false) => {
                        let ord = va.cmp(vb);
                        match direction {
                            SortDirection::Ascending => ord,
                            SortDirection::Descending => ord.reverse(),
                        }
                    }
                };

                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            Ordering::Equal
        });

        let mut out = self.take_rows(&perm);
        if let Some(meta) = self.groups() {
            let groups = GroupMeta::compute(&out, &meta.key_columns)?;
            out = out.with_groups(groups);
        }
        Ok(out)
    }
}

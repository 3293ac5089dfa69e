//! Row filtering under three-valued logic

use std::collections::HashMap;

use reframe_types::Truth;

use crate::{RowRef, Table};

impl Table {
    /// Keep rows where the predicate evaluates to True.
    ///
    /// Unknown (from Missing anywhere in the predicate) is "not true": the
    /// row is dropped, never an error. Row order is preserved. Group
    /// metadata is recomputed by dropping the removed indices from the
    /// existing partition - surviving groups keep their relative order.
    pub fn filter<P>(&self, predicate: P) -> Table
    where
        P: Fn(&RowRef<'_>) -> Truth,
    {
        let mut keep: Vec<usize> = Vec::new();
        for row in 0..self.n_rows() {
            if predicate(&self.row(row)).is_true() {
                keep.push(row);
            }
        }

        let mut out = self.take_rows(&keep);
        if let Some(meta) = self.groups() {
            let old_to_new: HashMap<usize, usize> =
                keep.iter().enumerate().map(|(new, &old)| (old, new)).collect();
            out = out.with_groups(meta.retain_rows(&old_to_new));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use reframe_types::{DataType, Truth, Value};

    use crate::{Column, GroupMeta, Table};

    fn scores() -> Table {
        Table::new(vec![
            (
                "name".to_string(),
                Column::new(
                    DataType::Text,
                    vec![
                        Value::Text("a".into()),
                        Value::Text("b".into()),
                        Value::Text("a".into()),
                    ],
                )
                .unwrap(),
            ),
            (
                "score".to_string(),
                Column::new(
                    DataType::Integer,
                    vec![Value::Integer(10), Value::Missing, Value::Integer(30)],
                )
                .unwrap(),
            ),
        ])
        .unwrap()
    }

    fn above(threshold: i64) -> impl Fn(&crate::RowRef<'_>) -> Truth {
        move |row| match row.get("score").unwrap() {
            Value::Integer(n) => Truth::from(*n > threshold),
            _ => Truth::Unknown,
        }
    }

    #[test]
    fn missing_propagates_as_not_true() {
        let t = scores();
        let kept = t.filter(above(5));
        // Row with missing score is dropped, not kept, not an error
        assert_eq!(kept.n_rows(), 2);
        assert_eq!(kept.column("name").unwrap().get(1), Some(&Value::Text("a".into())));
    }

    #[test]
    fn row_order_is_preserved() {
        let t = scores();
        let kept = t.filter(above(5));
        assert_eq!(kept.column("score").unwrap().get(0), Some(&Value::Integer(10)));
        assert_eq!(kept.column("score").unwrap().get(1), Some(&Value::Integer(30)));
    }

    #[test]
    fn groups_are_recomputed_not_dropped() {
        let t = scores();
        let meta = GroupMeta::compute(&t, &["name".to_string()]).unwrap();
        let grouped = t.with_groups(meta);

        let kept = grouped.filter(above(15));
        let meta = kept.groups().expect("grouping survives filter");
        // Only the "a" group survives, with the single remaining row
        assert_eq!(meta.n_groups(), 1);
        assert_eq!(meta.groups[0].indices, vec![0]);
    }
}

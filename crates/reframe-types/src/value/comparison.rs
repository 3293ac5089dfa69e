//! Comparison implementations for Value

use std::cmp::Ordering;

use crate::Value;

/// PartialOrd implements comparison as predicates see it:
/// - Missing compares as None (three-valued UNKNOWN)
/// - Mixed concrete types compare as None (incomparable, never coerced)
/// - NaN follows IEEE 754 (compares as None)
/// - Categorical values order by code, i.e. by level order, not label text
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use Value::*;
        match (self, other) {
            (Missing, _) | (_, Missing) => None,

            (Integer(a), Integer(b)) => a.partial_cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Boolean(a), Boolean(b)) => a.partial_cmp(b),
            (Text(a), Text(b)) => a.partial_cmp(b),
            (Categorical { code: a, .. }, Categorical { code: b, .. }) => a.partial_cmp(b),
            (Date(a), Date(b)) => a.partial_cmp(b),
            (Timestamp(a), Timestamp(b)) => a.partial_cmp(b),

            // Mixed types: incomparable, callers must cast explicitly
            _ => None,
        }
    }
}

/// Equality for grouping and hash-index purposes.
///
/// Unlike predicate comparison, grouping treats Missing as equal to Missing
/// and NaN as equal to NaN - a group keyed on a missing value is a real,
/// distinguishable group. Join and filter enforce "Missing never matches"
/// themselves by skipping missing keys before the hash lookup.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Missing, Missing) => true,
            (Integer(a), Integer(b)) => a == b,
            // NaN == NaN so float keys behave in hash maps
            (Float(a), Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Boolean(a), Boolean(b)) => a == b,
            (Text(a), Text(b)) => a == b,
            (Categorical { code: a, .. }, Categorical { code: b, .. }) => a == b,
            (Date(a), Date(b)) => a == b,
            (Timestamp(a), Timestamp(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

/// Total order used by sort machinery.
///
/// Missing sorts first at this level; arrange applies its configured null
/// policy on top. NaN sorts above all other floats. Values of different
/// types order by a stable type tag so mixed comparisons never panic.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;

        match (self.is_missing(), other.is_missing()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        if let Some(ordering) = self.partial_cmp(other) {
            return ordering;
        }

        // NaN against a float, or a type mismatch
        match (self, other) {
            (Float(a), Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    Ordering::Equal
                } else if a.is_nan() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            _ => type_tag(self).cmp(&type_tag(other)),
        }
    }
}

fn type_tag(value: &Value) -> u8 {
    use Value::*;
    match value {
        Integer(_) => 1,
        Float(_) => 2,
        Boolean(_) => 3,
        Text(_) => 4,
        Categorical { .. } => 5,
        Date(_) => 6,
        Timestamp(_) => 7,
        Missing => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_is_incomparable() {
        assert_eq!(Value::Missing.partial_cmp(&Value::Integer(1)), None);
        assert_eq!(Value::Missing.partial_cmp(&Value::Missing), None);
    }

    #[test]
    fn mixed_types_are_incomparable() {
        assert_eq!(Value::Integer(1).partial_cmp(&Value::Text("1".into())), None);
    }

    #[test]
    fn total_order_puts_missing_first() {
        let mut vals = vec![Value::Integer(2), Value::Missing, Value::Integer(1)];
        vals.sort();
        assert_eq!(vals[0], Value::Missing);
        assert_eq!(vals[1], Value::Integer(1));
    }

    #[test]
    fn categorical_orders_by_level_not_label() {
        let low = Value::Categorical { code: 0, label: "low".into() };
        let high = Value::Categorical { code: 1, label: "high".into() };
        // Lexically "high" < "low", but level order says low < high
        assert_eq!(low.partial_cmp(&high), Some(Ordering::Less));
    }

    #[test]
    fn nan_sorts_above_floats() {
        let mut vals = vec![Value::Float(f64::NAN), Value::Float(1.0)];
        vals.sort();
        assert_eq!(vals[0], Value::Float(1.0));
    }
}

//! Runtime value representation
//!
//! Each cell of a column is either a concrete `Value` of the column's
//! declared type or `Missing`. Missing is type-preserving: there is no
//! cross-type sentinel, and a missing cell never changes the column type.

mod cast;
mod comparison;
mod display;
mod hash;

use crate::{DataType, Date, Timestamp, Truth};

/// A single cell value
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    /// A categorical label; `code` is the position in the column's level set
    Categorical { code: u32, label: String },
    Date(Date),
    Timestamp(Timestamp),
    Missing,
}

impl Value {
    /// Check if this value is the Missing marker
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Short type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Float(_) => "FLOAT",
            Value::Boolean(_) => "BOOLEAN",
            Value::Text(_) => "TEXT",
            Value::Categorical { .. } => "CATEGORICAL",
            Value::Date(_) => "DATE",
            Value::Timestamp(_) => "TIMESTAMP",
            Value::Missing => "MISSING",
        }
    }

    /// Check whether this value may legally live in a column of `dtype`.
    ///
    /// Missing fits every column. A categorical value fits only if its code
    /// points at its own label within the declared level set.
    pub fn matches_type(&self, dtype: &DataType) -> bool {
        match (self, dtype) {
            (Value::Missing, _) => true,
            (Value::Integer(_), DataType::Integer) => true,
            (Value::Float(_), DataType::Float) => true,
            (Value::Boolean(_), DataType::Boolean) => true,
            (Value::Text(_), DataType::Text) => true,
            (Value::Categorical { code, label }, DataType::Categorical { levels }) => {
                levels.get(*code as usize).map(|l| l == label).unwrap_or(false)
            }
            (Value::Date(_), DataType::Date) => true,
            (Value::Timestamp(_), DataType::Timestamp) => true,
            _ => false,
        }
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Map a value into three-valued logic: Boolean maps directly, Missing
    /// is Unknown. Anything else is Unknown as well - a predicate that
    /// produces a non-boolean did not evaluate "true".
    pub fn truth(&self) -> Truth {
        match self {
            Value::Boolean(b) => Truth::from(*b),
            _ => Truth::Unknown,
        }
    }

    /// Build a categorical value by looking up `label` in `levels`
    pub fn categorical(label: &str, levels: &[String]) -> Option<Value> {
        levels
            .iter()
            .position(|l| l == label)
            .map(|code| Value::Categorical { code: code as u32, label: label.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fits_every_type() {
        assert!(Value::Missing.matches_type(&DataType::Integer));
        assert!(Value::Missing.matches_type(&DataType::Text));
        assert!(Value::Missing.matches_type(&DataType::Categorical { levels: vec![] }));
    }

    #[test]
    fn categorical_must_agree_with_levels() {
        let levels = vec!["low".to_string(), "high".to_string()];
        let v = Value::categorical("high", &levels).unwrap();
        assert!(v.matches_type(&DataType::Categorical { levels: levels.clone() }));
        // A code pointing at the wrong label is rejected
        let forged = Value::Categorical { code: 0, label: "high".to_string() };
        assert!(!forged.matches_type(&DataType::Categorical { levels }));
    }

    #[test]
    fn truth_of_values() {
        assert_eq!(Value::Boolean(true).truth(), Truth::True);
        assert_eq!(Value::Boolean(false).truth(), Truth::False);
        assert_eq!(Value::Missing.truth(), Truth::Unknown);
        assert_eq!(Value::Integer(1).truth(), Truth::Unknown);
    }
}

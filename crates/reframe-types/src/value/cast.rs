//! Explicit cast rules
//!
//! Casts are lossless or policy-defined-lossy; anything else refuses with
//! a coercion error. In particular, Text to number parses plain literals
//! only - "1,000,000" fails because separator stripping belongs to the
//! string-cleaning collaborator, which runs before cast, not inside it.

use crate::{DataType, Date, Timestamp, TypeError, Value};

impl Value {
    /// Cast this value to the target data type.
    ///
    /// Missing casts to Missing for every target.
    pub fn cast(&self, target: &DataType) -> Result<Value, TypeError> {
        use DataType as T;

        if self.is_missing() {
            return Ok(Value::Missing);
        }

        match target {
            T::Integer => self.cast_integer(),
            T::Float => self.cast_float(),
            T::Boolean => self.cast_boolean(),
            T::Text => Ok(Value::Text(self.to_string())),
            T::Categorical { levels } => self.cast_categorical(levels),
            T::Date => self.cast_date(),
            T::Timestamp => self.cast_timestamp(),
        }
    }

    fn coercion_err(&self, to: &str) -> TypeError {
        TypeError::Coercion { from: format!("{} '{}'", self.type_name(), self), to: to.to_string() }
    }

    fn cast_integer(&self) -> Result<Value, TypeError> {
        match self {
            Value::Integer(i) => Ok(Value::Integer(*i)),
            // Float to Integer only when exact: no silent truncation
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Ok(Value::Integer(*f as i64)),
            Value::Boolean(b) => Ok(Value::Integer(if *b { 1 } else { 0 })),
            Value::Text(s) => {
                s.trim().parse::<i64>().map(Value::Integer).map_err(|_| self.coercion_err("INTEGER"))
            }
            _ => Err(self.coercion_err("INTEGER")),
        }
    }

    fn cast_float(&self) -> Result<Value, TypeError> {
        match self {
            Value::Float(f) => Ok(Value::Float(*f)),
            Value::Integer(i) => Ok(Value::Float(*i as f64)),
            Value::Boolean(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
            Value::Text(s) => {
                s.trim().parse::<f64>().map(Value::Float).map_err(|_| self.coercion_err("FLOAT"))
            }
            _ => Err(self.coercion_err("FLOAT")),
        }
    }

    fn cast_boolean(&self) -> Result<Value, TypeError> {
        match self {
            Value::Boolean(b) => Ok(Value::Boolean(*b)),
            Value::Integer(0) => Ok(Value::Boolean(false)),
            Value::Integer(1) => Ok(Value::Boolean(true)),
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                _ => Err(self.coercion_err("BOOLEAN")),
            },
            _ => Err(self.coercion_err("BOOLEAN")),
        }
    }

    fn cast_categorical(&self, levels: &[String]) -> Result<Value, TypeError> {
        let label = match self {
            Value::Text(s) => s.as_str(),
            // Re-code against the target level set
            Value::Categorical { label, .. } => label.as_str(),
            _ => return Err(self.coercion_err("CATEGORICAL")),
        };
        Value::categorical(label, levels).ok_or_else(|| TypeError::UnknownLevel {
            label: label.to_string(),
            levels: levels.to_vec(),
        })
    }

    fn cast_date(&self) -> Result<Value, TypeError> {
        match self {
            Value::Date(d) => Ok(Value::Date(*d)),
            Value::Text(s) => s.trim().parse::<Date>().map(Value::Date),
            _ => Err(self.coercion_err("DATE")),
        }
    }

    fn cast_timestamp(&self) -> Result<Value, TypeError> {
        match self {
            Value::Timestamp(ts) => Ok(Value::Timestamp(*ts)),
            Value::Date(d) => Ok(Value::Timestamp(Timestamp::from_date(*d))),
            Value::Text(s) => s.trim().parse::<Timestamp>().map(Value::Timestamp),
            _ => Err(self.coercion_err("TIMESTAMP")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_casts_to_missing() {
        assert_eq!(Value::Missing.cast(&DataType::Integer).unwrap(), Value::Missing);
        assert_eq!(Value::Missing.cast(&DataType::Text).unwrap(), Value::Missing);
    }

    #[test]
    fn text_to_integer_parses_plain_literals_only() {
        assert_eq!(
            Value::Text("42".into()).cast(&DataType::Integer).unwrap(),
            Value::Integer(42)
        );
        // Separator stripping is a distinct collaborator, not cast's job
        assert!(Value::Text("1,000,000".into()).cast(&DataType::Integer).is_err());
        assert!(Value::Text("$5".into()).cast(&DataType::Float).is_err());
    }

    #[test]
    fn float_to_integer_requires_exactness() {
        assert_eq!(Value::Float(3.0).cast(&DataType::Integer).unwrap(), Value::Integer(3));
        assert!(Value::Float(3.5).cast(&DataType::Integer).is_err());
        assert!(Value::Float(f64::NAN).cast(&DataType::Integer).is_err());
    }

    #[test]
    fn integer_widens_to_float() {
        assert_eq!(Value::Integer(7).cast(&DataType::Float).unwrap(), Value::Float(7.0));
    }

    #[test]
    fn categorical_cast_checks_levels() {
        let dtype = DataType::Categorical { levels: vec!["a".into(), "b".into()] };
        assert_eq!(
            Value::Text("b".into()).cast(&dtype).unwrap(),
            Value::Categorical { code: 1, label: "b".into() }
        );
        assert!(matches!(
            Value::Text("z".into()).cast(&dtype),
            Err(TypeError::UnknownLevel { .. })
        ));
    }

    #[test]
    fn date_and_timestamp_from_text() {
        assert_eq!(
            Value::Text("2015-06-30".into()).cast(&DataType::Date).unwrap(),
            Value::Date("2015-06-30".parse().unwrap())
        );
        assert_eq!(
            Value::Date("2015-06-30".parse().unwrap()).cast(&DataType::Timestamp).unwrap(),
            Value::Timestamp("2015-06-30 00:00:00".parse().unwrap())
        );
    }

    #[test]
    fn everything_casts_to_text() {
        assert_eq!(Value::Integer(5).cast(&DataType::Text).unwrap(), Value::Text("5".into()));
        assert_eq!(
            Value::Boolean(true).cast(&DataType::Text).unwrap(),
            Value::Text("true".into())
        );
    }
}

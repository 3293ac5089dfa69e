use std::fmt;

use crate::Value;

/// Display implementation (how values are shown to users and exported)
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(n) => write!(f, "{}", n),
            Value::Boolean(true) => write!(f, "true"),
            Value::Boolean(false) => write!(f, "false"),
            Value::Text(s) => write!(f, "{}", s),
            Value::Categorical { label, .. } => write!(f, "{}", label),
            Value::Date(d) => write!(f, "{}", d),
            Value::Timestamp(ts) => write!(f, "{}", ts),
            Value::Missing => write!(f, ""),
        }
    }
}

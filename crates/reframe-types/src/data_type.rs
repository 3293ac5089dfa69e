use std::fmt;

/// Declared type of a column.
///
/// A closed tag set: every consuming operation matches exhaustively on the
/// variant, there is no open-ended runtime type registry. Missing cells are
/// represented at the value level and never change a column's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Float,
    Boolean,
    Text,
    /// Ordered label set; values are codes into `levels`
    Categorical { levels: Vec<String> },
    Date,
    Timestamp,
}

impl DataType {
    /// Check if this is a numeric type (INTEGER or FLOAT)
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }

    /// Smallest type both inputs convert to losslessly, if one exists.
    ///
    /// Identical types unify to themselves; Integer and Float unify to Float.
    /// Everything else has no common supertype - callers that want a wider
    /// fallback (e.g. everything-as-Text in pivot_longer) must opt in
    /// explicitly.
    pub fn common_supertype(&self, other: &DataType) -> Option<DataType> {
        use DataType::*;
        if self == other {
            return Some(self.clone());
        }
        match (self, other) {
            (Integer, Float) | (Float, Integer) => Some(Float),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Float => write!(f, "FLOAT"),
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Text => write!(f, "TEXT"),
            DataType::Categorical { levels } => {
                write!(f, "CATEGORICAL({})", levels.join(", "))
            }
            DataType::Date => write!(f, "DATE"),
            DataType::Timestamp => write!(f, "TIMESTAMP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_types_unify_to_float() {
        assert_eq!(
            DataType::Integer.common_supertype(&DataType::Float),
            Some(DataType::Float)
        );
        assert_eq!(
            DataType::Float.common_supertype(&DataType::Integer),
            Some(DataType::Float)
        );
    }

    #[test]
    fn identical_types_unify() {
        assert_eq!(
            DataType::Text.common_supertype(&DataType::Text),
            Some(DataType::Text)
        );
    }

    #[test]
    fn unrelated_types_do_not_unify() {
        assert_eq!(DataType::Text.common_supertype(&DataType::Integer), None);
        assert_eq!(DataType::Boolean.common_supertype(&DataType::Date), None);
    }
}

// ============================================================================
// Errors
// ============================================================================

use reframe_types::TypeError;

#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    UnknownColumn { name: String, available: Vec<String> },
    DuplicateColumn(String),
    LengthMismatch { column: String, expected: usize, actual: usize },
    TypeMismatch { column: String, expected: String, actual: String },
    RowArityMismatch { expected: usize, actual: usize },
    /// bind_rows over tables whose column sets differ
    ShapeMismatch(String),
    Type(TypeError),
    Io(String),
    Format(String),
}

impl TableError {
    /// Attach a column name to an error raised below the table layer
    pub(crate) fn with_column(self, name: &str) -> TableError {
        match self {
            TableError::TypeMismatch { expected, actual, .. } => {
                TableError::TypeMismatch { column: name.to_string(), expected, actual }
            }
            TableError::LengthMismatch { expected, actual, .. } => {
                TableError::LengthMismatch { column: name.to_string(), expected, actual }
            }
            other => other,
        }
    }
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::UnknownColumn { name, available } => {
                if available.is_empty() {
                    write!(f, "Column '{}' not found", name)
                } else {
                    write!(
                        f,
                        "Column '{}' not found. Available columns: {}",
                        name,
                        available.join(", ")
                    )
                }
            }
            TableError::DuplicateColumn(name) => write!(f, "Duplicate column name '{}'", name),
            TableError::LengthMismatch { column, expected, actual } => {
                write!(f, "Column '{}' has {} rows, expected {}", column, actual, expected)
            }
            TableError::TypeMismatch { column, expected, actual } => {
                write!(f, "Type mismatch in column '{}': expected {}, got {}", column, expected, actual)
            }
            TableError::RowArityMismatch { expected, actual } => {
                write!(f, "Row has {} values, expected {}", actual, expected)
            }
            TableError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            TableError::Type(err) => write!(f, "{}", err),
            TableError::Io(msg) => write!(f, "I/O error: {}", msg),
            TableError::Format(msg) => write!(f, "Format error: {}", msg),
        }
    }
}

impl std::error::Error for TableError {}

impl From<TypeError> for TableError {
    fn from(err: TypeError) -> Self {
        TableError::Type(err)
    }
}

impl From<std::io::Error> for TableError {
    fn from(err: std::io::Error) -> Self {
        TableError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Format(err.to_string())
    }
}

use reframe_table::TableError;
use reframe_types::TypeError;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Error raised by the table layer (unknown column, type mismatch, ...)
    Table(TableError),
    /// pivot_longer over value columns with no common supertype and no
    /// explicit Text fallback requested
    HeterogeneousPivotType { columns: Vec<String>, types: Vec<String> },
    /// pivot_wider found more than one row for an (id, name) combination
    /// and no aggregate was supplied
    DuplicateKey { id_values: Vec<String>, name: String },
    /// pivot_wider cannot name an output column after a Missing value
    MissingPivotName { row: usize },
    /// A group-only operation was called on an ungrouped table
    GroupRequired(&'static str),
    /// Join key columns have different declared types; the caller must
    /// cast explicitly before joining
    JoinKeyTypeMismatch { left: String, right: String, left_type: String, right_type: String },
    /// A reducer was applied to a column it is not defined over
    InvalidAggregate(String),
    /// Malformed regex in the string collaborator
    Pattern(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Table(err) => write!(f, "{}", err),
            EngineError::HeterogeneousPivotType { columns, types } => {
                write!(
                    f,
                    "Cannot pivot columns ({}) of mixed types ({}); cast first or opt into the Text fallback",
                    columns.join(", "),
                    types.join(", ")
                )
            }
            EngineError::DuplicateKey { id_values, name } => {
                write!(
                    f,
                    "Duplicate rows for id ({}) and name '{}'; supply an aggregate to resolve",
                    id_values.join(", "),
                    name
                )
            }
            EngineError::MissingPivotName { row } => {
                write!(f, "Row {} has a missing value in the names-from column", row)
            }
            EngineError::GroupRequired(op) => {
                write!(f, "{} requires a grouped table; call group_by first", op)
            }
            EngineError::JoinKeyTypeMismatch { left, right, left_type, right_type } => {
                write!(
                    f,
                    "Join keys '{}' ({}) and '{}' ({}) have different types; cast explicitly before joining",
                    left, left_type, right, right_type
                )
            }
            EngineError::InvalidAggregate(msg) => write!(f, "Invalid aggregate: {}", msg),
            EngineError::Pattern(msg) => write!(f, "Invalid pattern: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<TableError> for EngineError {
    fn from(err: TableError) -> Self {
        EngineError::Table(err)
    }
}

impl From<TypeError> for EngineError {
    fn from(err: TypeError) -> Self {
        EngineError::Table(TableError::Type(err))
    }
}

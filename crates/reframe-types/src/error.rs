#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    /// A value cannot be converted to the target type under the documented
    /// cast rules. Formatting quirks (thousands separators, currency signs)
    /// are deliberately NOT handled here - string cleaning is a separate
    /// collaborator that runs before cast.
    Coercion { from: String, to: String },
    /// Label is not a member of a categorical level set
    UnknownLevel { label: String, levels: Vec<String> },
    /// Malformed date or timestamp literal
    InvalidTemporal(String),
}

impl std::fmt::Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeError::Coercion { from, to } => {
                write!(f, "Cannot coerce {} to {}", from, to)
            }
            TypeError::UnknownLevel { label, levels } => {
                write!(f, "Label '{}' is not a level of ({})", label, levels.join(", "))
            }
            TypeError::InvalidTemporal(msg) => write!(f, "Invalid temporal value: {}", msg),
        }
    }
}

impl std::error::Error for TypeError {}

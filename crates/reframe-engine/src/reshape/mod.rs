//! Reshaper: pivot_longer and pivot_wider
//!
//! The two pivots convert between wide layout (one observation spread
//! across columns) and long layout (column-name / value pairs). They are
//! inverses when the wide table has no duplicate keys and the value
//! columns share a type; both drop group metadata, since the row/column
//! structure they produce no longer matches what was grouped.

mod longer;
mod wider;

pub use longer::pivot_longer;
pub use wider::pivot_wider;

/// What pivot_longer does when the value columns do not share a common
/// supertype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixedTypePolicy {
    /// Refuse to pivot; the caller casts explicitly first
    #[default]
    Error,
    /// Render every value through its Text form and pivot as Text
    CoerceToText,
}

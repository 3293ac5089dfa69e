//! Table storage and row-level verbs
//!
//! Provides the engine's boundary type: an ordered collection of named,
//! same-length, typed columns whose row order is semantically significant.
//! Tables are immutable values; every verb returns a new Table and never
//! touches its input. Unchanged columns are shared structurally between
//! Table versions (an Arc per column), which is not observable.
//!
//! This crate owns the verbs that do not need cross-table machinery:
//! `select`, `filter`, `arrange`, `mutate`, plus the ingestion boundary
//! (`TableBuilder`, `bind_rows`) and persistence (JSON, delimited export).
//! Reshaping, joins, grouping and positional operators live in
//! `reframe-engine`.

mod arrange;
mod bind;
mod builder;
mod column;
mod error;
mod filter;
mod group;
mod mutate;
pub mod persistence;
mod table;

pub use arrange::{NullOrder, SortDirection, SortKey};
pub use builder::TableBuilder;
pub use column::Column;
pub use error::TableError;
pub use group::{GroupEntry, GroupMeta, GroupSlice, RowRef};
pub use table::Table;

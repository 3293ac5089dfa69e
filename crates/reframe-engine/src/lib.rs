//! Transformation engine for reframe tables
//!
//! The cross-table and cross-row operations that `reframe-table`'s verbs
//! do not cover:
//! - Reshaper: `pivot_longer` / `pivot_wider`
//! - Joiner: the relational join family (inner/left/right/full/semi/anti)
//! - Group Engine: `group_by`, grouped mutate, reducing `summarize`
//! - Positional Operator: order-and-group-aware first/last/lag/lead
//! - String collaborator: regex detect/replace over text columns
//!
//! Every operation is a pure function from Table(s) to a new Table; a
//! failed operation returns an error and leaves its inputs untouched.

mod errors;
mod group;
mod join;
#[cfg(feature = "parallel")]
mod parallel;
mod reshape;
pub mod text;
mod window;

pub use errors::EngineError;
pub use group::{group_by, grouped_mutate, summarize, ungroup, AggSpec, Reducer};
pub use join::{join, JoinKind};
#[cfg(feature = "parallel")]
pub use parallel::ParallelConfig;
pub use reshape::{pivot_longer, pivot_wider, MixedTypePolicy};
pub use window::{first, lag, last, lead, mutate_first, mutate_lag, mutate_last, mutate_lead};

//! Type System for the reframe engine
//!
//! This crate provides the value layer shared by every table operation:
//! - Data type definitions (Integer, Float, Text, Categorical, ...)
//! - Runtime value representation, including the Missing marker
//! - Three-valued logic for predicates over possibly-missing data
//! - Explicit cast rules (no silent coercion)

mod data_type;
mod error;
mod temporal;
mod truth;
mod value;

pub use data_type::DataType;
pub use error::TypeError;
pub use temporal::{Date, Timestamp};
pub use truth::Truth;
pub use value::Value;

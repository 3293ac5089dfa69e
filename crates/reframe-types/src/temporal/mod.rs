//! Temporal types
//!
//! Calendar dates and timestamps stored as components so that comparison
//! and formatting never round-trip through strings.

mod date;
mod timestamp;

pub use date::Date;
pub use timestamp::Timestamp;

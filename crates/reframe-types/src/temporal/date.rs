//! Calendar date type

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::TypeError;

/// A calendar date without a time component
///
/// Format: YYYY-MM-DD (e.g. '2015-06-30')
/// Stored as year, month, day components for correct comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    pub year: i32,
    pub month: u8, // 1-12
    pub day: u8,   // 1-31
}

impl Date {
    /// Create a new Date (validation is basic range checking)
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, TypeError> {
        if !(1..=12).contains(&month) {
            return Err(TypeError::InvalidTemporal(format!("month {} out of range", month)));
        }
        if !(1..=31).contains(&day) {
            return Err(TypeError::InvalidTemporal(format!("day {} out of range", day)));
        }
        Ok(Date { year, month, day })
    }
}

impl FromStr for Date {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 3 {
            return Err(TypeError::InvalidTemporal(format!(
                "'{}' (expected YYYY-MM-DD)",
                s
            )));
        }

        let year = parts[0]
            .parse::<i32>()
            .map_err(|_| TypeError::InvalidTemporal(format!("year '{}'", parts[0])))?;
        let month = parts[1]
            .parse::<u8>()
            .map_err(|_| TypeError::InvalidTemporal(format!("month '{}'", parts[1])))?;
        let day = parts[2]
            .parse::<u8>()
            .map_err(|_| TypeError::InvalidTemporal(format!("day '{}'", parts[2])))?;

        Date::new(year, month, day)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

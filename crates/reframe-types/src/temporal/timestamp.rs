//! Timestamp type (date plus wall-clock time)

use std::{cmp::Ordering, fmt, str::FromStr};

use super::Date;
use crate::TypeError;

/// A date with a time-of-day component
///
/// Format: YYYY-MM-DD HH:MM:SS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    pub date: Date,
    pub hour: u8,   // 0-23
    pub minute: u8, // 0-59
    pub second: u8, // 0-59
}

impl Timestamp {
    pub fn new(date: Date, hour: u8, minute: u8, second: u8) -> Result<Self, TypeError> {
        if hour > 23 {
            return Err(TypeError::InvalidTemporal(format!("hour {} out of range", hour)));
        }
        if minute > 59 {
            return Err(TypeError::InvalidTemporal(format!("minute {} out of range", minute)));
        }
        if second > 59 {
            return Err(TypeError::InvalidTemporal(format!("second {} out of range", second)));
        }
        Ok(Timestamp { date, hour, minute, second })
    }

    /// Midnight on the given date
    pub fn from_date(date: Date) -> Self {
        Timestamp { date, hour: 0, minute: 0, second: 0 }
    }
}

impl FromStr for Timestamp {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date_part, time_part) = s
            .split_once(' ')
            .ok_or_else(|| TypeError::InvalidTemporal(format!("'{}' (expected YYYY-MM-DD HH:MM:SS)", s)))?;

        let date: Date = date_part.parse()?;

        let parts: Vec<&str> = time_part.split(':').collect();
        if parts.len() != 3 {
            return Err(TypeError::InvalidTemporal(format!("time '{}' (expected HH:MM:SS)", time_part)));
        }
        let hour = parts[0]
            .parse::<u8>()
            .map_err(|_| TypeError::InvalidTemporal(format!("hour '{}'", parts[0])))?;
        let minute = parts[1]
            .parse::<u8>()
            .map_err(|_| TypeError::InvalidTemporal(format!("minute '{}'", parts[1])))?;
        let second = parts[2]
            .parse::<u8>()
            .map_err(|_| TypeError::InvalidTemporal(format!("second '{}'", parts[2])))?;

        Timestamp::new(date, hour, minute, second)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:{:02}:{:02}", self.date, self.hour, self.minute, self.second)
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.date, self.hour, self.minute, self.second)
            .cmp(&(other.date, other.hour, other.minute, other.second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let ts: Timestamp = "2015-06-30 08:30:00".parse().unwrap();
        assert_eq!(ts.to_string(), "2015-06-30 08:30:00");
    }

    #[test]
    fn orders_by_date_then_time() {
        let a: Timestamp = "2015-06-30 08:30:00".parse().unwrap();
        let b: Timestamp = "2015-06-30 09:00:00".parse().unwrap();
        let c: Timestamp = "2015-07-01 00:00:00".parse().unwrap();
        assert!(a < b);
        assert!(b < c);
    }
}

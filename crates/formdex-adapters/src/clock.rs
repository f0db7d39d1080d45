//! Clock adapters.

use chrono::{Local, NaiveDate};

use formdex_core::application::ports::Clock;

/// Production clock: today's date in the local time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn today(&self) -> String {
        Local::now().format("%Y%m%d").to_string()
    }
}

/// A clock stuck on one day. Used in tests and for reproducible CLI runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock {
    today: String,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            today: date.format("%Y%m%d").to_string(),
        }
    }

    /// Parse a `YYYYMMDD` or `YYYY-MM-DD` date.
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, "%Y%m%d")
            .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
            .map(Self::new)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.today.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdex_core::domain::is_store_date;

    #[test]
    fn system_clock_returns_a_store_date() {
        assert!(is_store_date(&SystemClock::new().today()));
    }

    #[test]
    fn fixed_clock_accepts_both_formats() {
        assert_eq!(FixedClock::parse("20250615").unwrap().today(), "20250615");
        assert_eq!(FixedClock::parse("2025-06-15").unwrap().today(), "20250615");
        assert!(FixedClock::parse("15.06.2025").is_err());
    }
}

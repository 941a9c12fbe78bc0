//! Time-of-day for the daily reconciliation run

use chrono::NaiveTime;
use std::fmt;
use std::str::FromStr;

/// A wall-clock time in `HH:MM` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReconTime {
    hour: u32,
    minute: u32,
}

impl ReconTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// The same time as a chrono value
    pub fn as_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl Default for ReconTime {
    fn default() -> Self {
        Self { hour: 2, minute: 0 }
    }
}

impl fmt::Display for ReconTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Error returned for anything other than a valid two-digit `HH:MM`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconTimeParseError(pub String);

impl fmt::Display for ReconTimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid time of day: {}", self.0)
    }
}

impl std::error::Error for ReconTimeParseError {}

impl FromStr for ReconTime {
    type Err = ReconTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ReconTimeParseError(s.to_string());

        let (hour, minute) = s.split_once(':').ok_or_else(err)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hour) || !two_digits(minute) {
            return Err(err());
        }

        let hour: u32 = hour.parse().map_err(|_| err())?;
        let minute: u32 = minute.parse().map_err(|_| err())?;
        Self::new(hour, minute).ok_or_else(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!("02:00".parse::<ReconTime>().unwrap(), ReconTime::default());
        let t: ReconTime = "23:59".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 59));
        assert_eq!(t.to_string(), "23:59");
    }

    #[test]
    fn test_parse_rejects_bad_format() {
        for bad in ["2:00", "02:0", "0200", "ab:cd", "24:00", "12:60", " 02:00", "-1:00"] {
            assert!(bad.parse::<ReconTime>().is_err(), "{bad} should be rejected");
        }
    }
}

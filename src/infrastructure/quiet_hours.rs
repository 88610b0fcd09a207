use chrono::Timelike;

use crate::config::ConfigError;

/// Daily window in which notifications are dropped. Equal bounds disable it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuietHours {
    start: u32,
    end: u32,
}

impl QuietHours {
    pub fn parse(start: &str, end: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            start: parse_clock(start)?,
            end: parse_clock(end)?,
        })
    }

    #[cfg(test)]
    pub fn disabled() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn contains<T: Timelike>(&self, time: &T) -> bool {
        if self.start == self.end {
            return false;
        }
        let minutes = time.hour() * 60 + time.minute();
        if self.start < self.end {
            minutes >= self.start && minutes < self.end
        } else {
            // window wraps past midnight
            minutes >= self.start || minutes < self.end
        }
    }
}

pub fn parse_clock(value: &str) -> Result<u32, ConfigError> {
    let invalid = || ConfigError::InvalidClock(value.to_string());
    let (hour, minute) = value.trim().split_once(':').ok_or_else(invalid)?;
    let parse_part = |part: &str| -> Result<u32, ConfigError> {
        if part.is_empty() || part.len() > 2 || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse::<u32>().map_err(|_| invalid())
    };
    let hour = parse_part(hour)?;
    let minute = parse_part(minute)?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok(hour * 60 + minute)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn overnight_window() {
        let quiet = QuietHours::parse("23:00", "08:00").unwrap();
        assert!(quiet.contains(&at(23, 30)));
        assert!(quiet.contains(&at(23, 0)));
        assert!(quiet.contains(&at(3, 15)));
        assert!(!quiet.contains(&at(8, 0)));
        assert!(!quiet.contains(&at(9, 0)));
    }

    #[test]
    fn same_day_window() {
        let quiet = QuietHours::parse("12:00", "13:30").unwrap();
        assert!(quiet.contains(&at(12, 45)));
        assert!(!quiet.contains(&at(13, 30)));
        assert!(!quiet.contains(&at(11, 59)));
    }

    #[test]
    fn equal_bounds_disable_window() {
        let quiet = QuietHours::parse("22:00", "22:00").unwrap();
        assert!(!quiet.contains(&at(22, 0)));
        assert!(!quiet.contains(&at(3, 0)));
        assert!(!QuietHours::disabled().contains(&at(0, 0)));
    }

    #[test]
    fn rejects_bad_clock_values() {
        assert_eq!(parse_clock("8:05").unwrap(), 485);
        for bad in ["24:00", "12:60", "1200", "12:00:00", "ab:cd", "", "123:00"] {
            assert!(parse_clock(bad).is_err(), "{bad}");
        }
    }
}

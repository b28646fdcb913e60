//! UTC date utilities without timezone dependencies.
//!
//! Commit messages are stamped with the current UTC date. The civil date is
//! derived directly from the Unix timestamp, so the result is independent
//! of the local time zone and locale.
//!
//! # Examples
//!
//! ```ignore
//! let date = DateUtc::today();
//! assert_eq!(date.format_ymd().len(), 10); // "YYYY-MM-DD"
//!
//! let date = DateUtc::from_unix_seconds(1_507_680_000);
//! assert_eq!(date.format_ymd(), "2017-10-11");
//! ```

use anyhow::{Result, bail};
use std::time::{SystemTime, UNIX_EPOCH};

/// UTC calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl DateUtc {
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Current UTC date from the system clock.
    pub fn today() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_unix_seconds(secs)
    }

    /// Civil date for a Unix timestamp.
    ///
    /// Uses Howard Hinnant's `civil_from_days` algorithm over the number of
    /// whole days since 1970-01-01.
    #[allow(clippy::cast_possible_truncation)] // Ranges bounded by the calendar
    #[allow(clippy::cast_sign_loss)]
    pub fn from_unix_seconds(secs: u64) -> Self {
        let days = (secs / 86_400) as i64;
        let z = days + 719_468;
        let era = z / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);

        Self {
            year: year as u16,
            month: month as u8,
            day: day as u8,
        }
    }

    /// Format as `YYYY-MM-DD`
    pub fn format_ymd(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    pub fn validate(self) -> Result<()> {
        let Self { year, month, day } = self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unix_seconds_epoch() {
        assert_eq!(DateUtc::from_unix_seconds(0), DateUtc::new(1970, 1, 1));
    }

    #[test]
    fn test_from_unix_seconds_known_dates() {
        // 2017-10-11T00:00:00Z
        assert_eq!(
            DateUtc::from_unix_seconds(1_507_680_000),
            DateUtc::new(2017, 10, 11)
        );
        // 2024-01-01T00:00:00Z
        assert_eq!(
            DateUtc::from_unix_seconds(1_704_067_200),
            DateUtc::new(2024, 1, 1)
        );
    }

    #[test]
    fn test_from_unix_seconds_leap_day() {
        // 2024-02-29T00:00:00Z
        assert_eq!(
            DateUtc::from_unix_seconds(1_709_164_800),
            DateUtc::new(2024, 2, 29)
        );
        // Last second of the leap day is still Feb 29
        assert_eq!(
            DateUtc::from_unix_seconds(1_709_164_800 + 86_399),
            DateUtc::new(2024, 2, 29)
        );
        // One second later rolls over to Mar 1
        assert_eq!(
            DateUtc::from_unix_seconds(1_709_251_200),
            DateUtc::new(2024, 3, 1)
        );
    }

    #[test]
    fn test_format_ymd_zero_padding() {
        assert_eq!(DateUtc::new(2017, 10, 11).format_ymd(), "2017-10-11");
        assert_eq!(DateUtc::new(2024, 6, 5).format_ymd(), "2024-06-05");
        assert_eq!(DateUtc::new(987, 3, 5).format_ymd(), "0987-03-05");
    }

    #[test]
    fn test_today_is_valid() {
        let today = DateUtc::today();
        assert!(today.validate().is_ok());
        assert!(today.year >= 2024);
    }

    #[test]
    fn test_validate_invalid_month() {
        assert!(DateUtc::new(2024, 0, 15).validate().is_err());
        assert!(DateUtc::new(2024, 13, 15).validate().is_err());
    }

    #[test]
    fn test_validate_invalid_day() {
        assert!(DateUtc::new(2024, 6, 0).validate().is_err());
        assert!(DateUtc::new(2024, 4, 31).validate().is_err());
        assert!(DateUtc::new(2023, 2, 29).validate().is_err());
    }

    #[test]
    fn test_validate_leap_year() {
        assert!(DateUtc::new(2024, 2, 29).validate().is_ok());
        assert!(DateUtc::new(2000, 2, 29).validate().is_ok()); // divisible by 400
        assert!(DateUtc::new(1900, 2, 29).validate().is_err()); // divisible by 100 but not 400
    }
}

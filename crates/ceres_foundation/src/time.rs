//! Calendar time.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i128 = 86_400;

/// Broken-down calendar time in UTC.
///
/// Fields may be out of range; [`Time::timestamp`] normalizes them the way
/// `mktime` does, so `2024-01-32` is the first of February.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Time {
    /// Calendar year.
    pub year: i64,
    /// Month, 1 through 12.
    pub month: i64,
    /// Day of the month, from 1.
    pub day: i64,
    /// Hour, 0 through 23.
    pub hour: i64,
    /// Minute, 0 through 59.
    pub minute: i64,
    /// Second, 0 through 59.
    pub second: i64,
}

impl Time {
    /// Creates a time from its fields.
    #[must_use]
    pub const fn new(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight on the given date.
    #[must_use]
    pub const fn date(year: i64, month: i64, day: i64) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// The time `timestamp` seconds after the Unix epoch.
    #[must_use]
    pub fn from_timestamp(timestamp: i64) -> Self {
        Self::from_seconds(i128::from(timestamp))
    }

    fn from_seconds(seconds: i128) -> Self {
        let days = seconds.div_euclid(SECONDS_PER_DAY);
        let seconds = seconds.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        Self::new(
            saturate(year),
            saturate(month),
            saturate(day),
            saturate(seconds / 3600),
            saturate(seconds % 3600 / 60),
            saturate(seconds % 60),
        )
    }

    /// Exact seconds since the Unix epoch. Never overflows.
    #[must_use]
    pub fn seconds(&self) -> i128 {
        let months = i128::from(self.year) * 12 + (i128::from(self.month) - 1);
        let year = months.div_euclid(12);
        let month = months.rem_euclid(12) + 1;
        let days = days_from_civil(year, month, 1) + (i128::from(self.day) - 1);
        days * SECONDS_PER_DAY
            + i128::from(self.hour) * 3600
            + i128::from(self.minute) * 60
            + i128::from(self.second)
    }

    /// Seconds since the Unix epoch, saturating at the bounds of `i64`.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        saturate(self.seconds())
    }

    /// The same instant with every field in range. The year saturates.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::from_seconds(self.seconds())
    }
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

fn days_from_civil(year: i128, month: i128, day: i128) -> i128 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month_index = (month + 9) % 12;
    let day_of_year = (153 * month_index + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

fn civil_from_days(days: i128) -> (i128, i128, i128) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_index = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * month_index + 2) / 5 + 1;
    let month = if month_index < 10 {
        month_index + 3
    } else {
        month_index - 9
    };
    let year = year_of_era + era * 400;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.normalized();
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            t.year, t.month, t.day, t.hour, t.minute, t.second
        )
    }
}

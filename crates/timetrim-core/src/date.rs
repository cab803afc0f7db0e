//! Calendar dates in the schedule's `YYYYMMDD` notation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 9999;

/// A calendar date as used by service periods and cutoffs.
///
/// Written as exactly eight digits, `YYYYMMDD`, so the year is always in
/// `1000..=9999`. Ordering is calendar order.
///
/// # Example
///
/// ```rust
/// use timetrim_core::ServiceDate;
///
/// let date: ServiceDate = "20170101".parse().unwrap();
/// assert_eq!(date, ServiceDate::from_yyyymmdd(20_170_101).unwrap());
/// assert_eq!(date.to_string(), "20170101");
/// assert!("20170230".parse::<ServiceDate>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceDate(NaiveDate);

impl ServiceDate {
    /// Creates a date from its year, month and day.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] if the components do not form a real
    /// calendar date or the year does not have four digits.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| Error::InvalidDate {
                message: format!("{year:04}-{month:02}-{day:02} is not a calendar date"),
            })
            .and_then(Self::try_from)
    }

    /// Creates a date from components known to be valid.
    ///
    /// Meant for constants, where an invalid date fails compilation.
    ///
    /// # Panics
    ///
    /// Panics if the components do not form a calendar date or the year does
    /// not have four digits.
    #[must_use]
    pub const fn from_ymd_const(year: i32, month: u32, day: u32) -> Self {
        assert!(
            year >= MIN_YEAR && year <= MAX_YEAR,
            "year must have four digits"
        );
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => Self(date),
            None => panic!("not a calendar date"),
        }
    }

    /// Creates a date from its integer `YYYYMMDD` form, e.g. `20170101`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] if the value does not have eight digits
    /// or does not decompose into a calendar date.
    pub fn from_yyyymmdd(value: u32) -> Result<Self> {
        if !(10_000_000..=99_999_999).contains(&value) {
            return Err(Error::InvalidDate {
                message: format!("{value} is not an 8-digit YYYYMMDD date"),
            });
        }
        #[allow(clippy::cast_possible_wrap)]
        let year = (value / 10_000) as i32;
        Self::from_ymd(year, (value / 100) % 100, value % 100)
    }

    /// Returns the integer `YYYYMMDD` form.
    #[must_use]
    // The year is always in `MIN_YEAR..=MAX_YEAR`.
    #[allow(clippy::cast_sign_loss)]
    pub fn as_yyyymmdd(&self) -> u32 {
        self.0.year() as u32 * 10_000 + self.0.month() * 100 + self.0.day()
    }

    /// Returns the underlying chrono date.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl TryFrom<NaiveDate> for ServiceDate {
    type Error = Error;

    fn try_from(date: NaiveDate) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            return Err(Error::InvalidDate {
                message: format!("{date} has no 8-digit YYYYMMDD form"),
            });
        }
        Ok(Self(date))
    }
}

impl fmt::Display for ServiceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%d"))
    }
}

impl FromStr for ServiceDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidDate {
                message: format!("'{s}' must be 8 digits in the format YYYYMMDD"),
            });
        }
        let value: u32 = s.parse().map_err(|e| Error::InvalidDate {
            message: format!("'{s}': {e}"),
        })?;
        Self::from_yyyymmdd(value)
    }
}

impl TryFrom<String> for ServiceDate {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ServiceDate> for String {
    fn from(date: ServiceDate) -> Self {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_eight_digit_dates() {
        let date: ServiceDate = "20161231".parse().unwrap();
        assert_eq!(date, ServiceDate::from_ymd(2016, 12, 31).unwrap());
        assert_eq!(date.as_yyyymmdd(), 20_161_231);
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in [
            "",
            "2017011",
            "201701011",
            "2017-01-01",
            "abcdefgh",
            "20171301",
            "20170230",
            " 20170101",
            "20170101\n",
            "+2017010",
        ] {
            assert!(bad.parse::<ServiceDate>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn padded_input_is_rejected_on_deserialize() {
        assert!(serde_json::from_str::<ServiceDate>("\"20170101\\n\"").is_err());
        assert!(serde_json::from_str::<ServiceDate>("\" 20170101\"").is_err());
    }

    #[test]
    fn years_outside_four_digits_are_rejected() {
        let far = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();
        assert!(ServiceDate::try_from(far).is_err());
        let early = NaiveDate::from_ymd_opt(999, 12, 31).unwrap();
        assert!(ServiceDate::try_from(early).is_err());
        assert!(ServiceDate::from_ymd(-1, 1, 1).is_err());
        assert!(ServiceDate::from_ymd(10_000, 1, 1).is_err());
    }

    #[test]
    fn every_constructed_date_reads_back() {
        for date in [
            ServiceDate::try_from(NaiveDate::from_ymd_opt(1000, 1, 1).unwrap()).unwrap(),
            ServiceDate::from_ymd(9999, 12, 31).unwrap(),
        ] {
            let json = serde_json::to_string(&date).unwrap();
            assert_eq!(serde_json::from_str::<ServiceDate>(&json).unwrap(), date);
            assert_eq!(ServiceDate::from_yyyymmdd(date.as_yyyymmdd()).unwrap(), date);
        }
    }

    #[test]
    fn leap_days() {
        assert!(ServiceDate::from_yyyymmdd(20_200_229).is_ok());
        assert!(ServiceDate::from_yyyymmdd(20_190_229).is_err());
    }

    #[test]
    fn integer_form_requires_eight_digits() {
        assert!(ServiceDate::from_yyyymmdd(0).is_err());
        assert!(ServiceDate::from_yyyymmdd(170_101).is_err());
        assert!(ServiceDate::from_yyyymmdd(100_000_000).is_err());
    }

    #[test]
    fn ordering_is_calendar_order() {
        let a = ServiceDate::from_yyyymmdd(20_161_231).unwrap();
        let b = ServiceDate::from_yyyymmdd(20_170_101).unwrap();
        assert!(a < b);
    }

    #[test]
    fn serde_uses_compact_form() {
        let date = ServiceDate::from_yyyymmdd(20_180_101).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"20180101\"");
        let parsed: ServiceDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
    }
}

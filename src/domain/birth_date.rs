//! BirthDate value object.

use super::errors::ValidationError;
use chrono::{Datelike, NaiveDate};
use std::fmt;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date of birth, parsed from strict ISO `YYYY-MM-DD` text.
///
/// # Example
///
/// ```
/// use rolodex::domain::BirthDate;
///
/// let dob = BirthDate::parse("1990-05-01").unwrap();
/// assert_eq!(dob.to_string(), "1990-05-01");
/// assert!(BirthDate::parse("1990-13-01").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Parse a `YYYY-MM-DD` string.
    ///
    /// Zero padding is required and impossible dates (month 13, February 30)
    /// are rejected.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidBirthDate` if the text is not a valid date.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        if !Self::has_iso_shape(text) {
            return Err(ValidationError::InvalidBirthDate(text.to_string()));
        }

        NaiveDate::parse_from_str(text, ISO_DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidBirthDate(text.to_string()))
    }

    fn has_iso_shape(text: &str) -> bool {
        let bytes = text.as_bytes();
        bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            })
    }

    /// The underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The first anniversary of this date on or after `today`.
    ///
    /// A February 29 birthday falls on February 28 in non-leap years.
    pub fn next_occurrence(&self, today: NaiveDate) -> NaiveDate {
        let this_year = self.anniversary_in(today.year());
        if this_year >= today {
            this_year
        } else {
            self.anniversary_in(today.year() + 1)
        }
    }

    /// Age in whole years on the given date.
    pub fn age_on(&self, on: NaiveDate) -> i32 {
        let mut age = on.year() - self.0.year();
        if self.anniversary_in(on.year()) > on {
            age -= 1;
        }
        age
    }

    fn anniversary_in(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.0.month(), self.0.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
            .unwrap_or(self.0)
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

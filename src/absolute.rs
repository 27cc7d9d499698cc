//! Conversion between calendar dates and absolute day numbers.
//!
//! Day 1 is 1-Jan-1601. Years are recovered from a day number by splitting it
//! into whole 400, 100, 4 and 1-year cycles (Reingold & Dershowitz,
//! *Calendrical Calculations*).

use crate::consts::{
    DAYS_IN_1_YEAR_CYCLE, DAYS_IN_4_YEAR_CYCLE, DAYS_IN_100_YEAR_CYCLE, DAYS_IN_400_YEAR_CYCLE,
    MAX_ABSOLUTE_DATE, MIN_ABSOLUTE_DATE, MIN_YEAR,
};
use crate::prelude::*;
use crate::types::{days_in_prior_months, split_day_of_year, valid_day_of_year};
use crate::{Date, DateError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A day count where 1 is 1-Jan-1601 and 876216 is 31-Dec-3999.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deref, Into, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i32")]
pub struct AbsoluteDate(i32);

impl AbsoluteDate {
    pub const MIN: Self = Self(MIN_ABSOLUTE_DATE);
    pub const MAX: Self = Self(MAX_ABSOLUTE_DATE);

    /// Creates an absolute date, validating the range.
    ///
    /// # Errors
    /// Returns `DateError::InvalidAbsoluteDate` outside `1..=876216`.
    pub fn new(value: i64) -> Result<Self, DateError> {
        if value < i64::from(MIN_ABSOLUTE_DATE) || value > i64::from(MAX_ABSOLUTE_DATE) {
            return Err(DateError::InvalidAbsoluteDate(value));
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| DateError::InvalidAbsoluteDate(value))
    }

    pub(crate) const fn from_validated(value: i32) -> Self {
        debug_assert!(value >= MIN_ABSOLUTE_DATE && value <= MAX_ABSOLUTE_DATE);
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    pub fn to_date(self) -> Date {
        Date::from_absolute(self)
    }
}

impl TryFrom<i64> for AbsoluteDate {
    type Error = DateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Date> for AbsoluteDate {
    fn from(date: Date) -> Self {
        date.to_absolute()
    }
}

impl From<AbsoluteDate> for Date {
    fn from(absolute: AbsoluteDate) -> Self {
        Self::from_absolute(absolute)
    }
}

/// Days from 1-Jan-1601 up to, not including, 1-Jan of `year`.
///
/// `days_in_past_years(MIN_YEAR) == 0`.
pub(crate) const fn days_in_past_years(year: u16) -> i32 {
    let y = year as i32 - MIN_YEAR as i32;
    365 * y // every year counted as common
        + y / 4 // julian leap days
        - y / 100 // centuries are common
        + y / 400 // except every fourth
}

/// Year containing `absolute`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) const fn year_from_absolute(absolute: AbsoluteDate) -> u16 {
    let n = absolute.get() - 1;

    let cycles_400 = n / DAYS_IN_400_YEAR_CYCLE;
    let remainder_100 = n % DAYS_IN_400_YEAR_CYCLE;
    let cycles_100 = remainder_100 / DAYS_IN_100_YEAR_CYCLE;
    let remainder_4 = remainder_100 % DAYS_IN_100_YEAR_CYCLE;
    let cycles_4 = remainder_4 / DAYS_IN_4_YEAR_CYCLE;
    let remainder_1 = remainder_4 % DAYS_IN_4_YEAR_CYCLE;
    let cycles_1 = remainder_1 / DAYS_IN_1_YEAR_CYCLE;

    let whole_years = 400 * cycles_400 + 100 * cycles_100 + 4 * cycles_4 + cycles_1;
    // A count of 4 means the day is the leap day closing its cycle, which
    // still belongs to the last year of that cycle.
    let year = if cycles_100 == 4 || cycles_1 == 4 {
        MIN_YEAR as i32 - 1 + whole_years
    } else {
        MIN_YEAR as i32 + whole_years
    };
    year as u16
}

impl Date {
    /// Days since 31-Dec-1600.
    pub const fn to_absolute(self) -> AbsoluteDate {
        let days = days_in_past_years(self.year()) + self.day_of_year() as i32;
        AbsoluteDate::from_validated(days)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_absolute(absolute: AbsoluteDate) -> Self {
        let year = year_from_absolute(absolute);
        let day_of_year = (absolute.get() - days_in_past_years(year)) as u16;
        let (month, day) = split_day_of_year(year, day_of_year);
        let date = Self::from_parts_unchecked(year, month, day);

        debug_assert_eq!(
            date.to_absolute(),
            absolute,
            "absolute date {absolute} converted to {date}, which does not convert back"
        );
        date
    }

    /// Converts a raw day count.
    ///
    /// # Errors
    /// Returns `DateError::InvalidAbsoluteDate` outside `1..=876216`.
    pub fn try_from_absolute(value: i64) -> Result<Self, DateError> {
        AbsoluteDate::new(value)
            .inspect_err(|err| debug!(value, error = %err, "rejected absolute date"))
            .map(Self::from_absolute)
    }

    /// Position of this date within its year, starting at 1.
    pub const fn day_of_year(self) -> u16 {
        days_in_prior_months(self.year(), self.month()) + self.day() as u16
    }

    /// Date of the `day_of_year`-th day of `year`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` or `DateError::InvalidDayOfYear`.
    pub fn from_day_of_year(day_of_year: u16, year: u16) -> Result<Self, DateError> {
        valid_day_of_year(day_of_year, year)
            .inspect_err(|err| debug!(day_of_year, year, error = %err, "rejected day of year"))?;
        let (month, day) = split_day_of_year(year, day_of_year);
        Ok(Self::from_parts_unchecked(year, month, day))
    }
}

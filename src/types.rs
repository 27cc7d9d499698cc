use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_COMMON_YEAR, DAYS_IN_LEAP_YEAR, DAYS_IN_MONTH, FEBRUARY,
    FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, JANUARY, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_DAY,
    MIN_YEAR, MONTH_ABBREVIATIONS,
};
use crate::DateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `MIN_YEAR..=MAX_YEAR` (1601..=3999)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's within `MIN_YEAR..=MAX_YEAR`
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` if the value is outside the supported range.
    pub fn new(value: u16) -> Result<Self, DateError> {
        valid_year(value)?;
        NonZeroU16::new(value)
            .map(Self)
            .ok_or(DateError::InvalidYear(i64::from(value)))
    }

    /// Builds a year from a value already known to be in range.
    pub(crate) const fn from_validated(value: u16) -> Self {
        debug_assert!(value >= MIN_YEAR && value <= MAX_YEAR);
        match NonZeroU16::new(value) {
            Some(non_zero) => Self(non_zero),
            None => panic!("year must be non-zero"),
        }
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Whether this year has 366 days
    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }

    /// Number of days in this year
    #[inline]
    pub const fn length(self) -> u16 {
        year_length(self.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateError> {
        valid_month(value)?;
        NonZeroU8::new(value)
            .map(Self)
            .ok_or(DateError::InvalidMonth(i64::from(value)))
    }

    pub(crate) const fn from_validated(value: u8) -> Self {
        debug_assert!(value >= JANUARY && value <= MAX_MONTH);
        match NonZeroU8::new(value) {
            Some(non_zero) => Self(non_zero),
            None => panic!("month must be non-zero"),
        }
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Three-letter English abbreviation (`Jan`..`Dec`)
    pub const fn abbreviation(self) -> &'static str {
        MONTH_ABBREVIATIONS[self.get() as usize]
    }

    /// Parses a three-letter English abbreviation, ignoring ASCII case.
    pub fn from_abbreviation(name: &str) -> Option<Self> {
        MONTH_ABBREVIATIONS
            .iter()
            .skip(1)
            .position(|abbr| abbr.eq_ignore_ascii_case(name))
            .and_then(|index| u8::try_from(index + 1).ok())
            .map(Self::from_validated)
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and valid for `month` of `year`.
    /// Arguments follow the month, day, year order of [`crate::Date::new`].
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the value is 0 or invalid for the given year and month,
    /// or the month/year error if those are out of range themselves.
    pub fn new(month: u8, value: u8, year: u16) -> Result<Self, DateError> {
        valid_day(month, value, year)?;
        NonZeroU8::new(value).map(Self).ok_or(DateError::InvalidDay {
            month: i64::from(month),
            day:   i64::from(value),
            year:  i64::from(year),
        })
    }

    pub(crate) const fn from_validated(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(non_zero) => Self(non_zero),
            None => panic!("day must be non-zero"),
        }
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Validators

/// Checks that `month` is in `1..=12`.
///
/// # Errors
/// Returns `DateError::InvalidMonth` otherwise.
pub fn valid_month(month: u8) -> Result<(), DateError> {
    if month < JANUARY || month > MAX_MONTH {
        return Err(DateError::InvalidMonth(i64::from(month)));
    }
    Ok(())
}

/// Checks that `year` is in `MIN_YEAR..=MAX_YEAR`.
///
/// # Errors
/// Returns `DateError::InvalidYear` otherwise.
pub fn valid_year(year: u16) -> Result<(), DateError> {
    if year < MIN_YEAR || year > MAX_YEAR {
        return Err(DateError::InvalidYear(i64::from(year)));
    }
    Ok(())
}

/// Checks that `day` exists in the given month of the given year.
///
/// # Errors
/// Returns the month or year error first, then `DateError::InvalidDay`.
pub fn valid_day(month: u8, day: u8, year: u16) -> Result<(), DateError> {
    let max_day = days_in_month(month, year)?;
    if day < MIN_DAY || day > max_day {
        return Err(DateError::InvalidDay {
            month: i64::from(month),
            day:   i64::from(day),
            year:  i64::from(year),
        });
    }
    Ok(())
}

/// Checks that `day_of_year` exists in the given year.
///
/// # Errors
/// Returns `DateError::InvalidYear` or `DateError::InvalidDayOfYear`.
pub fn valid_day_of_year(day_of_year: u16, year: u16) -> Result<(), DateError> {
    let max_day = days_in_year(year)?;
    if day_of_year < 1 || day_of_year > max_day {
        return Err(DateError::InvalidDayOfYear { day_of_year, year });
    }
    Ok(())
}

/// Number of days in `month` of `year` (28..=31).
///
/// # Errors
/// Returns `DateError::InvalidMonth` or `DateError::InvalidYear`.
pub fn days_in_month(month: u8, year: u16) -> Result<u8, DateError> {
    valid_month(month)?;
    valid_year(year)?;
    Ok(month_length(year, month))
}

/// Number of days in `year` (365 or 366).
///
/// # Errors
/// Returns `DateError::InvalidYear`.
pub fn days_in_year(year: u16) -> Result<u16, DateError> {
    valid_year(year)?;
    Ok(year_length(year))
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub(crate) const fn month_length(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub(crate) const fn year_length(year: u16) -> u16 {
    if is_leap_year(year) {
        DAYS_IN_LEAP_YEAR
    } else {
        DAYS_IN_COMMON_YEAR
    }
}

/// Days in all months of `year` before `month`.
pub(crate) const fn days_in_prior_months(year: u16, month: u8) -> u16 {
    let mut total = 0;
    let mut m = JANUARY;
    while m < month {
        total += month_length(year, m) as u16;
        m += 1;
    }
    total
}

/// Splits a day of the year into (month, day), walking at most twelve months.
pub(crate) const fn split_day_of_year(year: u16, day_of_year: u16) -> (u8, u8) {
    debug_assert!(day_of_year >= 1 && day_of_year <= year_length(year));

    let mut remaining = day_of_year;
    let mut month = JANUARY;
    while month < MAX_MONTH && remaining > month_length(year, month) as u16 {
        remaining -= month_length(year, month) as u16;
        month += 1;
    }
    // remaining <= 31 here
    (month, remaining as u8)
}

use crate::prelude::*;
use crate::types::days_in_month;
use crate::{Date, DateError};
use tracing::debug;

/// A named day of the week, Sunday being day 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Returns the weekday numbered from Sunday as 0 through Saturday as 6.
    ///
    /// # Errors
    /// Returns `DateError::InvalidWeekday` for values above 6.
    pub const fn from_zero(weekday: u8) -> Result<Self, DateError> {
        Ok(match weekday {
            0 => Self::Sunday,
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            6 => Self::Saturday,
            _ => return Err(DateError::InvalidWeekday(weekday)),
        })
    }

    /// Sunday is 0, Saturday is 6.
    pub const fn number(self) -> u8 {
        self as u8
    }
}

impl Date {
    /// Day of the week, counted from absolute date 1 (1-Jan-1601), a Monday.
    pub const fn weekday(self) -> Weekday {
        match self.to_absolute().get() % 7 {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }

    /// The first date strictly after this one that falls on `weekday`.
    ///
    /// # Errors
    /// Returns `DateError::CannotIncrement` if the search runs past 31-Dec-3999.
    pub fn next_weekday_after(self, weekday: Weekday) -> Result<Self, DateError> {
        let mut candidate = self.increment()?;
        while candidate.weekday() != weekday {
            candidate = candidate.increment()?;
        }
        Ok(candidate)
    }
}

/// The last date in `month` of `year` that falls on `weekday`.
///
/// # Errors
/// Returns `DateError::InvalidMonth` or `DateError::InvalidYear`.
pub fn last_weekday_of_month(month: u8, year: u16, weekday: Weekday) -> Result<Date, DateError> {
    let last_day = days_in_month(month, year)
        .inspect_err(|err| debug!(month, year, error = %err, "rejected month for weekday search"))?;

    let mut candidate = Date::new(month, last_day, year)?;
    while candidate.weekday() != weekday {
        candidate = candidate.decrement()?;
    }
    Ok(candidate)
}

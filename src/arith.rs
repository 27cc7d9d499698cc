use crate::absolute::AbsoluteDate;
use crate::consts::{MAX_ABSOLUTE_DATE, MIN_ABSOLUTE_DATE};
use crate::{Date, DateError};
use std::ops::Sub;
use tracing::debug;

impl Date {
    /// The following calendar day.
    ///
    /// # Errors
    /// Returns `DateError::CannotIncrement` on 31-Dec-3999.
    pub fn increment(self) -> Result<Self, DateError> {
        if self == Self::MAX {
            debug!(date = %self, "cannot increment past the last date");
            return Err(DateError::CannotIncrement(self));
        }
        let next = AbsoluteDate::from_validated(self.to_absolute().get() + 1);
        Ok(Self::from_absolute(next))
    }

    /// The preceding calendar day.
    ///
    /// # Errors
    /// Returns `DateError::CannotDecrement` on 1-Jan-1601.
    pub fn decrement(self) -> Result<Self, DateError> {
        if self == Self::MIN {
            debug!(date = %self, "cannot decrement before the first date");
            return Err(DateError::CannotDecrement(self));
        }
        let previous = AbsoluteDate::from_validated(self.to_absolute().get() - 1);
        Ok(Self::from_absolute(previous))
    }

    /// Moves the date by `days`, forwards when positive and backwards when negative.
    ///
    /// # Errors
    /// Returns `DateError::TooEarly` if the result would precede 1-Jan-1601 and
    /// `DateError::TooLate` if it would follow 31-Dec-3999.
    pub fn add_days(self, days: i32) -> Result<Self, DateError> {
        let target = i64::from(self.to_absolute().get()) + i64::from(days);

        if target < i64::from(MIN_ABSOLUTE_DATE) {
            debug!(date = %self, days, "day arithmetic underflowed the calendar");
            return Err(DateError::TooEarly { date: self, days });
        }
        if target > i64::from(MAX_ABSOLUTE_DATE) {
            debug!(date = %self, days, "day arithmetic overflowed the calendar");
            return Err(DateError::TooLate { date: self, days });
        }

        AbsoluteDate::new(target).map(Self::from_absolute)
    }

    /// Signed number of days from `other` to `self`; positive when `self` is later.
    pub fn difference(self, other: Self) -> i32 {
        difference(self, other)
    }
}

/// Days from `date2` to `date1`, negative when `date1` is earlier.
pub fn difference(date1: Date, date2: Date) -> i32 {
    let days = date1.to_absolute().get() - date2.to_absolute().get();
    debug_assert_eq!(
        date2.add_days(days),
        Ok(date1),
        "difference between {date1} and {date2} does not invert add_days"
    );
    days
}

/// The earlier of two dates; `date2` when they are equal.
pub fn min(date1: Date, date2: Date) -> Date {
    if date1.is_before(&date2) { date1 } else { date2 }
}

/// The later of two dates; `date2` when they are equal.
pub fn max(date1: Date, date2: Date) -> Date {
    if date1.is_after(&date2) { date1 } else { date2 }
}

impl Sub for Date {
    type Output = i32;

    fn sub(self, rhs: Self) -> Self::Output {
        difference(self, rhs)
    }
}

//! Calendar months as reporting keys.
//!
//! [`ReportWindow`] is the configuration value naming the span of months a
//! report covers; [`ReportWindow::keys`] enumerates them in order.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::consts::{DECEMBER, JANUARY, MAX_YEAR, MIN_DAY};
use crate::prelude::*;
use crate::types::month_length;
use crate::{Date, DateError, DateRange, Month, RangeError, Year};

/// A month of a particular year, ordered by year then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}/{}", "month.get()", "year.get()")]
pub struct YearMonth {
    year:  Year,
    month: Month,
}

impl YearMonth {
    /// # Errors
    /// Returns `DateError::InvalidYear` or `DateError::InvalidMonth`.
    pub fn new(year: u16, month: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        Ok(Self { year, month })
    }

    pub(crate) const fn from_validated(year: u16, month: u8) -> Self {
        Self {
            year:  Year::from_validated(year),
            month: Month::from_validated(month),
        }
    }

    /// The month containing `date`.
    pub const fn from_date(date: Date) -> Self {
        Self {
            year:  date.year_typed(),
            month: date.month_typed(),
        }
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Three-letter month name, as shown in report headings.
    pub const fn month_abbreviation(&self) -> &'static str {
        self.month.abbreviation()
    }

    /// The following month, or `None` after December of `MAX_YEAR`.
    pub const fn next_month(&self) -> Option<Self> {
        let (year, month) = (self.year(), self.month());
        if month == DECEMBER {
            if year >= MAX_YEAR {
                None
            } else {
                Some(Self::from_validated(year + 1, JANUARY))
            }
        } else {
            Some(Self::from_validated(year, month + 1))
        }
    }

    pub const fn first_day(&self) -> Date {
        Date::from_parts_unchecked(self.year(), self.month(), MIN_DAY)
    }

    pub const fn last_day(&self) -> Date {
        Date::from_parts_unchecked(self.year(), self.month(), month_length(self.year(), self.month()))
    }

    /// Every day of this month as a range.
    pub const fn days(&self) -> DateRange {
        DateRange::from_ordered(self.first_day(), self.last_day())
    }
}

impl From<Date> for YearMonth {
    fn from(date: Date) -> Self {
        Self::from_date(date)
    }
}

/// Inclusive span of months covered by a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct ReportWindow {
    start: YearMonth,
    end:   YearMonth,
}

#[derive(Deserialize)]
struct WindowBounds {
    start: YearMonth,
    end:   YearMonth,
}

impl TryFrom<WindowBounds> for ReportWindow {
    type Error = RangeError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl Default for ReportWindow {
    /// September 2022 through December 2025.
    fn default() -> Self {
        Self {
            start: YearMonth::from_validated(2022, 9),
            end:   YearMonth::from_validated(2025, DECEMBER),
        }
    }
}

impl ReportWindow {
    /// # Errors
    /// Returns `RangeError::InvalidWindow` if `start` is after `end`.
    pub fn new(start: YearMonth, end: YearMonth) -> Result<Self, RangeError> {
        if start > end {
            debug!(%start, %end, "rejected inverted report window");
            return Err(RangeError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> YearMonth {
        self.start
    }

    pub const fn end(&self) -> YearMonth {
        self.end
    }

    pub fn contains(&self, year_month: YearMonth) -> bool {
        self.start <= year_month && year_month <= self.end
    }

    /// Whether `date` falls in one of the window's months.
    pub fn contains_date(&self, date: Date) -> bool {
        self.contains(YearMonth::from_date(date))
    }

    /// Iterates the window's months in order.
    pub fn months(&self) -> impl Iterator<Item = YearMonth> + '_ {
        std::iter::successors(Some(self.start), move |current| {
            current.next_month().filter(|next| *next <= self.end)
        })
    }

    /// Every month of the window, in order.
    pub fn keys(&self) -> Vec<YearMonth> {
        let keys: Vec<YearMonth> = self.months().collect();
        trace!(start = %self.start, end = %self.end, count = keys.len(), "enumerated report window");
        keys
    }

    /// The dates from the first day of `start` to the last day of `end`.
    pub const fn date_range(&self) -> DateRange {
        DateRange::from_ordered(self.start.first_day(), self.end.last_day())
    }
}

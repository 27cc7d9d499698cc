use std::{cmp::Ordering, iter::FusedIterator, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Date, DateError, ParseError, RANGE_SEPARATOR, YearMonth, arith::difference, prelude::*};

/// Represents a range between two dates (inclusive).
/// The first date must not be after the last date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "({first},{last})")]
pub struct DateRange {
    first: Date,
    last:  Date,
}

/// Error type for date range and reporting window operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// First date is after last date.
    #[error("Invalid date range: first date ({first}) must not be after last date ({last})")]
    InvalidRange { first: Date, last: Date },

    /// Window start is after window end.
    #[error("Invalid report window: start ({start}) must not be after end ({end})")]
    InvalidWindow { start: YearMonth, end: YearMonth },

    /// Error parsing one of the endpoint dates.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Error validating a date component.
    #[error(transparent)]
    DateError(#[from] DateError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if first is after last.
    pub fn new(first: Date, last: Date) -> Result<Self, RangeError> {
        if first.is_after(&last) {
            debug!(%first, %last, "rejected inverted date range");
            return Err(RangeError::InvalidRange { first, last });
        }
        Ok(Self { first, last })
    }

    /// Callers guarantee `first` is not after `last`.
    pub(crate) const fn from_ordered(first: Date, last: Date) -> Self {
        debug_assert!(!first.is_after(&last));
        Self { first, last }
    }

    /// Returns the first date in the range
    pub const fn first(&self) -> Date {
        self.first
    }

    /// Returns the last date in the range
    pub const fn last(&self) -> Date {
        self.last
    }

    /// Returns both dates as a tuple
    pub const fn dates(&self) -> (Date, Date) {
        (self.first, self.last)
    }

    /// Number of days from the first date to the last; 0 for a single-day range.
    pub fn size(&self) -> i32 {
        difference(self.last, self.first)
    }

    /// Checks if the range contains a given date
    pub const fn contains(&self, date: &Date) -> bool {
        !(date.is_before(&self.first) || date.is_after(&self.last))
    }

    /// Checks if this range overlaps with another range
    pub const fn overlaps(&self, other: &Self) -> bool {
        !(self.last.is_before(&other.first) || self.first.is_after(&other.last))
    }

    /// Checks if this range is completely contained within another range
    pub const fn is_within(&self, other: &Self) -> bool {
        other.contains(&self.first) && other.contains(&self.last)
    }

    /// Iterates over every date in the range, first to last.
    pub const fn days(&self) -> Days {
        Days {
            next: Some(self.first),
            last: self.last,
        }
    }
}

/// Iterator over the dates of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<Date>,
    last: Date,
}

impl Iterator for Days {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current == self.last {
            None
        } else {
            current.increment().ok()
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .and_then(|next| usize::try_from(difference(self.last, next) + 1).ok())
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Days {}

impl FusedIterator for Days {}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| RangeError::InvalidFormat(format!("expected (first{RANGE_SEPARATOR}last): {s}")))?;

        let separator_count = inner.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (first, last) = inner.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let first = first.trim().parse::<Date>()?;
                let last = last.trim().parse::<Date>()?;

                Self::new(first, last)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare first dates, then last dates
        match self.first.cmp(&other.first) {
            Ordering::Equal => self.last.cmp(&other.last),
            ord => ord,
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

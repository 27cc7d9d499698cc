mod absolute;
mod arith;
mod consts;
mod prelude;
mod range;
mod types;
mod week;
mod year_month;

#[cfg(test)]
mod test_utils;

pub use absolute::AbsoluteDate;
pub use arith::{difference, max, min};
pub use consts::*;
pub use range::{DateRange, Days, RangeError};
pub use types::{
    Day, Month, Year, days_in_month, days_in_year, is_leap_year, valid_day, valid_day_of_year,
    valid_month, valid_year,
};
pub use week::{Weekday, last_weekday_of_month};
pub use year_month::{ReportWindow, YearMonth};

use crate::prelude::*;
use std::cmp::Ordering;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

/// Absolute date of 1-Jan-1970
const UNIX_EPOCH_ABSOLUTE: i64 = 134_775;
const SECONDS_PER_DAY: u64 = 86_400;

/// A validated date in the proleptic Gregorian calendar, between
/// 1-Jan-1601 and 31-Dec-3999.
///
/// Values are immutable; every operation returns a new date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{:02}-{}-{:04}", "day.get()", "month.abbreviation()", "year.get()")]
pub struct Date {
    year:  Year,
    month: Month,
    day:   Day,
}

/// Broad class of a [`DateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input outside the legal calendar domain.
    Validation,
    /// Arithmetic result outside 1-Jan-1601..=31-Dec-3999.
    Range,
    /// Stepping past the first or last representable date.
    Boundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(i64),

    #[error("Invalid year: {0} (must be {min}-{max})", min = MIN_YEAR, max = MAX_YEAR)]
    InvalidYear(i64),

    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: i64, day: i64, year: i64 },

    #[error("Invalid day of year {day_of_year} for year {year}")]
    InvalidDayOfYear { day_of_year: u16, year: u16 },

    #[error("Invalid absolute date: {0} (must be {min}-{max})", min = MIN_ABSOLUTE_DATE, max = MAX_ABSOLUTE_DATE)]
    InvalidAbsoluteDate(i64),

    #[error("Invalid day of week: {0} (must be 0-6)")]
    InvalidWeekday(u8),

    #[error("value {days} is too negative to subtract from date {date}")]
    TooEarly { date: Date, days: i32 },

    #[error("value {days} is too large to add to date {date}")]
    TooLate { date: Date, days: i32 },

    #[error("cannot increment maximum date {0}")]
    CannotIncrement(Date),

    #[error("cannot decrement minimum date {0}")]
    CannotDecrement(Date),
}

impl DateError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMonth(_)
            | Self::InvalidYear(_)
            | Self::InvalidDay { .. }
            | Self::InvalidDayOfYear { .. }
            | Self::InvalidAbsoluteDate(_)
            | Self::InvalidWeekday(_) => ErrorKind::Validation,
            Self::TooEarly { .. } | Self::TooLate { .. } => ErrorKind::Range,
            Self::CannotIncrement(_) | Self::CannotDecrement(_) => ErrorKind::Boundary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "{_0}")]
    Date(DateError),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Date(err) => Some(err),
            Self::InvalidFormat(_) | Self::EmptyInput => None,
        }
    }
}

impl From<DateError> for ParseError {
    fn from(err: DateError) -> Self {
        Self::Date(err)
    }
}

/// Result of a three-way date comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Before,
    Equal,
    After,
}

impl Order {
    /// The same comparison seen from the other operand.
    pub const fn reverse(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::Equal => Self::Equal,
            Self::After => Self::Before,
        }
    }
}

impl From<Ordering> for Order {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Before,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::After,
        }
    }
}

impl From<Order> for Ordering {
    fn from(order: Order) -> Self {
        match order {
            Order::Before => Self::Less,
            Order::Equal => Self::Equal,
            Order::After => Self::Greater,
        }
    }
}

impl Date {
    /// 1-Jan-1601, absolute date 1.
    pub const MIN: Self = Self::from_parts_unchecked(MIN_YEAR, JANUARY, MIN_DAY);
    /// 31-Dec-3999, absolute date 876216.
    pub const MAX: Self = Self::from_parts_unchecked(MAX_YEAR, DECEMBER, 31);

    /// Creates a date from month, day and year, validating all three.
    ///
    /// # Errors
    /// Returns `DateError::InvalidMonth`, `DateError::InvalidYear` or
    /// `DateError::InvalidDay`, checked in that order.
    pub fn new(month: u8, day: u8, year: u16) -> Result<Self, DateError> {
        valid_day(month, day, year)
            .inspect_err(|err| debug!(month, day, year, error = %err, "rejected calendar date"))?;
        Ok(Self::from_parts_unchecked(year, month, day))
    }

    /// Creates a date from already validated components.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDay` if the day does not exist in that month.
    pub fn from_components(year: Year, month: Month, day: Day) -> Result<Self, DateError> {
        Self::new(month.get(), day.get(), year.get())
    }

    /// Components must already satisfy `valid_day`.
    pub(crate) const fn from_parts_unchecked(year: u16, month: u8, day: u8) -> Self {
        Self {
            year:  Year::from_validated(year),
            month: Month::from_validated(month),
            day:   Day::from_validated(day),
        }
    }

    /// The current UTC date according to the system clock.
    ///
    /// # Errors
    /// Returns `DateError::InvalidAbsoluteDate` if the clock is outside the
    /// supported calendar.
    pub fn today() -> Result<Self, DateError> {
        let days = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_secs() / SECONDS_PER_DAY).unwrap_or(i64::MAX),
            Err(err) => {
                let before = err.duration().as_secs().div_ceil(SECONDS_PER_DAY);
                -i64::try_from(before).unwrap_or(i64::MAX)
            },
        };
        trace!(days_since_unix_epoch = days, "read system clock");
        Self::try_from_absolute(UNIX_EPOCH_ABSOLUTE.saturating_add(days))
    }

    /// Returns the year (1601..=3999)
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month (1..=12)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day of the month (1..=31)
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the year as a validated [`Year`]
    pub const fn year_typed(&self) -> Year {
        self.year
    }

    /// Returns the month as a validated [`Month`]
    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Returns the day as a validated [`Day`]
    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Lexicographic comparison on (year, month, day).
    pub const fn compare(&self, other: &Self) -> Order {
        let (a, b) = (self.components(), other.components());
        if a.0 != b.0 {
            return if a.0 < b.0 { Order::Before } else { Order::After };
        }
        if a.1 != b.1 {
            return if a.1 < b.1 { Order::Before } else { Order::After };
        }
        if a.2 != b.2 {
            return if a.2 < b.2 { Order::Before } else { Order::After };
        }
        Order::Equal
    }

    pub const fn is_before(&self, other: &Self) -> bool {
        matches!(self.compare(other), Order::Before)
    }

    pub const fn is_after(&self, other: &Self) -> bool {
        matches!(self.compare(other), Order::After)
    }

    const fn components(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other).into()
    }
}

impl FromStr for Date {
    type Err = ParseError;

    /// Accepts month-first `MM/DD/YYYY` or display form `DD-Mon-YYYY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // The shape decides the form; a minus sign inside a month-first
        // field is left for the number parser to report.
        if trimmed.contains(MONTH_FIRST_SEPARATOR) {
            let parts: Vec<&str> = trimmed.split(MONTH_FIRST_SEPARATOR).map(str::trim).collect();
            Self::parse_month_first(&parts)
        } else if trimmed.contains(DATE_SEPARATOR) {
            let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
            Self::parse_display_form(&parts)
        } else {
            Err(ParseError::InvalidFormat(trimmed.to_owned()))
        }
    }
}

impl Date {
    /// Only text that is not an integer is a format error; range checks
    /// happen on the full value so they report the number as written.
    fn parse_number(s: &str) -> Result<i64, ParseError> {
        s.parse::<i64>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn checked_month(value: i64) -> Result<u8, DateError> {
        let month = u8::try_from(value).map_err(|_| DateError::InvalidMonth(value))?;
        valid_month(month)?;
        Ok(month)
    }

    fn checked_year(value: i64) -> Result<u16, DateError> {
        let year = u16::try_from(value).map_err(|_| DateError::InvalidYear(value))?;
        valid_year(year)?;
        Ok(year)
    }

    fn checked_day(month: u8, value: i64, year: u16) -> Result<u8, DateError> {
        u8::try_from(value).map_err(|_| DateError::InvalidDay {
            month: i64::from(month),
            day: value,
            year: i64::from(year),
        })
    }

    /// Month, then year, then day, each checked before the next is read.
    fn parse_month_first(parts: &[&str]) -> Result<Self, ParseError> {
        let [month, day, year] = parts else {
            return Err(ParseError::InvalidFormat(format!(
                "expected MM{sep}DD{sep}YYYY, got {}",
                parts.join("/"),
                sep = MONTH_FIRST_SEPARATOR
            )));
        };
        let month = Self::checked_month(Self::parse_number(month)?)
            .inspect_err(|err| debug!(error = %err, "rejected parsed month"))?;
        let year = Self::checked_year(Self::parse_number(year)?)
            .inspect_err(|err| debug!(error = %err, "rejected parsed year"))?;
        let day = Self::checked_day(month, Self::parse_number(day)?, year)
            .inspect_err(|err| debug!(error = %err, "rejected parsed day"))?;
        Ok(Self::new(month, day, year)?)
    }

    fn parse_display_form(parts: &[&str]) -> Result<Self, ParseError> {
        let [day, month, year] = parts else {
            return Err(ParseError::InvalidFormat(format!(
                "expected DD{sep}Mon{sep}YYYY, got {}",
                parts.join("-"),
                sep = DATE_SEPARATOR
            )));
        };
        let month = Month::from_abbreviation(month)
            .ok_or_else(|| ParseError::InvalidFormat((*month).to_owned()))?
            .get();
        let year = Self::checked_year(Self::parse_number(year)?)
            .inspect_err(|err| debug!(error = %err, "rejected parsed year"))?;
        let day = Self::checked_day(month, Self::parse_number(day)?, year)
            .inspect_err(|err| debug!(error = %err, "rejected parsed day"))?;
        Ok(Self::new(month, day, year)?)
    }
}

impl serde::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_new_valid() {
        let d = Date::new(12, 19, 2023).unwrap();
        assert_eq!(d.month(), 12);
        assert_eq!(d.day(), 19);
        assert_eq!(d.year(), 2023);
        assert_eq!(d.year_typed(), Year::new(2023).unwrap());
        assert_eq!(d.month_typed(), Month::new(12).unwrap());
        assert_eq!(d.day_typed(), Day::new(12, 19, 2023).unwrap());
    }

    #[test]
    fn test_new_invalid_cases() {
        struct TestCase {
            month:    u8,
            day:      u8,
            year:     u16,
            expected: DateError,
        }

        let cases = [
            TestCase {
                month:    0,
                day:      1,
                year:     2023,
                expected: DateError::InvalidMonth(0),
            },
            TestCase {
                month:    13,
                day:      1,
                year:     2023,
                expected: DateError::InvalidMonth(13),
            },
            TestCase {
                month:    1,
                day:      1,
                year:     1600,
                expected: DateError::InvalidYear(1600),
            },
            TestCase {
                month:    1,
                day:      1,
                year:     4000,
                expected: DateError::InvalidYear(4000),
            },
            TestCase {
                month:    2,
                day:      29,
                year:     2023,
                expected: DateError::InvalidDay {
                    month: 2,
                    day:   29,
                    year:  2023,
                },
            },
            TestCase {
                month:    4,
                day:      0,
                year:     2023,
                expected: DateError::InvalidDay {
                    month: 4,
                    day:   0,
                    year:  2023,
                },
            },
        ];

        for case in &cases {
            assert_eq!(
                Date::new(case.month, case.day, case.year),
                Err(case.expected),
                "{}/{}/{}",
                case.month,
                case.day,
                case.year
            );
            assert_eq!(case.expected.kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn test_min_max_constants() {
        assert_eq!(Date::MIN, date(1, 1, 1601));
        assert_eq!(Date::MAX, date(12, 31, 3999));
    }

    #[test]
    fn test_from_components() {
        let year = Year::new(2024).unwrap();
        let month = Month::new(2).unwrap();
        let day = Day::new(2, 29, 2024).unwrap();
        assert_eq!(Date::from_components(year, month, day), Ok(date(2, 29, 2024)));

        let common_year = Year::new(2023).unwrap();
        assert!(Date::from_components(common_year, month, day).is_err());
    }

    #[test]
    fn test_today_is_in_range() {
        let today = Date::today().unwrap();
        assert!(today.is_after(&date(1, 1, 2000)));
        assert!(today.is_before(&Date::MAX));
    }

    #[test]
    fn test_compare_cases() {
        struct TestCase {
            first:       Date,
            second:      Date,
            expected:    Order,
            description: &'static str,
        }

        let cases = [
            TestCase {
                first:       date(6, 1, 2023),
                second:      date(6, 1, 2023),
                expected:    Order::Equal,
                description: "same date",
            },
            TestCase {
                first:       date(12, 31, 2022),
                second:      date(1, 1, 2023),
                expected:    Order::Before,
                description: "earlier year wins over later month",
            },
            TestCase {
                first:       date(3, 1, 2023),
                second:      date(2, 28, 2023),
                expected:    Order::After,
                description: "later month in same year",
            },
            TestCase {
                first:       date(3, 14, 2023),
                second:      date(3, 15, 2023),
                expected:    Order::Before,
                description: "earlier day in same month",
            },
        ];

        for case in &cases {
            assert_eq!(
                case.first.compare(&case.second),
                case.expected,
                "{}",
                case.description
            );
            assert_eq!(
                case.second.compare(&case.first),
                case.expected.reverse(),
                "{} (reversed)",
                case.description
            );
        }
    }

    #[test]
    fn test_before_and_after() {
        let earlier = date(12, 19, 2023);
        let later = date(12, 24, 2023);
        assert!(earlier.is_before(&later));
        assert!(!earlier.is_after(&later));
        assert!(later.is_after(&earlier));
        assert!(!later.is_before(&later));
        assert!(!later.is_after(&later));
    }

    #[test]
    fn test_ordering_is_total_and_matches_absolute_order() {
        let dates = [
            Date::MIN,
            date(2, 28, 1700),
            date(3, 1, 1700),
            date(12, 31, 1999),
            date(1, 1, 2000),
            date(2, 29, 2000),
            date(12, 19, 2023),
            date(12, 24, 2023),
            Date::MAX,
        ];

        for a in &dates {
            for b in &dates {
                let order = a.compare(b);
                let outcomes = [a.is_before(b), a == b, a.is_after(b)];
                assert_eq!(outcomes.iter().filter(|hit| **hit).count(), 1, "{a} vs {b}");
                assert_eq!(b.compare(a), order.reverse(), "{a} vs {b}");
                assert_eq!(Order::from(a.to_absolute().cmp(&b.to_absolute())), order, "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_ord_matches_compare() {
        let mut dates = vec![date(12, 24, 2023), date(1, 1, 1601), date(12, 19, 2023)];
        dates.sort();
        assert_eq!(dates, vec![date(1, 1, 1601), date(12, 19, 2023), date(12, 24, 2023)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(date(12, 19, 2023).to_string(), "19-Dec-2023");
        assert_eq!(date(1, 1, 1601).to_string(), "01-Jan-1601");
        assert_eq!(date(9, 5, 2022).to_string(), "05-Sep-2022");
    }

    #[test]
    fn test_parse_month_first() {
        assert_eq!("12/19/2023".parse::<Date>(), Ok(date(12, 19, 2023)));
        assert_eq!(" 02/29/2024 ".parse::<Date>(), Ok(date(2, 29, 2024)));
        assert_eq!("1/2/1601".parse::<Date>(), Ok(date(1, 2, 1601)));
    }

    #[test]
    fn test_parse_display_form() {
        assert_eq!("19-Dec-2023".parse::<Date>(), Ok(date(12, 19, 2023)));
        assert_eq!("01-jan-1601".parse::<Date>(), Ok(Date::MIN));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Date>(), Err(ParseError::EmptyInput));
        assert_eq!("   ".parse::<Date>(), Err(ParseError::EmptyInput));
        assert!(matches!("2023".parse::<Date>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("12/2023".parse::<Date>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("12/19/2023/1".parse::<Date>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("aa/19/2023".parse::<Date>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("19-Dez-2023".parse::<Date>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("19-Dec/2023".parse::<Date>(), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_validation_errors() {
        struct TestCase {
            input:    &'static str,
            expected: DateError,
        }

        let cases = [
            TestCase {
                input:    "13/01/2023",
                expected: DateError::InvalidMonth(13),
            },
            TestCase {
                input:    "02/29/2023",
                expected: DateError::InvalidDay {
                    month: 2,
                    day:   29,
                    year:  2023,
                },
            },
            TestCase {
                input:    "01/01/1600",
                expected: DateError::InvalidYear(1600),
            },
            TestCase {
                input:    "13/300/2023",
                expected: DateError::InvalidMonth(13),
            },
            TestCase {
                input:    "300/01/2023",
                expected: DateError::InvalidMonth(300),
            },
            TestCase {
                input:    "01/01/70000",
                expected: DateError::InvalidYear(70_000),
            },
            TestCase {
                input:    "-1/01/2023",
                expected: DateError::InvalidMonth(-1),
            },
            TestCase {
                input:    "02/300/1600",
                expected: DateError::InvalidYear(1600),
            },
            TestCase {
                input:    "01/300/2023",
                expected: DateError::InvalidDay {
                    month: 1,
                    day:   300,
                    year:  2023,
                },
            },
            TestCase {
                input:    "01/-5/2023",
                expected: DateError::InvalidDay {
                    month: 1,
                    day:   -5,
                    year:  2023,
                },
            },
            TestCase {
                input:    "300-Jan-2023",
                expected: DateError::InvalidDay {
                    month: 1,
                    day:   300,
                    year:  2023,
                },
            },
            TestCase {
                input:    "01-Jan-70000",
                expected: DateError::InvalidYear(70_000),
            },
        ];

        for case in &cases {
            assert_eq!(
                case.input.parse::<Date>(),
                Err(ParseError::Date(case.expected)),
                "{}",
                case.input
            );
            assert_eq!(case.expected.kind(), ErrorKind::Validation, "{}", case.input);
        }
    }

    #[test]
    fn test_out_of_range_month_message() {
        let err = "300/01/2023".parse::<Date>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid month: 300 (must be 1-12)");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DateError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
        assert_eq!(
            DateError::InvalidYear(1600).to_string(),
            "Invalid year: 1600 (must be 1601-3999)"
        );
        assert_eq!(
            DateError::InvalidDay {
                month: 2,
                day:   30,
                year:  2024
            }
            .to_string(),
            "Invalid day 30 for month 2024-02"
        );
        assert_eq!(
            DateError::TooLate {
                date: Date::MAX,
                days: 1
            }
            .to_string(),
            "value 1 is too large to add to date 31-Dec-3999"
        );
        assert_eq!(
            DateError::CannotDecrement(Date::MIN).to_string(),
            "cannot decrement minimum date 01-Jan-1601"
        );
        assert_eq!(
            ParseError::InvalidFormat("x".into()).to_string(),
            "Invalid date format: x"
        );
        assert_eq!(
            ParseError::Date(DateError::InvalidMonth(0)).to_string(),
            "Invalid month: 0 (must be 1-12)"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(DateError::InvalidAbsoluteDate(0).kind(), ErrorKind::Validation);
        assert_eq!(DateError::InvalidWeekday(7).kind(), ErrorKind::Validation);
        assert_eq!(
            DateError::TooEarly {
                date: Date::MIN,
                days: -1
            }
            .kind(),
            ErrorKind::Range
        );
        assert_eq!(DateError::CannotIncrement(Date::MAX).kind(), ErrorKind::Boundary);
    }

    #[test]
    fn test_errors_are_std_errors() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<DateError>();
        assert_impl::<ParseError>();
    }

    #[test]
    fn test_serde_string_format() {
        let d = date(12, 19, 2023);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""19-Dec-2023""#);
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);

        let parsed: Date = serde_json::from_str(r#""12/19/2023""#).unwrap();
        assert_eq!(d, parsed);

        let rejected: Result<Date, _> = serde_json::from_str(r#""02/30/2023""#);
        assert!(rejected.is_err());
    }
}

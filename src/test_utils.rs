//! Constructors for test fixtures.

use crate::{Date, DateRange, YearMonth};

pub fn date(month: u8, day: u8, year: u16) -> Date {
    Date::new(month, day, year).expect("valid fixture date")
}

pub fn range(first: (u8, u8, u16), last: (u8, u8, u16)) -> DateRange {
    DateRange::new(date(first.0, first.1, first.2), date(last.0, last.1, last.2))
        .expect("valid fixture range")
}

pub fn year_month(year: u16, month: u8) -> YearMonth {
    YearMonth::new(year, month).expect("valid fixture year-month")
}

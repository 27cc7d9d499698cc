/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1601;

/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 3999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days in a common year
pub const DAYS_IN_COMMON_YEAR: u16 = 365;
/// Days in a leap year
pub const DAYS_IN_LEAP_YEAR: u16 = 366;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// English month abbreviations (index 0 is unused, months are 1-indexed)
pub const MONTH_ABBREVIATIONS: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Absolute date of 1-Jan-1601
pub const MIN_ABSOLUTE_DATE: i32 = 1;
/// Absolute date of 31-Dec-3999
pub const MAX_ABSOLUTE_DATE: i32 = 876_216;

pub(crate) const DAYS_IN_400_YEAR_CYCLE: i32 = 400 * 365 + 100 - 3;
pub(crate) const DAYS_IN_100_YEAR_CYCLE: i32 = 100 * 365 + 25 - 1;
pub(crate) const DAYS_IN_4_YEAR_CYCLE: i32 = 4 * 365 + 1;
pub(crate) const DAYS_IN_1_YEAR_CYCLE: i32 = 365;

/// Separator for month-first dates (`MM/DD/YYYY`)
pub const MONTH_FIRST_SEPARATOR: char = '/';
/// Separator for display dates (`DD-Mon-YYYY`)
pub const DATE_SEPARATOR: char = '-';
/// Separator between the two dates of a range (`(first,last)`)
pub const RANGE_SEPARATOR: char = ',';

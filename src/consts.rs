/// Latest year number any calendar accepts (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Number of days in a week, shared by every supported calendar
pub const DAYS_IN_WEEK: u8 = 7;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each Gregorian/Julian month (index 0 is unused, months are 1-indexed)
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

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Day count of 1 January 1 CE, proleptic Gregorian
pub const GREGORIAN_EPOCH: i64 = 1_721_426;
/// Day count of 1 January 1 CE, Julian
pub const JULIAN_EPOCH: i64 = 1_721_424;
/// Day count of 1 Thout 1 AM (29 August 284 CE, Julian)
pub const COPTIC_EPOCH: i64 = 1_825_030;
/// Day count of 1 Meskerem 1 (29 August 8 CE, Julian)
pub const ETHIOPIAN_EPOCH: i64 = 1_724_221;
/// Day count of 1 Tishrei 1 AM (7 October 3761 BCE, Julian)
pub const HEBREW_EPOCH: i64 = 347_998;
/// Day count of 1 Muharram 1 AH (16 July 622 CE, Julian)
pub const HIJRI_EPOCH: i64 = 1_948_440;
/// Day count of 1 Chaitra 1 Saka (22 March 79 CE, Gregorian)
pub const INDIAN_NATIONAL_EPOCH: i64 = 1_749_995;
/// Day count of 1 Farvardin 1 AP (19 March 622 CE, Julian)
pub const JALALI_EPOCH: i64 = 1_948_321;

/// Day count of 1 January 2000 (Gregorian), the reference for short year windows
pub(crate) const REFERENCE_DAY_2000: i64 = 2_451_545;

/// Years before the reference year covered by the default two-digit year window
pub(crate) const SHORT_YEAR_WINDOW_SPAN: i32 = 50;

/// Date component separator (ISO 8601 style `YYYY-MM-DD`)
pub const DATE_SEPARATOR: char = '-';

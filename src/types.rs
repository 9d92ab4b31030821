use crate::CalendarError;
use crate::consts::{DATE_SEPARATOR, DAYS_IN_WEEK};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A Julian Day Number: days elapsed since 1 January 4713 BC (proleptic Julian).
///
/// The same value names the same absolute day whichever calendar interprets it,
/// which makes it the interchange point between calendar systems.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DayCount(i64);

impl DayCount {
    /// Creates a day count from a raw Julian Day Number
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw Julian Day Number
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns the weekday of this day. Day 0 is a Monday.
    pub const fn day_of_week(self) -> Weekday {
        Weekday::from_offset(self.0.rem_euclid(DAYS_IN_WEEK as i64))
    }

    /// Adds `days`, returning `None` on overflow
    pub const fn checked_add(self, days: i64) -> Option<Self> {
        match self.0.checked_add(days) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Signed number of days from `self` to `other`
    pub const fn days_until(self, other: Self) -> i64 {
        other.0 - self.0
    }
}

impl Add<i64> for DayCount {
    type Output = Self;

    fn add(self, rhs: i64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub<i64> for DayCount {
    type Output = Self;

    fn sub(self, rhs: i64) -> Self::Output {
        Self(self.0 - rhs)
    }
}

impl Sub<Self> for DayCount {
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

/// Day of the week, numbered 1 (Monday) through 7 (Sunday) as in ISO 8601
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    /// Returns the ISO 8601 weekday number (1..=7)
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Looks up a weekday from its ISO 8601 number
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=7 => Some(Self::from_offset(number as i64 - 1)),
            _ => None,
        }
    }

    // 0 = Monday; callers keep offset in 0..7
    const fn from_offset(offset: i64) -> Self {
        match offset {
            0 => Self::Monday,
            1 => Self::Tuesday,
            2 => Self::Wednesday,
            3 => Self::Thursday,
            4 => Self::Friday,
            5 => Self::Saturday,
            _ => Self::Sunday,
        }
    }
}

/// A (year, month, day) triple interpreted by one calendar system.
///
/// A `CivilDate` carries no calendar of its own: whether it is valid, and which
/// day it denotes, depends on the [`CalendarRules`](crate::CalendarRules) that
/// reads it. Ordering is lexicographic on (year, month, day), which matches
/// chronological order within any single calendar.
///
/// Serialized as `[-]YYYY-MM-DD`, with a leading `-` for years before year 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate {
    year:  i32,
    month: u8,
    day:   u8,
}

impl CivilDate {
    /// Creates a date without validating it against any calendar
    #[inline]
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    #[inline]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Returns the (year, month, day) tuple
    pub const fn to_tuple(self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }
}

impl From<(i32, u8, u8)> for CivilDate {
    fn from((year, month, day): (i32, u8, u8)) -> Self {
        Self::new(year, month, day)
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            f.write_str("-")?;
        }
        write!(
            f,
            "{:04}{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{:02}",
            self.year.unsigned_abs(),
            self.month,
            self.day
        )
    }
}

impl FromStr for CivilDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CalendarError::InvalidFormat("empty date string".to_owned()));
        }

        let (negative, body) = match trimmed.strip_prefix(DATE_SEPARATOR) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let parts: Vec<&str> = body.split(DATE_SEPARATOR).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(CalendarError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {s}"
            )));
        };

        let year = year
            .parse::<i32>()
            .map_err(|_| CalendarError::InvalidFormat(format!("invalid year in {s}")))?;
        let month = month
            .parse::<u8>()
            .map_err(|_| CalendarError::InvalidFormat(format!("invalid month in {s}")))?;
        let day = day
            .parse::<u8>()
            .map_err(|_| CalendarError::InvalidFormat(format!("invalid day in {s}")))?;
        if month == 0 || day == 0 {
            return Err(CalendarError::InvalidFormat(format!(
                "month and day are 1-based: {s}"
            )));
        }

        Ok(Self::new(if negative { -year } else { year }, month, day))
    }
}

impl Serialize for CivilDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CivilDate {
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

    #[test]
    fn test_day_count_weekday() {
        // JD 0 was a Monday, 1 January 2000 a Saturday
        assert_eq!(DayCount::new(0).day_of_week(), Weekday::Monday);
        assert_eq!(DayCount::new(2_451_545).day_of_week(), Weekday::Saturday);
        assert_eq!(DayCount::new(-1).day_of_week(), Weekday::Sunday);
    }

    #[test]
    fn test_day_count_arithmetic() {
        let day = DayCount::new(2_451_545);
        assert_eq!((day + 10).get(), 2_451_555);
        assert_eq!((day - 45).get(), 2_451_500);
        assert_eq!(DayCount::new(2_451_600) - day, 55);
        assert_eq!(day.days_until(DayCount::new(2_451_540)), -5);
        assert_eq!(DayCount::new(i64::MAX).checked_add(1), None);
    }

    #[test]
    fn test_day_count_conversions() {
        let day: DayCount = 1_721_426.into();
        let raw: i64 = day.into();
        assert_eq!(raw, 1_721_426);
        assert_eq!(day.to_string(), "1721426");
    }

    #[test]
    fn test_day_count_serde() {
        let json = serde_json::to_string(&DayCount::new(347_998)).unwrap();
        assert_eq!(json, "347998");
        let parsed: DayCount = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DayCount::new(347_998));
    }

    #[test]
    fn test_weekday_numbers() {
        for n in 1..=7 {
            assert_eq!(Weekday::from_number(n).map(Weekday::number), Some(n));
        }
        assert_eq!(Weekday::from_number(0), None);
        assert_eq!(Weekday::from_number(8), None);
        assert_eq!(Weekday::Thursday.to_string(), "Thursday");
    }

    #[test]
    fn test_civil_date_ordering() {
        let a = CivilDate::new(-1, 12, 31);
        let b = CivilDate::new(1, 1, 1);
        let c = CivilDate::new(1, 2, 1);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_civil_date_display() {
        assert_eq!(CivilDate::new(1991, 8, 15).to_string(), "1991-08-15");
        assert_eq!(CivilDate::new(44, 3, 15).to_string(), "0044-03-15");
        assert_eq!(CivilDate::new(-44, 3, 15).to_string(), "-0044-03-15");
        assert_eq!(CivilDate::new(5784, 13, 1).to_string(), "5784-13-01");
    }

    #[test]
    fn test_civil_date_parse() {
        assert_eq!("1991-08-15".parse::<CivilDate>().unwrap(), CivilDate::new(1991, 8, 15));
        assert_eq!("-0001-12-31".parse::<CivilDate>().unwrap(), CivilDate::new(-1, 12, 31));
        assert_eq!(" 1403-12-30 ".parse::<CivilDate>().unwrap(), CivilDate::new(1403, 12, 30));
    }

    #[test]
    fn test_civil_date_parse_errors() {
        assert!(matches!("".parse::<CivilDate>(), Err(CalendarError::InvalidFormat(_))));
        assert!(matches!("1991-08".parse::<CivilDate>(), Err(CalendarError::InvalidFormat(_))));
        assert!(matches!("1991-08-XX".parse::<CivilDate>(), Err(CalendarError::InvalidFormat(_))));
        assert!(matches!("1991-00-10".parse::<CivilDate>(), Err(CalendarError::InvalidFormat(_))));
        assert!(matches!(
            "1991-08-15-01".parse::<CivilDate>(),
            Err(CalendarError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_civil_date_serde_string_format() {
        let date = CivilDate::new(-4713, 1, 1);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""-4713-01-01""#);
        let parsed: CivilDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);

        let result: Result<CivilDate, _> = serde_json::from_str(r#""2024-02""#);
        assert!(result.is_err());
    }
}

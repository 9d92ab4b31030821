//! Week numbering: ISO 8601, regional week-start rules, and plain day-of-year weeks.

use crate::consts::DAYS_IN_WEEK;
use crate::engine::CalendarEngine;
use crate::prelude::*;
use crate::rules::{CalendarRules, offset_year};
use crate::{CalendarError, CivilDate, DayCount, Weekday};
use serde::{Deserialize, Serialize};
use tracing::trace;

const WEEK: i64 = DAYS_IN_WEEK as i64;
/// ISO week 1 is the week containing the year's first Thursday
const ISO_FIRST_WEEK_DAY: u8 = 4;

/// How the days before the first full week of a year are numbered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstWeek {
    /// Week 1 is the first full week; earlier days belong to the previous year's last week
    #[default]
    Full,
    /// The partial week containing the first day of the year is week 1
    Partial,
    /// Days before the first full week form week 0 of the same year
    Zero,
}

/// Week numbering scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum WeekNumberScheme {
    /// ISO 8601: weeks start on Monday, week 1 contains the first Thursday
    #[default]
    Iso,
    /// Weeks start on `week_start`; `first_week` decides how a partial first week counts
    Regular { week_start: Weekday, first_week: FirstWeek },
    /// Consecutive 7-day blocks from the first day of the year
    Simple,
}

/// A week and the year it belongs to, which may differ from the date's year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year}-W{week:02}")]
pub struct WeekNumber {
    pub year: i32,
    pub week: u8,
}

impl<R: CalendarRules> CalendarEngine<R> {
    fn year_start(&self, year: i32) -> DayCount {
        self.rules().date_to_day_count(CivilDate::new(year, 1, 1))
    }

    /// First day of ISO week 1, computed from the rules so neighbouring years work
    fn iso_week_one_start(&self, year: i32) -> DayCount {
        let first = self.year_start(year);
        let weekday = i64::from(first.day_of_week().number());
        if weekday <= i64::from(ISO_FIRST_WEEK_DAY) {
            first - (weekday - 1)
        } else {
            first + (WEEK + 1 - weekday)
        }
    }

    fn adjacent_year(&self, year: i32, step: i64) -> i32 {
        offset_year(year, step, self.has_year_zero()).unwrap_or(year)
    }

    /// Week number of `date` under `scheme`.
    ///
    /// Near year ends the week may belong to a neighbouring year: under ISO
    /// rules late December can be week 1 of the next year and early January
    /// the last week of the previous one; under [`FirstWeek::Full`] early
    /// January days before the first full week take the previous year's last
    /// week. The returned week year can therefore lie just outside the
    /// calendar's valid range.
    ///
    /// # Errors
    /// Returns the validation errors of [`Self::date`].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn week_number(&self, date: CivilDate, scheme: WeekNumberScheme) -> Result<WeekNumber, CalendarError> {
        let count = self.date_to_day_count(date)?;
        let year = date.year();

        let (year, week) = match scheme {
            WeekNumberScheme::Iso => {
                let next = self.adjacent_year(year, 1);
                let (year, start) = if count >= self.iso_week_one_start(next) {
                    (next, self.iso_week_one_start(next))
                } else if count < self.iso_week_one_start(year) {
                    let previous = self.adjacent_year(year, -1);
                    (previous, self.iso_week_one_start(previous))
                } else {
                    (year, self.iso_week_one_start(year))
                };
                (year, (count - start).div_euclid(WEEK) + 1)
            }
            WeekNumberScheme::Regular { week_start, first_week } => {
                self.regular_week(year, count, week_start, first_week)
            }
            WeekNumberScheme::Simple => (year, (count - self.year_start(year)).div_euclid(WEEK) + 1),
        };

        Ok(WeekNumber { year, week: week as u8 })
    }

    fn regular_week(&self, year: i32, count: DayCount, week_start: Weekday, first_week: FirstWeek) -> (i32, i64) {
        let first = self.year_start(year);
        // Position of the first day of the year within its week, 0 when it starts a week
        let lead = (i64::from(first.day_of_week().number()) - i64::from(week_start.number())).rem_euclid(WEEK);
        let day = count - first;

        match first_week {
            FirstWeek::Partial => (year, (day + lead).div_euclid(WEEK) + 1),
            FirstWeek::Zero => (year, (day - (WEEK - lead) % WEEK).div_euclid(WEEK) + 1),
            FirstWeek::Full => {
                let first_full = (WEEK - lead) % WEEK;
                if day >= first_full {
                    return (year, (day - first_full).div_euclid(WEEK) + 1);
                }
                let previous = self.adjacent_year(year, -1);
                self.regular_week(previous, first - 1, week_start, first_week)
            }
        }
    }

    /// Number of weeks numbered within `year` under `scheme`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for a year outside the calendar's range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn weeks_in_year(&self, year: i32, scheme: WeekNumberScheme) -> Result<u8, CalendarError> {
        self.check_year(year)?;
        let weeks = match scheme {
            WeekNumberScheme::Iso => {
                let next = self.adjacent_year(year, 1);
                (self.iso_week_one_start(next) - self.iso_week_one_start(year)) / WEEK
            }
            WeekNumberScheme::Regular { week_start, first_week } => {
                let last = self.year_start(self.adjacent_year(year, 1)) - 1;
                self.regular_week(year, last, week_start, first_week).1
            }
            WeekNumberScheme::Simple => (i64::from(self.rules().days_in_year(year)) - 1) / WEEK + 1,
        };
        Ok(weeks as u8)
    }

    /// Whether `(year, week, day)` names a day in ISO week numbering, `day` being 1 (Monday) to 7
    pub fn is_valid_iso_week_date(&self, year: i32, week: u8, day: u8) -> bool {
        self.iso_week_day_count(year, week, day).is_ok_and(|count| self.contains(count))
    }

    fn iso_week_day_count(&self, year: i32, week: u8, day: u8) -> Result<DayCount, CalendarError> {
        let weeks = self.weeks_in_year(year, WeekNumberScheme::Iso)?;
        if week == 0 || week > weeks || Weekday::from_number(day).is_none() {
            trace!(system = %self.system(), year, week, day, "rejected week date");
            return Err(CalendarError::InvalidWeekDate { system: self.system(), year, week, day });
        }
        Ok(self.iso_week_one_start(year) + (i64::from(week) - 1) * WEEK + i64::from(day) - 1)
    }

    /// The date of ISO week date `year`-W`week`-`day`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for a week year outside the
    /// calendar's range, `CalendarError::InvalidWeekDate` for a week or day
    /// that does not exist, and `CalendarError::DayCountOutOfRange` when the
    /// week reaches past the calendar's first or last day.
    pub fn date_from_iso_week(&self, year: i32, week: u8, day: u8) -> Result<CivilDate, CalendarError> {
        let count = self.iso_week_day_count(year, week, day)?;
        self.day_count_to_date(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{EraNaming, Gregorian, Hebrew, Jalali};

    fn gregorian() -> CalendarEngine<Gregorian> {
        CalendarEngine::new(Gregorian::new(EraNaming::Christian)).unwrap()
    }

    fn iso(engine: &CalendarEngine<Gregorian>, year: i32, month: u8, day: u8) -> (i32, u8) {
        let week = engine.week_number(CivilDate::new(year, month, day), WeekNumberScheme::Iso).unwrap();
        (week.year, week.week)
    }

    #[test]
    fn test_iso_week_numbers() {
        let engine = gregorian();
        let cases = [
            ((2004, 12, 31), (2004, 53)),
            ((2005, 1, 1), (2004, 53)),
            ((2005, 1, 2), (2004, 53)),
            ((2008, 12, 29), (2009, 1)),
            ((2009, 12, 31), (2009, 53)),
            ((2010, 1, 3), (2009, 53)),
            ((2021, 1, 3), (2020, 53)),
            ((2000, 1, 1), (1999, 52)),
            ((2020, 12, 31), (2020, 53)),
            ((2026, 1, 1), (2026, 1)),
        ];
        for ((year, month, day), expected) in cases {
            assert_eq!(iso(&engine, year, month, day), expected, "{year}-{month}-{day}");
        }
    }

    #[test]
    fn test_iso_weeks_in_year() {
        let engine = gregorian();
        for year in [2004, 2009, 2015, 2020, 2026] {
            assert_eq!(engine.weeks_in_year(year, WeekNumberScheme::Iso).unwrap(), 53, "{year}");
        }
        assert_eq!(engine.weeks_in_year(2021, WeekNumberScheme::Iso).unwrap(), 52);
    }

    #[test]
    fn test_iso_week_dates() {
        let engine = gregorian();
        assert_eq!(engine.date_from_iso_week(2026, 1, 1).unwrap(), CivilDate::new(2025, 12, 29));
        assert_eq!(engine.date_from_iso_week(2020, 53, 7).unwrap(), CivilDate::new(2021, 1, 3));
        assert!(engine.is_valid_iso_week_date(2020, 53, 7));
        assert!(!engine.is_valid_iso_week_date(2021, 53, 1));
        assert!(!engine.is_valid_iso_week_date(2021, 1, 8));
        assert!(!engine.is_valid_iso_week_date(2021, 0, 1));
        assert!(matches!(
            engine.date_from_iso_week(2021, 53, 1),
            Err(CalendarError::InvalidWeekDate { week: 53, .. })
        ));
    }

    #[test]
    fn test_regular_full_first_week() {
        let engine = gregorian();
        let scheme = WeekNumberScheme::Regular { week_start: Weekday::Sunday, first_week: FirstWeek::Full };
        // 2023 starts on a Sunday, so 1 January opens week 1
        let week = engine.week_number(CivilDate::new(2023, 1, 1), scheme).unwrap();
        assert_eq!((week.year, week.week), (2023, 1));
        let week = engine.week_number(CivilDate::new(2023, 1, 8), scheme).unwrap();
        assert_eq!((week.year, week.week), (2023, 2));

        // 2026 starts on a Thursday: 1-3 January belong to the last week of 2025
        let week = engine.week_number(CivilDate::new(2026, 1, 3), scheme).unwrap();
        assert_eq!((week.year, week.week), (2025, 52));
        let week = engine.week_number(CivilDate::new(2026, 1, 4), scheme).unwrap();
        assert_eq!((week.year, week.week), (2026, 1));
        assert_eq!(engine.weeks_in_year(2025, scheme).unwrap(), 52);
    }

    #[test]
    fn test_regular_partial_first_week() {
        let engine = gregorian();
        let scheme = WeekNumberScheme::Regular { week_start: Weekday::Monday, first_week: FirstWeek::Partial };
        // 2021 starts on a Friday: 1-3 January are the partial week 1
        let week = engine.week_number(CivilDate::new(2021, 1, 3), scheme).unwrap();
        assert_eq!((week.year, week.week), (2021, 1));
        let week = engine.week_number(CivilDate::new(2021, 1, 4), scheme).unwrap();
        assert_eq!((week.year, week.week), (2021, 2));
        assert_eq!(engine.weeks_in_year(2021, scheme).unwrap(), 53);
    }

    #[test]
    fn test_iso_weeks_in_non_january_years() {
        let hebrew = CalendarEngine::new(Hebrew::new()).unwrap();
        let week = |date| hebrew.week_number(date, WeekNumberScheme::Iso).unwrap();
        // 1 Tishrei 5785 was Thursday 3 October 2024, so its ISO week opens on 27 Elul 5784
        assert_eq!(week(CivilDate::new(5784, 13, 26)), WeekNumber { year: 5784, week: 54 });
        assert_eq!(week(CivilDate::new(5784, 13, 27)), WeekNumber { year: 5785, week: 1 });
        assert_eq!(week(CivilDate::new(5785, 1, 1)), WeekNumber { year: 5785, week: 1 });

        let jalali = CalendarEngine::new(Jalali::new()).unwrap();
        let week = |date| jalali.week_number(date, WeekNumberScheme::Iso).unwrap();
        // 1 Farvardin 1403 was Wednesday 20 March 2024
        assert_eq!(week(CivilDate::new(1402, 12, 27)), WeekNumber { year: 1402, week: 52 });
        assert_eq!(week(CivilDate::new(1402, 12, 28)), WeekNumber { year: 1403, week: 1 });
        assert_eq!(jalali.date_from_iso_week(1403, 1, 1).unwrap(), CivilDate::new(1402, 12, 28));
    }

    #[test]
    fn test_full_first_week_in_non_january_years() {
        let hebrew = CalendarEngine::new(Hebrew::new()).unwrap();
        let scheme = WeekNumberScheme::Regular { week_start: Weekday::Sunday, first_week: FirstWeek::Full };
        let week = |date| hebrew.week_number(date, scheme).unwrap();
        // 5785 opens on a Thursday: 1-3 Tishrei belong to the last week of 5784
        assert_eq!(week(CivilDate::new(5785, 1, 3)), WeekNumber { year: 5784, week: 55 });
        assert_eq!(week(CivilDate::new(5785, 1, 4)), WeekNumber { year: 5785, week: 1 });
        assert_eq!(hebrew.weeks_in_year(5784, scheme).unwrap(), 55);
    }

    #[test]
    fn test_regular_week_zero() {
        let engine = gregorian();
        let scheme = WeekNumberScheme::Regular { week_start: Weekday::Sunday, first_week: FirstWeek::Zero };
        let week = engine.week_number(CivilDate::new(2026, 1, 1), scheme).unwrap();
        assert_eq!((week.year, week.week), (2026, 0));
        let week = engine.week_number(CivilDate::new(2026, 1, 4), scheme).unwrap();
        assert_eq!((week.year, week.week), (2026, 1));
        // No week 0 when the year opens on the week start
        let week = engine.week_number(CivilDate::new(2023, 1, 1), scheme).unwrap();
        assert_eq!((week.year, week.week), (2023, 1));
        assert_eq!(engine.weeks_in_year(2026, scheme).unwrap(), 52);
    }

    #[test]
    fn test_simple_weeks() {
        let engine = gregorian();
        let week = |month, day| engine.week_number(CivilDate::new(2024, month, day), WeekNumberScheme::Simple).unwrap();
        assert_eq!(week(1, 1).week, 1);
        assert_eq!(week(1, 7).week, 1);
        assert_eq!(week(1, 8).week, 2);
        assert_eq!(week(12, 31), WeekNumber { year: 2024, week: 53 });
        assert_eq!(engine.weeks_in_year(2023, WeekNumberScheme::Simple).unwrap(), 53);
    }

    #[test]
    fn test_scheme_serde() {
        let scheme = WeekNumberScheme::Regular { week_start: Weekday::Saturday, first_week: FirstWeek::Partial };
        let json = serde_json::to_string(&scheme).unwrap();
        assert_eq!(json, r#"{"scheme":"regular","week_start":"saturday","first_week":"partial"}"#);
        assert_eq!(serde_json::from_str::<WeekNumberScheme>(&json).unwrap(), scheme);
        assert_eq!(serde_json::from_str::<WeekNumberScheme>(r#"{"scheme":"iso"}"#).unwrap(), WeekNumberScheme::Iso);
        assert_eq!(WeekNumber { year: 2026, week: 1 }.to_string(), "2026-W01");
    }
}

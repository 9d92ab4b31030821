//! Date arithmetic and differences with non-uniform month and year lengths.

use crate::engine::CalendarEngine;
use crate::prelude::*;
use crate::rules::{CalendarRules, offset_year, year_steps};
use crate::{CalendarError, CivilDate, DayCount};
use serde::{Deserialize, Serialize};

/// Whether a difference runs forwards or backwards in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub const fn sign(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Elapsed whole years, then months, then days between two dates.
///
/// The magnitudes are always non-negative; `direction` records whether the
/// second date lies before the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[display(fmt = "{direction} {years}y {months}m {days}d")]
pub struct DateDifference {
    pub years:     i32,
    pub months:    i32,
    pub days:      i32,
    pub direction: Direction,
}

impl DateDifference {
    /// The same magnitudes in the opposite direction
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self { direction: self.direction.flipped(), ..self }
    }
}

impl<R: CalendarRules> CalendarEngine<R> {
    fn is_last_day_of_month(&self, date: CivilDate) -> bool {
        date.day() == self.rules().days_in_month(date.year(), date.month())
    }

    /// Whether the month containing `to` completes a whole month counted from `from`
    fn month_reached(&self, from: CivilDate, to: CivilDate) -> bool {
        to.day() >= from.day() || (self.is_last_day_of_month(from) && self.is_last_day_of_month(to))
    }

    fn next_year(&self, year: i32) -> Result<i32, CalendarError> {
        let next = offset_year(year, 1, self.has_year_zero()).ok_or_else(|| self.out_of_range(year))?;
        self.check_year(next)?;
        Ok(next)
    }

    fn previous_year(&self, year: i32) -> Result<i32, CalendarError> {
        let previous = offset_year(year, -1, self.has_year_zero()).ok_or_else(|| self.out_of_range(year))?;
        self.check_year(previous)?;
        Ok(previous)
    }

    /// Month steps from `(from_year, from_month)` to `(to_year, to_month)`; both valid, from first
    fn months_between(&self, from_year: i32, from_month: u8, to_year: i32, to_month: u8) -> i64 {
        let rules = self.rules();
        let whole_years = if self.has_leap_months() {
            let mut total = 0;
            let mut year = from_year;
            while year < to_year {
                total += i64::from(rules.months_in_year(year));
                year = offset_year(year, 1, self.has_year_zero()).unwrap_or(to_year);
            }
            total
        } else {
            year_steps(from_year, to_year, self.has_year_zero()) * i64::from(rules.months_in_year(to_year))
        };
        whole_years + i64::from(to_month) - i64::from(from_month)
    }

    /// Clamps `day` into the month and validates the result
    fn clamped(&self, year: i32, month: u8, day: u8) -> Result<CivilDate, CalendarError> {
        self.date(year, month, day.min(self.rules().days_in_month(year, month)))
    }

    /// Moves `date` by `days`.
    ///
    /// # Errors
    /// Returns the validation errors of [`Self::date`] for `date`, or
    /// `CalendarError::DayCountOutOfRange` if the result leaves the calendar's range.
    pub fn add_days(&self, date: CivilDate, days: i64) -> Result<CivilDate, CalendarError> {
        let count = self.date_to_day_count(date)?;
        let target = count
            .checked_add(days)
            .unwrap_or_else(|| DayCount::new(count.get().saturating_add(days)));
        self.day_count_to_date(target)
    }

    /// Moves `date` by whole years, keeping the month and clamping the day.
    ///
    /// Year 0 is skipped in calendars without one. Hebrew leap-month identity is
    /// kept through the month index, so Adar I or Adar II of a leap year becomes
    /// Adar of a common year and Adar becomes Adar II.
    ///
    /// # Errors
    /// Returns the validation errors of [`Self::date`] for `date`, or
    /// `CalendarError::OutOfRange` if the target year is outside the calendar's range.
    pub fn add_years(&self, date: CivilDate, years: i64) -> Result<CivilDate, CalendarError> {
        self.date_to_day_count(date)?;
        let (year, month, day) = date.to_tuple();

        let target = offset_year(year, years, self.has_year_zero())
            .ok_or_else(|| self.out_of_range(if years > 0 { i32::MAX } else { i32::MIN }))?;
        self.check_year(target)?;

        let index = self.rules().month_number_to_month_index(year, month);
        let month = self.rules().month_index_to_month_number(target, index);
        self.clamped(target, month, day)
    }

    /// Moves `date` by whole months, crossing year boundaries and clamping the day.
    ///
    /// # Errors
    /// Returns the validation errors of [`Self::date`] for `date`, or
    /// `CalendarError::OutOfRange` if the target year is outside the calendar's range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn add_months(&self, date: CivilDate, months: i64) -> Result<CivilDate, CalendarError> {
        self.date_to_day_count(date)?;
        let (mut year, month, day) = date.to_tuple();

        let overflow = || self.out_of_range(if months > 0 { i32::MAX } else { i32::MIN });
        if !self.has_leap_months() {
            let per_year = i64::from(self.rules().months_in_year(year));
            let zero_based = months.checked_add(i64::from(month) - 1).ok_or_else(overflow)?;
            year = offset_year(year, zero_based.div_euclid(per_year), self.has_year_zero())
                .ok_or_else(overflow)?;
            self.check_year(year)?;
            return self.clamped(year, (zero_based.rem_euclid(per_year) + 1) as u8, day);
        }

        // Month counts vary by year: walk whole years, each step bounded by the valid range
        let mut month = i64::from(month);
        let mut remaining = months;
        while remaining > 0 {
            let last = i64::from(self.rules().months_in_year(year));
            if remaining <= last - month {
                month += remaining;
                break;
            }
            remaining -= last - month + 1;
            year = self.next_year(year)?;
            month = 1;
        }
        while remaining < 0 {
            if remaining >= 1 - month {
                month += remaining;
                break;
            }
            remaining += month;
            year = self.previous_year(year)?;
            month = i64::from(self.rules().months_in_year(year));
        }
        self.clamped(year, month as u8, day)
    }

    /// Difference between two dates in whole years, months and days.
    ///
    /// A month (or year) counts as elapsed only when the day of `to` reaches
    /// the day of `from`, or both are the last days of their months; so
    /// 29 February to 28 February of the next year is exactly one year. If
    /// `to` precedes `from` the difference from `to` to `from` is returned with
    /// [`Direction::Backward`].
    ///
    /// # Errors
    /// Returns the validation errors of [`Self::date`] for either date.
    pub fn date_difference(&self, from: CivilDate, to: CivilDate) -> Result<DateDifference, CalendarError> {
        let from_count = self.date_to_day_count(from)?;
        let to_count = self.date_to_day_count(to)?;
        if to_count < from_count {
            return Ok(self.forward_difference(to, from).reversed());
        }
        Ok(self.forward_difference(from, to))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn forward_difference(&self, from: CivilDate, to: CivilDate) -> DateDifference {
        let rules = self.rules();
        let has_year_zero = self.has_year_zero();
        let (from_year, from_month, from_day) = from.to_tuple();
        let (to_year, to_month, to_day) = to.to_tuple();
        let reached = self.month_reached(from, to);

        // Years up to the last anniversary of `from` on or before `to`
        let index = rules.month_number_to_month_index(from_year, from_month);
        let anniversary = rules.month_index_to_month_number(to_year, index);
        let mut years = year_steps(from_year, to_year, has_year_zero);
        if to_month < anniversary || (to_month == anniversary && !reached) {
            years -= 1;
        }

        let anchor_year = offset_year(from_year, years, has_year_zero).unwrap_or(from_year);
        let anchor_month = rules.month_index_to_month_number(anchor_year, index);
        let mut months = self.months_between(anchor_year, anchor_month, to_year, to_month);

        let days = if reached {
            if to_day >= from_day { i64::from(to_day - from_day) } else { 0 }
        } else {
            months -= 1;
            // Days since the same day (clamped) of the month before `to`
            let (year, month) = if to_month > 1 {
                (to_year, to_month - 1)
            } else {
                let year = offset_year(to_year, -1, has_year_zero).unwrap_or(to_year);
                (year, rules.months_in_year(year))
            };
            let day = from_day.min(rules.days_in_month(year, month));
            rules.date_to_day_count(to) - rules.date_to_day_count(CivilDate::new(year, month, day))
        };

        DateDifference {
            years:     years as i32,
            months:    months as i32,
            days:      days as i32,
            direction: Direction::Forward,
        }
    }

    /// Signed whole years from `from` to `to`.
    ///
    /// # Errors
    /// Returns the validation errors of [`Self::date`] for either date.
    pub fn years_difference(&self, from: CivilDate, to: CivilDate) -> Result<i32, CalendarError> {
        let difference = self.date_difference(from, to)?;
        Ok(difference.years * difference.direction.sign())
    }

    /// Signed whole months from `from` to `to`, counting each year's real month count.
    ///
    /// # Errors
    /// Returns the validation errors of [`Self::date`] for either date.
    #[allow(clippy::cast_possible_truncation)]
    pub fn months_difference(&self, from: CivilDate, to: CivilDate) -> Result<i32, CalendarError> {
        let from_count = self.date_to_day_count(from)?;
        let to_count = self.date_to_day_count(to)?;
        let (earlier, later, sign) = if to_count < from_count { (to, from, -1) } else { (from, to, 1) };

        let mut months = self.months_between(earlier.year(), earlier.month(), later.year(), later.month());
        if !self.month_reached(earlier, later) {
            months -= 1;
        }
        Ok(months as i32 * sign)
    }

    /// Signed number of days from `from` to `to`.
    ///
    /// # Errors
    /// Returns the validation errors of [`Self::date`] for either date.
    pub fn days_difference(&self, from: CivilDate, to: CivilDate) -> Result<i64, CalendarError> {
        Ok(self.date_to_day_count(to)? - self.date_to_day_count(from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{EraNaming, Gregorian, Hebrew, Hijri};

    fn gregorian() -> CalendarEngine<Gregorian> {
        CalendarEngine::new(Gregorian::new(EraNaming::Christian)).unwrap()
    }

    fn d(year: i32, month: u8, day: u8) -> CivilDate {
        CivilDate::new(year, month, day)
    }

    #[test]
    fn test_add_days() {
        let engine = gregorian();
        assert_eq!(engine.add_days(d(2024, 2, 28), 1).unwrap(), d(2024, 2, 29));
        assert_eq!(engine.add_days(d(2024, 3, 1), -1).unwrap(), d(2024, 2, 29));
        assert_eq!(engine.add_days(d(1, 1, 1), -1).unwrap(), d(-1, 12, 31));
        assert!(matches!(
            engine.add_days(d(9999, 12, 31), 1),
            Err(CalendarError::DayCountOutOfRange { .. })
        ));
        assert!(engine.add_days(d(2024, 1, 1), i64::MAX).is_err());
    }

    #[test]
    fn test_add_months_clamps_day() {
        let engine = gregorian();
        assert_eq!(engine.add_months(d(2024, 1, 31), 1).unwrap(), d(2024, 2, 29));
        assert_eq!(engine.add_months(d(2023, 1, 31), 1).unwrap(), d(2023, 2, 28));
        assert_eq!(engine.add_months(d(2024, 3, 31), -1).unwrap(), d(2024, 2, 29));
        assert_eq!(engine.add_months(d(2024, 11, 15), 3).unwrap(), d(2025, 2, 15));
        assert_eq!(engine.add_months(d(2024, 2, 15), -14).unwrap(), d(2022, 12, 15));
        assert_eq!(engine.add_months(d(2024, 5, 5), 0).unwrap(), d(2024, 5, 5));
    }

    #[test]
    fn test_add_months_extreme_counts() {
        let engine = gregorian();
        for months in [i64::MAX, i64::MIN, i64::MAX - 11, i64::MIN + 1] {
            assert!(matches!(
                engine.add_months(d(2024, 12, 1), months),
                Err(CalendarError::OutOfRange { .. })
            ));
        }

        let hebrew = CalendarEngine::new(Hebrew::new()).unwrap();
        for months in [i64::MAX, i64::MIN] {
            assert!(matches!(
                hebrew.add_months(d(5784, 1, 1), months),
                Err(CalendarError::OutOfRange { .. })
            ));
            assert!(matches!(
                hebrew.add_months(d(5784, 13, 29), months),
                Err(CalendarError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_add_months_skips_year_zero() {
        let engine = gregorian();
        assert_eq!(engine.add_months(d(1, 1, 15), -1).unwrap(), d(-1, 12, 15));
        assert_eq!(engine.add_months(d(-1, 12, 15), 1).unwrap(), d(1, 1, 15));
    }

    #[test]
    fn test_add_years() {
        let engine = gregorian();
        assert_eq!(engine.add_years(d(2024, 2, 29), 1).unwrap(), d(2025, 2, 28));
        assert_eq!(engine.add_years(d(2024, 2, 29), 4).unwrap(), d(2028, 2, 29));
        assert_eq!(engine.add_years(d(1, 1, 1), -1).unwrap(), d(-1, 1, 1));
        assert_eq!(engine.add_years(d(-1, 6, 1), 1).unwrap(), d(1, 6, 1));
        assert!(matches!(
            engine.add_years(d(9999, 1, 1), 1),
            Err(CalendarError::OutOfRange { year: 10_000, .. })
        ));
        assert!(engine.add_years(d(2024, 1, 1), i64::MIN).is_err());
    }

    #[test]
    fn test_hebrew_month_identity() {
        let engine = CalendarEngine::new(Hebrew::new()).unwrap();
        // Adar I and Adar II of leap 5784 both become Adar of 5785
        assert_eq!(engine.add_years(d(5784, 6, 10), 1).unwrap(), d(5785, 6, 10));
        assert_eq!(engine.add_years(d(5784, 7, 10), 1).unwrap(), d(5785, 6, 10));
        // Adar of common 5783 becomes Adar II of 5784
        assert_eq!(engine.add_years(d(5783, 6, 10), 1).unwrap(), d(5784, 7, 10));
        // Nisan keeps its identity across the inserted month
        assert_eq!(engine.add_years(d(5783, 7, 15), 1).unwrap(), d(5784, 8, 15));

        // 13 months from Tishrei 5784 (leap) is Tishrei 5785
        assert_eq!(engine.add_months(d(5784, 1, 1), 13).unwrap(), d(5785, 1, 1));
        assert_eq!(engine.add_months(d(5785, 1, 1), -13).unwrap(), d(5784, 1, 1));
        assert_eq!(engine.add_months(d(5785, 1, 1), 12).unwrap(), d(5786, 1, 1));
        assert!(engine.add_months(d(8119, 1, 1), 13).is_err());
    }

    #[test]
    fn test_date_difference() {
        struct TestCase {
            from:     CivilDate,
            to:       CivilDate,
            expected: (i32, i32, i32),
        }

        let cases = [
            TestCase { from: d(2000, 1, 1), to: d(2000, 1, 1), expected: (0, 0, 0) },
            TestCase { from: d(2000, 1, 15), to: d(2001, 3, 20), expected: (1, 2, 5) },
            TestCase { from: d(2000, 2, 29), to: d(2001, 2, 28), expected: (1, 0, 0) },
            TestCase { from: d(2000, 2, 29), to: d(2001, 3, 1), expected: (1, 0, 1) },
            TestCase { from: d(2024, 1, 31), to: d(2024, 2, 29), expected: (0, 1, 0) },
            TestCase { from: d(2024, 1, 31), to: d(2024, 2, 15), expected: (0, 0, 15) },
            TestCase { from: d(2024, 3, 31), to: d(2024, 5, 15), expected: (0, 1, 15) },
            TestCase { from: d(2023, 12, 20), to: d(2024, 1, 10), expected: (0, 0, 21) },
            TestCase { from: d(-1, 12, 31), to: d(1, 12, 31), expected: (1, 0, 0) },
        ];

        let engine = gregorian();
        for case in &cases {
            let difference = engine.date_difference(case.from, case.to).unwrap();
            assert_eq!(
                (difference.years, difference.months, difference.days),
                case.expected,
                "{} -> {}",
                case.from,
                case.to
            );
            assert_eq!(difference.direction, Direction::Forward);
        }
    }

    #[test]
    fn test_date_difference_backward() {
        let engine = gregorian();
        let forward = engine.date_difference(d(2000, 1, 15), d(2001, 3, 20)).unwrap();
        let backward = engine.date_difference(d(2001, 3, 20), d(2000, 1, 15)).unwrap();
        assert_eq!(backward.direction, Direction::Backward);
        assert_eq!(backward, forward.reversed());
        assert_eq!(engine.years_difference(d(2001, 3, 20), d(2000, 1, 15)).unwrap(), -1);
        assert_eq!(engine.months_difference(d(2001, 3, 20), d(2000, 1, 15)).unwrap(), -14);
        assert_eq!(engine.days_difference(d(2001, 3, 20), d(2000, 1, 15)).unwrap(), -430);
        assert_eq!(forward.to_string(), "Forward 1y 2m 5d");
    }

    #[test]
    fn test_hebrew_difference_counts_leap_month() {
        let engine = CalendarEngine::new(Hebrew::new()).unwrap();
        let difference = engine.date_difference(d(5784, 1, 1), d(5785, 1, 1)).unwrap();
        assert_eq!((difference.years, difference.months, difference.days), (1, 0, 0));
        assert_eq!(engine.months_difference(d(5784, 1, 1), d(5785, 1, 1)).unwrap(), 13);
        assert_eq!(engine.months_difference(d(5785, 1, 1), d(5786, 1, 1)).unwrap(), 12);

        // Nisan to Nisan is a full year even though the month number changes
        let passover = engine.date_difference(d(5783, 7, 15), d(5784, 8, 15)).unwrap();
        assert_eq!((passover.years, passover.months, passover.days), (1, 0, 0));
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let engine = CalendarEngine::new(Hijri::new()).unwrap();
        assert!(matches!(
            engine.add_months(d(1445, 2, 30), 1),
            Err(CalendarError::InvalidDate { month: 2, day: 30, .. })
        ));
        assert!(engine.date_difference(d(0, 1, 1), d(1445, 1, 1)).is_err());
    }
}

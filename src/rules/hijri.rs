use super::{CalendarKind, CalendarRules, CalendarSystem};
use crate::consts::{HIJRI_EPOCH, MAX_YEAR};
use crate::era::EraRecord;
use crate::{CivilDate, DayCount, Weekday};

const LAST_MONTH: u8 = 12;
/// 30-year cycle of 10631 days with 11 leap years
const DAYS_IN_CYCLE: i64 = 10_631;

/// Tabular Islamic civil calendar, years `1..=9999`.
///
/// Odd months have 30 days, even months 29; the twelfth month gains a day in
/// the 11 leap years of each 30-year cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hijri;

impl Hijri {
    pub const fn new() -> Self {
        Self
    }
}

const fn is_leap(year: i64) -> bool {
    (11 * year + 14).rem_euclid(30) < 11
}

const fn to_day_count(year: i64, month: u8, day: u8) -> i64 {
    let (month, day) = (month as i64, day as i64);
    HIJRI_EPOCH - 1 + (year - 1) * 354 + (3 + 11 * year).div_euclid(30) + 29 * (month - 1) + month / 2 + day
}

const fn first_day_of_year(year: i64) -> i64 {
    to_day_count(year, 1, 1)
}

impl CalendarRules for Hijri {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::Hijri
    }

    fn kind(&self) -> CalendarKind {
        CalendarKind::Lunar
    }

    fn epoch(&self) -> DayCount {
        DayCount::new(HIJRI_EPOCH)
    }

    fn earliest_valid_date(&self) -> DayCount {
        self.epoch()
    }

    fn latest_valid_date(&self) -> DayCount {
        DayCount::new(first_day_of_year(i64::from(MAX_YEAR) + 1) - 1)
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        LAST_MONTH
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        if month % 2 == 1 || (month == LAST_MONTH && self.is_leap_year(year)) { 30 } else { 29 }
    }

    fn days_in_year(&self, year: i32) -> u16 {
        if self.is_leap_year(year) { 355 } else { 354 }
    }

    fn is_leap_year(&self, year: i32) -> bool {
        is_leap(i64::from(year))
    }

    fn week_day_of_pray(&self) -> Weekday {
        Weekday::Friday
    }

    fn default_eras(&self) -> Vec<EraRecord> {
        vec![EraRecord::forward(CivilDate::new(1, 1, 1), "Anno Hegirae", "AH")]
    }

    fn date_to_day_count(&self, date: CivilDate) -> DayCount {
        DayCount::new(to_day_count(i64::from(date.year()), date.month(), date.day()))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn day_count_to_date(&self, day: DayCount) -> CivilDate {
        let day = day.get();

        // Estimate from the mean year, then correct by at most a year either way
        let mut year = ((day - HIJRI_EPOCH) * 30 + 10_646).div_euclid(DAYS_IN_CYCLE);
        while first_day_of_year(year) > day {
            year -= 1;
        }
        while first_day_of_year(year + 1) <= day {
            year += 1;
        }

        let year = year as i32;
        let mut month = 1;
        let mut month_start = first_day_of_year(i64::from(year));
        while month < LAST_MONTH {
            let length = i64::from(self.days_in_month(year, month));
            if day < month_start + length {
                break;
            }
            month_start += length;
            month += 1;
        }

        CivilDate::new(year, month, (day - month_start + 1) as u8)
    }
}

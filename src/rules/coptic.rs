use super::{CalendarKind, CalendarRules, CalendarSystem};
use crate::consts::{COPTIC_EPOCH, MAX_YEAR};
use crate::era::EraRecord;
use crate::{CivilDate, DayCount};

/// Days in each of the first twelve months
const DAYS_IN_REGULAR_MONTH: i64 = 30;
/// Days in one four-year leap cycle
const DAYS_IN_CYCLE: i64 = 4 * 365 + 1;
const EPAGOMENAL_MONTH: u8 = 13;

/// The 13-month Coptic arithmetic, parameterised by its epoch.
///
/// Twelve months of 30 days are followed by 5 epagomenal days (6 in leap
/// years). Year 3 is the first leap year. Counting from a fake epoch one
/// common year before the real one turns the leap pattern into a uniform
/// `365, 365, 365, 366` cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CopticAlgorithm {
    epoch: DayCount,
}

impl CopticAlgorithm {
    pub(crate) const fn new(epoch: DayCount) -> Self {
        Self { epoch }
    }

    pub(crate) const fn epoch(self) -> DayCount {
        self.epoch
    }

    pub(crate) const fn is_leap_year(self, year: i32) -> bool {
        (year as i64 + 1).rem_euclid(4) == 0
    }

    pub(crate) const fn days_in_month(self, year: i32, month: u8) -> u8 {
        if month < EPAGOMENAL_MONTH {
            DAYS_IN_REGULAR_MONTH as u8
        } else if self.is_leap_year(year) {
            6
        } else {
            5
        }
    }

    pub(crate) const fn to_day_count(self, year: i32, month: u8, day: u8) -> DayCount {
        let year = year as i64;
        DayCount::new(
            self.epoch.get() - 1
                + (year - 1) * 365
                + year.div_euclid(4)
                + (month as i64 - 1) * DAYS_IN_REGULAR_MONTH
                + day as i64,
        )
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) const fn from_day_count(self, day: DayCount) -> CivilDate {
        // Days since the fake epoch, where fake year 0 starts
        let elapsed = day.get() - (self.epoch.get() - 365);
        let cycles = elapsed.div_euclid(DAYS_IN_CYCLE);
        let remainder = elapsed.rem_euclid(DAYS_IN_CYCLE);

        // The last day of the cycle belongs to the fourth (leap) year
        let year_in_cycle = if remainder / 365 > 3 { 3 } else { remainder / 365 };
        let day_of_year = remainder - year_in_cycle * 365;

        CivilDate::new(
            (cycles * 4 + year_in_cycle) as i32,
            (day_of_year / DAYS_IN_REGULAR_MONTH + 1) as u8,
            (day_of_year % DAYS_IN_REGULAR_MONTH + 1) as u8,
        )
    }

    pub(crate) const fn latest_valid_date(self) -> DayCount {
        DayCount::new(self.to_day_count(MAX_YEAR + 1, 1, 1).get() - 1)
    }
}

/// Coptic calendar (Era of the Martyrs), years `1..=9999`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coptic {
    algorithm: CopticAlgorithm,
}

impl Coptic {
    pub const fn new() -> Self {
        Self {
            algorithm: CopticAlgorithm::new(DayCount::new(COPTIC_EPOCH)),
        }
    }
}

impl Default for Coptic {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarRules for Coptic {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::Coptic
    }

    fn kind(&self) -> CalendarKind {
        CalendarKind::Solar
    }

    fn epoch(&self) -> DayCount {
        self.algorithm.epoch()
    }

    fn earliest_valid_date(&self) -> DayCount {
        self.algorithm.epoch()
    }

    fn latest_valid_date(&self) -> DayCount {
        self.algorithm.latest_valid_date()
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        EPAGOMENAL_MONTH
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        self.algorithm.days_in_month(year, month)
    }

    fn days_in_year(&self, year: i32) -> u16 {
        if self.is_leap_year(year) { 366 } else { 365 }
    }

    fn is_leap_year(&self, year: i32) -> bool {
        self.algorithm.is_leap_year(year)
    }

    fn default_eras(&self) -> Vec<EraRecord> {
        vec![EraRecord::forward(CivilDate::new(1, 1, 1), "Anno Martyrum", "AM")]
    }

    fn date_to_day_count(&self, date: CivilDate) -> DayCount {
        self.algorithm.to_day_count(date.year(), date.month(), date.day())
    }

    fn day_count_to_date(&self, day: DayCount) -> CivilDate {
        self.algorithm.from_day_count(day)
    }
}

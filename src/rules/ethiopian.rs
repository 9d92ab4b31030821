use super::coptic::CopticAlgorithm;
use super::{CalendarKind, CalendarRules, CalendarSystem};
use crate::consts::ETHIOPIAN_EPOCH;
use crate::era::EraRecord;
use crate::{CivilDate, DayCount};

/// Ethiopian calendar (Amete Mihret), years `1..=9999`.
///
/// Same arithmetic as the Coptic calendar, 276 years earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ethiopian {
    algorithm: CopticAlgorithm,
}

impl Ethiopian {
    pub const fn new() -> Self {
        Self {
            algorithm: CopticAlgorithm::new(DayCount::new(ETHIOPIAN_EPOCH)),
        }
    }
}

impl Default for Ethiopian {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarRules for Ethiopian {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::Ethiopian
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
        13
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
        vec![EraRecord::forward(CivilDate::new(1, 1, 1), "Amata Mehrat", "AM")]
    }

    fn date_to_day_count(&self, date: CivilDate) -> DayCount {
        self.algorithm.to_day_count(date.year(), date.month(), date.day())
    }

    fn day_count_to_date(&self, day: DayCount) -> CivilDate {
        self.algorithm.from_day_count(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Coptic;

    #[test]
    fn test_epoch_and_bounds() {
        let rules = Ethiopian::new();
        assert_eq!(rules.epoch().get(), 1_724_221);
        assert_eq!(rules.latest_valid_date().get(), 5_376_355);
    }

    #[test]
    fn test_known_dates() {
        let rules = Ethiopian::new();
        // 1 January 2000 (Gregorian) was 22 Tahsas 1992
        assert_eq!(rules.day_count_to_date(DayCount::new(2_451_545)), CivilDate::new(1992, 4, 22));
    }

    #[test]
    fn test_offset_from_coptic() {
        let ethiopian = Ethiopian::new();
        let coptic = Coptic::new();
        let day = DayCount::new(2_460_000);
        let e = ethiopian.day_count_to_date(day);
        let c = coptic.day_count_to_date(day);
        assert_eq!(e.year() - c.year(), 276);
        assert_eq!((e.month(), e.day()), (c.month(), c.day()));
        assert_eq!(ethiopian.is_leap_year(e.year()), coptic.is_leap_year(c.year()));
    }
}

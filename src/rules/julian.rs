use super::gregorian::christian_eras;
use super::{CalendarKind, CalendarRules, CalendarSystem, EraNaming, from_astronomical, to_astronomical};
use crate::consts::{DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, JULIAN_EPOCH, LEAP_YEAR_CYCLE, MAX_YEAR};
use crate::era::EraRecord;
use crate::{CivilDate, DayCount};

/// Julian calendar, years `-4712..=9999` with no year zero.
///
/// The era naming (BC/AD or BCE/CE) is display configuration only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Julian {
    era_naming: EraNaming,
}

impl Julian {
    pub const fn new(era_naming: EraNaming) -> Self {
        Self { era_naming }
    }

    pub const fn era_naming(&self) -> EraNaming {
        self.era_naming
    }
}

const fn to_day_count(year: i32, month: u8, day: u8) -> DayCount {
    let (y, m, d) = (to_astronomical(year), month as i64, day as i64);
    let a = (14 - m) / 12;
    let y = y + 4800 - a;
    let m = m + 12 * a - 3;
    DayCount::new(d + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - 32083)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn from_day_count(day: DayCount) -> CivilDate {
    let c = day.get() + 32082;
    let d = (4 * c + 3).div_euclid(1461);
    let e = c - (1461 * d).div_euclid(4);
    let m = (5 * e + 2) / 153;

    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = d - 4800 + m / 10;
    CivilDate::new(from_astronomical(year), month as u8, day as u8)
}

impl CalendarRules for Julian {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::Julian
    }

    fn kind(&self) -> CalendarKind {
        CalendarKind::Solar
    }

    fn epoch(&self) -> DayCount {
        DayCount::new(JULIAN_EPOCH)
    }

    fn earliest_valid_date(&self) -> DayCount {
        // 1 January 4712 BC, one year after JD 0
        to_day_count(-4712, 1, 1)
    }

    fn latest_valid_date(&self) -> DayCount {
        to_day_count(MAX_YEAR, 12, 31)
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        12
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        if month == FEBRUARY && self.is_leap_year(year) {
            FEBRUARY_DAYS_LEAP
        } else {
            DAYS_IN_MONTH.get(usize::from(month)).copied().unwrap_or(0)
        }
    }

    fn days_in_year(&self, year: i32) -> u16 {
        if self.is_leap_year(year) { 366 } else { 365 }
    }

    fn is_leap_year(&self, year: i32) -> bool {
        to_astronomical(year).rem_euclid(LEAP_YEAR_CYCLE) == 0
    }

    fn is_proleptic(&self) -> bool {
        true
    }

    fn default_eras(&self) -> Vec<EraRecord> {
        christian_eras(self.era_naming)
    }

    fn date_to_day_count(&self, date: CivilDate) -> DayCount {
        to_day_count(date.year(), date.month(), date.day())
    }

    fn day_count_to_date(&self, day: DayCount) -> CivilDate {
        from_day_count(day)
    }
}

use super::gregorian;
use super::{CalendarKind, CalendarRules, CalendarSystem, to_astronomical};
use crate::consts::{INDIAN_NATIONAL_EPOCH, MAX_YEAR};
use crate::era::EraRecord;
use crate::{CivilDate, DayCount};

/// Saka years trail Gregorian years by 78
const GREGORIAN_YEAR_OFFSET: i32 = 78;
/// 0-based Gregorian day of year of 1 Chaitra: 22 March, or 21 March in leap years
const NEW_YEAR_DAY_OF_YEAR: i64 = 80;
/// Vaishakha to Bhadra have 31 days
const LONG_MONTHS: i64 = 5;

/// Indian National (Saka) calendar, years `1..=9999`.
///
/// Leap years follow the Gregorian rule applied to `year + 78`; a leap year
/// gives Chaitra 31 days instead of 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IndianNational;

impl IndianNational {
    pub const fn new() -> Self {
        Self
    }
}

const fn first_day_of_year(year: i32) -> i64 {
    gregorian::to_day_count(year + GREGORIAN_YEAR_OFFSET, 1, 1).get() + NEW_YEAR_DAY_OF_YEAR
}

impl CalendarRules for IndianNational {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::IndianNational
    }

    fn kind(&self) -> CalendarKind {
        CalendarKind::Solar
    }

    fn epoch(&self) -> DayCount {
        DayCount::new(INDIAN_NATIONAL_EPOCH)
    }

    fn earliest_valid_date(&self) -> DayCount {
        self.epoch()
    }

    fn latest_valid_date(&self) -> DayCount {
        DayCount::new(first_day_of_year(MAX_YEAR + 1) - 1)
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        12
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        match month {
            1 if self.is_leap_year(year) => 31,
            1 => 30,
            2..=6 => 31,
            _ => 30,
        }
    }

    fn days_in_year(&self, year: i32) -> u16 {
        if self.is_leap_year(year) { 366 } else { 365 }
    }

    fn is_leap_year(&self, year: i32) -> bool {
        gregorian::is_leap_astronomical(to_astronomical(year + GREGORIAN_YEAR_OFFSET))
    }

    fn default_eras(&self) -> Vec<EraRecord> {
        vec![EraRecord::forward(CivilDate::new(1, 1, 1), "Saka Era", "SE")]
    }

    fn date_to_day_count(&self, date: CivilDate) -> DayCount {
        let (year, month, day) = date.to_tuple();
        let first = first_day_of_year(year) + i64::from(day) - 1;
        if month == 1 {
            return DayCount::new(first);
        }

        let chaitra = i64::from(self.days_in_month(year, 1));
        let month = i64::from(month) - 2;
        let offset = if month < LONG_MONTHS {
            month * 31
        } else {
            LONG_MONTHS * 31 + (month - LONG_MONTHS) * 30
        };
        DayCount::new(first + chaitra + offset)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn day_count_to_date(&self, day: DayCount) -> CivilDate {
        let gregorian_year = gregorian::from_day_count(day).year();
        let mut year = gregorian_year - GREGORIAN_YEAR_OFFSET;
        let mut day_of_year = day.get() - first_day_of_year(year);
        if day_of_year < 0 {
            year -= 1;
            day_of_year = day.get() - first_day_of_year(year);
        }

        let chaitra = i64::from(self.days_in_month(year, 1));
        if day_of_year < chaitra {
            return CivilDate::new(year, 1, (day_of_year + 1) as u8);
        }
        day_of_year -= chaitra;

        let (month, day) = if day_of_year < LONG_MONTHS * 31 {
            (day_of_year / 31 + 2, day_of_year % 31 + 1)
        } else {
            day_of_year -= LONG_MONTHS * 31;
            (day_of_year / 30 + 2 + LONG_MONTHS, day_of_year % 30 + 1)
        };
        CivilDate::new(year, month as u8, day as u8)
    }
}

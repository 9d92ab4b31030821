use super::{CalendarKind, CalendarRules, CalendarSystem};
use crate::consts::JALALI_EPOCH;
use crate::era::EraRecord;
use crate::{CivilDate, DayCount, Weekday};
use tracing::trace;

const FIRST_YEAR: i32 = 1244;
const LAST_YEAR: i32 = 1530;

/// Years in one grand cycle of the arithmetic
const GRAND_CYCLE_YEARS: i64 = 2820;
/// Days in one grand cycle
const GRAND_CYCLE_DAYS: i64 = 1_029_983;
/// Day count of 1 Farvardin 475, the start of the grand cycle containing the modern era
const CYCLE_BASE_DAY: i64 = 2_121_446;

/// Years whose leap day the 2820-year arithmetic puts one year late, with the
/// day count of their 30 Esfand. The year after each is shifted by one day.
const DEFECTIVE_YEARS: [(i32, i64); 2] = [(1403, 2_460_755), (1436, 2_472_808)];

/// Jalali (Persian solar hijri) calendar using Birashk's 2820-year cycle,
/// years `1244..=1530`.
///
/// Birashk's arithmetic places the leap day of 1403 and 1436 in the following
/// year. Both pairs are corrected here so the calendar matches the observed
/// new years; the later disagreements (1469/1470, 1502/1503) are kept as the
/// arithmetic computes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Jalali;

impl Jalali {
    pub const fn new() -> Self {
        Self
    }
}

/// Birashk date to day count; integer division truncates towards zero
const fn birashk_to_day_count(year: i64, month: i64, day: i64) -> i64 {
    let base = if year >= 0 { year - 474 } else { year - 473 };
    let cycle_year = 474 + base % GRAND_CYCLE_YEARS;
    let month_days = if month <= 7 { (month - 1) * 31 } else { (month - 1) * 30 + 6 };
    day + month_days
        + (cycle_year * 682 - 110) / 2816
        + (cycle_year - 1) * 365
        + (base / GRAND_CYCLE_YEARS) * GRAND_CYCLE_DAYS
        + JALALI_EPOCH
        - 1
}

const fn birashk_from_day_count(day: i64) -> (i64, i64, i64) {
    let elapsed = day - CYCLE_BASE_DAY;
    let cycle = elapsed / GRAND_CYCLE_DAYS;
    let day_in_cycle = elapsed % GRAND_CYCLE_DAYS;
    let year_in_cycle = if day_in_cycle == GRAND_CYCLE_DAYS - 1 {
        GRAND_CYCLE_YEARS
    } else {
        let (quotient, remainder) = (day_in_cycle / 366, day_in_cycle % 366);
        (2134 * quotient + 2816 * remainder + 2815) / 1_028_522 + quotient + 1
    };

    let mut year = year_in_cycle + GRAND_CYCLE_YEARS * cycle + 474;
    if year <= 0 {
        year -= 1;
    }

    let day_of_year = day - birashk_to_day_count(year, 1, 1) + 1;
    let month = if day_of_year <= 186 {
        (day_of_year + 30) / 31
    } else {
        (day_of_year - 6 + 29) / 30
    };
    (year, month, day - birashk_to_day_count(year, month, 1) + 1)
}

const fn birashk_is_leap(year: i64) -> bool {
    birashk_to_day_count(year + 1, 1, 1) - birashk_to_day_count(year, 1, 1) == 366
}

/// Day count of 30 Esfand if `year` is a corrected defective year
fn defective_last_day(year: i32) -> Option<i64> {
    DEFECTIVE_YEARS
        .iter()
        .find(|(defective, _)| *defective == year)
        .map(|(_, last_day)| *last_day)
}

impl CalendarRules for Jalali {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::Jalali
    }

    fn kind(&self) -> CalendarKind {
        CalendarKind::Solar
    }

    fn epoch(&self) -> DayCount {
        DayCount::new(JALALI_EPOCH)
    }

    fn earliest_valid_date(&self) -> DayCount {
        self.date_to_day_count(CivilDate::new(FIRST_YEAR, 1, 1))
    }

    fn latest_valid_date(&self) -> DayCount {
        self.date_to_day_count(CivilDate::new(LAST_YEAR + 1, 1, 1)) - 1
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        12
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        match month {
            1..=6 => 31,
            12 if !self.is_leap_year(year) => 29,
            _ => 30,
        }
    }

    fn days_in_year(&self, year: i32) -> u16 {
        if self.is_leap_year(year) { 366 } else { 365 }
    }

    fn is_leap_year(&self, year: i32) -> bool {
        let corrected = defective_last_day(year).is_some() || defective_last_day(year - 1).is_some();
        birashk_is_leap(i64::from(year)) != corrected
    }

    fn week_day_of_pray(&self) -> Weekday {
        Weekday::Friday
    }

    fn default_eras(&self) -> Vec<EraRecord> {
        vec![EraRecord::forward(CivilDate::new(1, 1, 1), "Anno Persico", "AP")]
    }

    fn date_to_day_count(&self, date: CivilDate) -> DayCount {
        let (year, month, day) = date.to_tuple();
        if (month, day) == (12, 30) {
            if let Some(last_day) = defective_last_day(year) {
                trace!(year, "using corrected leap day");
                return DayCount::new(last_day);
            }
        }

        let count = birashk_to_day_count(i64::from(year), i64::from(month), i64::from(day));
        if defective_last_day(year - 1).is_some() {
            trace!(year, "shifting year after a corrected leap day");
            return DayCount::new(count + 1);
        }
        DayCount::new(count)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn day_count_to_date(&self, day: DayCount) -> CivilDate {
        let mut count = day.get();
        for (year, last_day) in DEFECTIVE_YEARS {
            if count == last_day {
                trace!(year, "using corrected leap day");
                return CivilDate::new(year, 12, 30);
            }
            if last_day < count && count < birashk_to_day_count(i64::from(year) + 2, 1, 1) {
                trace!(year = year + 1, "shifting year after a corrected leap day");
                count -= 1;
                break;
            }
        }

        let (year, month, day) = birashk_from_day_count(count);
        CivilDate::new(year as i32, month as u8, day as u8)
    }
}

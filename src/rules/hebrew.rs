use super::{CalendarKind, CalendarRules, CalendarSystem};
use crate::consts::HEBREW_EPOCH;
use crate::era::EraRecord;
use crate::prelude::*;
use crate::{CivilDate, DayCount, Weekday};

// Time is measured in halakim ("parts"), 1080 to the hour
const PARTS_PER_DAY: i64 = 24 * 1080;
/// A mean lunar month is 29 days 12 hours 793 parts; this is the part beyond 29 days
const LUNATION_EXCESS_PARTS: i64 = 12 * 1080 + 793;
/// Molad of Tishrei in year 1 (BaHaRaD), shifted so day 0 is the epoch
const FIRST_MOLAD_PARTS: i64 = 12_084;

const FIRST_YEAR: i32 = 5344;
const LAST_YEAR: i32 = 8119;

// Month identities; sequential month numbers start at Tishrei
const CHESHVAN: u8 = 2;
const KISLEV: u8 = 3;
const ADAR: u8 = 6;
const ADAR_I: u8 = 13;
const ADAR_II: u8 = 14;

/// Days per month identity in a regular year; Cheshvan and Kislev vary
const DAYS_IN_MONTH_INDEX: [u8; 15] = [0, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29, 30, 29];

/// Length class of a Hebrew year, set by the Rosh Hashanah postponements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum HebrewYearType {
    /// 353 or 383 days: Cheshvan and Kislev both have 29 days
    Deficient,
    /// 354 or 384 days
    Regular,
    /// 355 or 385 days: Cheshvan and Kislev both have 30 days
    Complete,
}

/// Hebrew lunisolar calendar, years `5344..=8119` (1583–4359 CE).
///
/// Months are numbered sequentially from Tishrei (1). In leap years Adar I is
/// inserted as month 6, Adar II becomes month 7 and the remaining months shift
/// up by one, so Elul is month 12 or 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hebrew;

impl Hebrew {
    pub const fn new() -> Self {
        Self
    }

    /// Classifies a year as deficient, regular or complete
    pub fn year_type(&self, year: i32) -> HebrewYearType {
        match year_length(i64::from(year)) % 10 {
            3 => HebrewYearType::Deficient,
            5 => HebrewYearType::Complete,
            _ => HebrewYearType::Regular,
        }
    }
}

const fn is_leap(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

/// Days from the epoch to Rosh Hashanah of `year`, from the molad of Tishrei
const fn days_elapsed(year: i64) -> i64 {
    let months = (235 * year - 234).div_euclid(19);
    let parts = FIRST_MOLAD_PARTS + LUNATION_EXCESS_PARTS * months;
    let day = 29 * months + parts.div_euclid(PARTS_PER_DAY);
    // Rosh Hashanah never falls on Sunday, Wednesday or Friday
    if (3 * (day + 1)).rem_euclid(7) < 3 { day + 1 } else { day }
}

/// Extra delay keeping year lengths within 353..=355 and 383..=385
const fn year_length_correction(year: i64) -> i64 {
    let previous = days_elapsed(year - 1);
    let current = days_elapsed(year);
    let next = days_elapsed(year + 1);
    if next - current == 356 {
        2
    } else if current - previous == 382 {
        1
    } else {
        0
    }
}

const fn new_year(year: i64) -> i64 {
    HEBREW_EPOCH + days_elapsed(year) + year_length_correction(year)
}

const fn year_length(year: i64) -> i64 {
    new_year(year + 1) - new_year(year)
}

const fn month_index(year: i32, month: u8) -> u8 {
    if !is_leap(year as i64) {
        return month;
    }
    match month {
        6 => ADAR_I,
        7 => ADAR_II,
        8..=13 => month - 1,
        _ => month,
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn days_in_month_index(year: i32, index: u8) -> u8 {
    let length = year_length(year as i64);
    match index {
        CHESHVAN if length % 10 == 5 => 30,
        KISLEV if length % 10 == 3 => 29,
        _ if (index as usize) < DAYS_IN_MONTH_INDEX.len() => DAYS_IN_MONTH_INDEX[index as usize],
        _ => 0,
    }
}

impl CalendarRules for Hebrew {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::Hebrew
    }

    fn kind(&self) -> CalendarKind {
        CalendarKind::Lunisolar
    }

    fn epoch(&self) -> DayCount {
        DayCount::new(HEBREW_EPOCH)
    }

    fn earliest_valid_date(&self) -> DayCount {
        DayCount::new(new_year(i64::from(FIRST_YEAR)))
    }

    fn latest_valid_date(&self) -> DayCount {
        DayCount::new(new_year(i64::from(LAST_YEAR) + 1) - 1)
    }

    fn months_in_year(&self, year: i32) -> u8 {
        if self.is_leap_year(year) { 13 } else { 12 }
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        days_in_month_index(year, month_index(year, month))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn days_in_year(&self, year: i32) -> u16 {
        year_length(i64::from(year)) as u16
    }

    fn is_leap_year(&self, year: i32) -> bool {
        is_leap(i64::from(year))
    }

    fn has_leap_months(&self) -> bool {
        true
    }

    fn week_day_of_pray(&self) -> Weekday {
        Weekday::Saturday
    }

    fn month_number_to_month_index(&self, year: i32, month: u8) -> u8 {
        month_index(year, month)
    }

    fn month_index_to_month_number(&self, year: i32, index: u8) -> u8 {
        match (self.is_leap_year(year), index) {
            (false, ADAR_I | ADAR_II) => ADAR,
            (true, ADAR_I) => 6,
            // Plain Adar is observed as Adar II in a leap year
            (true, ADAR | ADAR_II) => 7,
            (true, 7..=12) => index + 1,
            _ => index,
        }
    }

    fn default_eras(&self) -> Vec<EraRecord> {
        vec![EraRecord::forward(CivilDate::new(1, 1, 1), "Anno Mundi", "AM")]
    }

    fn date_to_day_count(&self, date: CivilDate) -> DayCount {
        let (year, month, day) = date.to_tuple();
        let months_before: i64 = (1..month)
            .map(|m| i64::from(self.days_in_month(year, m)))
            .sum();
        DayCount::new(new_year(i64::from(year)) + months_before + i64::from(day) - 1)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn day_count_to_date(&self, day: DayCount) -> CivilDate {
        let day = day.get();

        // Mean year is 35975351 / 98496 days; the estimate is off by at most one
        let mut year = (day - HEBREW_EPOCH) * 98_496 / 35_975_351 + 1;
        while new_year(year) > day {
            year -= 1;
        }
        while new_year(year + 1) <= day {
            year += 1;
        }

        let year = year as i32;
        let last_month = self.months_in_year(year);
        let mut month = 1;
        let mut month_start = new_year(i64::from(year));
        while month < last_month {
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

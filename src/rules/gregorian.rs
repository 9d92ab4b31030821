use super::{CalendarKind, CalendarRules, CalendarSystem, EraNaming, from_astronomical, to_astronomical};
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, GREGORIAN_EPOCH,
    LEAP_YEAR_CYCLE, MAX_YEAR,
};
use crate::era::EraRecord;
use crate::{CivilDate, DayCount};

/// Proleptic Gregorian calendar, years `-4713..=9999` with no year zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Gregorian {
    era_naming: EraNaming,
}

impl Gregorian {
    pub const fn new(era_naming: EraNaming) -> Self {
        Self { era_naming }
    }

    pub const fn era_naming(&self) -> EraNaming {
        self.era_naming
    }
}

// Helper functions, also used by the calendars synchronised with Gregorian years

pub(crate) const fn is_leap_astronomical(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub(crate) const fn days_in_month(year: i32, month: u8) -> u8 {
    if month == FEBRUARY && is_leap_astronomical(to_astronomical(year)) {
        FEBRUARY_DAYS_LEAP
    } else if (month as usize) < DAYS_IN_MONTH.len() {
        DAYS_IN_MONTH[month as usize]
    } else {
        0
    }
}

/// Fliegel–Van Flandern: day count of a public (no year zero) Gregorian date
pub(crate) const fn to_day_count(year: i32, month: u8, day: u8) -> DayCount {
    let (y, m, d) = (to_astronomical(year), month as i64, day as i64);
    // Shift the year to start in March so February's length only affects the last month
    let a = (14 - m) / 12;
    let y = y + 4800 - a;
    let m = m + 12 * a - 3;
    DayCount::new(
        d + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
            - 32045,
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) const fn from_day_count(day: DayCount) -> CivilDate {
    let a = day.get() + 32044;
    let b = (4 * a + 3).div_euclid(146_097);
    let c = a - (146_097 * b).div_euclid(4);
    let d = (4 * c + 3).div_euclid(1461);
    let e = c - (1461 * d).div_euclid(4);
    let m = (5 * e + 2) / 153;

    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = 100 * b + d - 4800 + m / 10;
    CivilDate::new(from_astronomical(year), month as u8, day as u8)
}

/// The BC/AD (or BCE/CE) era pair shared by the Gregorian and Julian calendars
pub(crate) fn christian_eras(era_naming: EraNaming) -> Vec<EraRecord> {
    let (before, before_short, after, after_short) = match era_naming {
        EraNaming::Christian => ("Before Christ", "BC", "Anno Domini", "AD"),
        EraNaming::Common => ("Before Common Era", "BCE", "Common Era", "CE"),
    };
    vec![
        EraRecord::backward(CivilDate::new(-1, 12, 31), before, before_short),
        EraRecord::forward(CivilDate::new(1, 1, 1), after, after_short),
    ]
}

impl CalendarRules for Gregorian {
    fn system(&self) -> CalendarSystem {
        CalendarSystem::Gregorian
    }

    fn kind(&self) -> CalendarKind {
        CalendarKind::Solar
    }

    fn epoch(&self) -> DayCount {
        DayCount::new(GREGORIAN_EPOCH)
    }

    fn earliest_valid_date(&self) -> DayCount {
        // 1 January 4713 BC; 1 January is needed for year-level arithmetic
        to_day_count(-4713, 1, 1)
    }

    fn latest_valid_date(&self) -> DayCount {
        to_day_count(MAX_YEAR, 12, 31)
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        12
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        days_in_month(year, month)
    }

    fn days_in_year(&self, year: i32) -> u16 {
        if self.is_leap_year(year) { 366 } else { 365 }
    }

    fn is_leap_year(&self, year: i32) -> bool {
        is_leap_astronomical(to_astronomical(year))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_and_bounds() {
        let rules = Gregorian::default();
        assert_eq!(rules.date_to_day_count(CivilDate::new(1, 1, 1)), rules.epoch());
        assert_eq!(rules.epoch().get(), 1_721_426);
        assert_eq!(rules.earliest_valid_date().get(), 38);
        assert_eq!(rules.latest_valid_date().get(), 5_373_484);
        assert_eq!(rules.earliest_valid_year(), -4713);
        assert_eq!(rules.latest_valid_year(), 9999);
    }

    #[test]
    fn test_known_dates() {
        let rules = Gregorian::default();
        let cases = [
            (CivilDate::new(2000, 1, 1), 2_451_545),
            (CivilDate::new(1970, 1, 1), 2_440_588),
            (CivilDate::new(1582, 10, 15), 2_299_161),
            (CivilDate::new(-1, 12, 31), 1_721_425),
        ];
        for (date, jd) in cases {
            assert_eq!(rules.date_to_day_count(date).get(), jd, "{date}");
            assert_eq!(rules.day_count_to_date(DayCount::new(jd)), date, "JD {jd}");
        }
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i32,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase { year: 2024, is_leap: true, description: "divisible by 4" },
            TestCase { year: 2023, is_leap: false, description: "not divisible by 4" },
            TestCase { year: 1900, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 2000, is_leap: true, description: "divisible by 400" },
            TestCase { year: -1, is_leap: true, description: "1 BC is astronomical year 0" },
            TestCase { year: -5, is_leap: true, description: "5 BC is astronomical year -4" },
            TestCase { year: -4, is_leap: false, description: "4 BC is astronomical year -3" },
            TestCase { year: -101, is_leap: false, description: "astronomical -100" },
        ];

        let rules = Gregorian::default();
        for case in &cases {
            assert_eq!(
                rules.is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
            assert_eq!(rules.days_in_year(case.year), if case.is_leap { 366 } else { 365 });
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 13), 0);
        assert_eq!(days_in_month(2024, u8::MAX), 0);
    }

    #[test]
    fn test_year_zero_is_skipped() {
        let rules = Gregorian::default();
        let last_bc = rules.date_to_day_count(CivilDate::new(-1, 12, 31));
        assert_eq!(rules.day_count_to_date(last_bc + 1), CivilDate::new(1, 1, 1));
    }

    #[test]
    fn test_era_naming() {
        let eras = Gregorian::new(EraNaming::Common).default_eras();
        let names: Vec<&str> = eras.iter().map(|era| era.short_name.as_str()).collect();
        assert_eq!(names, ["BCE", "CE"]);
    }
}

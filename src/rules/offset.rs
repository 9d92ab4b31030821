use super::gregorian;
use super::{CalendarKind, CalendarRules, CalendarSystem, from_astronomical, to_astronomical};
use crate::consts::{DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, MAX_YEAR};
use crate::era::EraRecord;
use crate::{CivilDate, DayCount};

/// Year 1 of the Republic of China is 1912
const MINGUO_YEAR_OFFSET: i64 = 1911;
/// Year 1 of the Buddhist Era is 543 BC (astronomical -542)
const THAI_YEAR_OFFSET: i64 = -543;

const JAPANESE_ERA_FORMAT: &str = "%EN %Ey";

/// A calendar with Gregorian months and leap years but its own year numbering.
///
/// Local year `y` is astronomical Gregorian year `y + year_offset`. Local years
/// start at 1 and stop where the Gregorian range ends (or at 9999).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GregorianOffset {
    system:      CalendarSystem,
    year_offset: i64,
    latest_year: i32,
}

impl GregorianOffset {
    /// Republic of China calendar, years `1..=8088` (1912–9999 CE)
    #[allow(clippy::cast_possible_truncation)]
    pub const fn minguo() -> Self {
        Self {
            system:      CalendarSystem::Minguo,
            year_offset: MINGUO_YEAR_OFFSET,
            latest_year: MAX_YEAR - MINGUO_YEAR_OFFSET as i32,
        }
    }

    /// Thai solar calendar, Buddhist Era years `1..=9999`
    pub const fn thai() -> Self {
        Self {
            system:      CalendarSystem::Thai,
            year_offset: THAI_YEAR_OFFSET,
            latest_year: MAX_YEAR,
        }
    }

    /// Gregorian years named by Japanese imperial eras, years `1..=9999`
    pub const fn japanese() -> Self {
        Self {
            system:      CalendarSystem::Japanese,
            year_offset: 0,
            latest_year: MAX_YEAR,
        }
    }

    /// Astronomical Gregorian year minus local year
    pub const fn year_offset(&self) -> i64 {
        self.year_offset
    }

    const fn gregorian_year(&self, year: i32) -> i32 {
        from_astronomical(year as i64 + self.year_offset)
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn local_year(&self, gregorian_year: i32) -> i32 {
        (to_astronomical(gregorian_year) - self.year_offset) as i32
    }
}

fn japanese_eras() -> Vec<EraRecord> {
    let era = |start: (i32, u8, u8), end: Option<(i32, u8, u8)>, name: &str, short: &str| {
        let record = EraRecord::forward(start.into(), name, short).with_format(JAPANESE_ERA_FORMAT);
        match end {
            Some(end) => record.with_end(end.into()),
            None => record,
        }
    };

    vec![
        EraRecord::forward(CivilDate::new(1, 1, 1), "Anno Domini", "AD")
            .with_end(CivilDate::new(1868, 9, 7)),
        era((1868, 9, 8), Some((1912, 7, 29)), "Meiji", "M"),
        era((1912, 7, 30), Some((1926, 12, 24)), "Taishō", "T"),
        era((1926, 12, 25), Some((1989, 1, 7)), "Shōwa", "S"),
        era((1989, 1, 8), Some((2019, 4, 30)), "Heisei", "H"),
        era((2019, 5, 1), None, "Reiwa", "R"),
    ]
}

impl CalendarRules for GregorianOffset {
    fn system(&self) -> CalendarSystem {
        self.system
    }

    fn kind(&self) -> CalendarKind {
        CalendarKind::Solar
    }

    fn epoch(&self) -> DayCount {
        self.date_to_day_count(CivilDate::new(1, 1, 1))
    }

    fn earliest_valid_date(&self) -> DayCount {
        self.epoch()
    }

    fn latest_valid_date(&self) -> DayCount {
        self.date_to_day_count(CivilDate::new(self.latest_year, 12, 31))
    }

    fn earliest_valid_year(&self) -> i32 {
        1
    }

    fn latest_valid_year(&self) -> i32 {
        self.latest_year
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
        gregorian::is_leap_astronomical(i64::from(year) + self.year_offset)
    }

    fn is_proleptic(&self) -> bool {
        true
    }

    fn default_eras(&self) -> Vec<EraRecord> {
        match self.system {
            CalendarSystem::Minguo => vec![
                EraRecord::forward(CivilDate::new(1, 1, 1), "Republic of China Era", "ROC")
                    .with_format("%EC %Ey"),
            ],
            CalendarSystem::Japanese => japanese_eras(),
            _ => vec![EraRecord::forward(CivilDate::new(1, 1, 1), "Buddhist Era", "BE")],
        }
    }

    fn date_to_day_count(&self, date: CivilDate) -> DayCount {
        gregorian::to_day_count(self.gregorian_year(date.year()), date.month(), date.day())
    }

    fn day_count_to_date(&self, day: DayCount) -> CivilDate {
        let date = gregorian::from_day_count(day);
        CivilDate::new(self.local_year(date.year()), date.month(), date.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Gregorian;

    #[test]
    fn test_minguo() {
        let rules = GregorianOffset::minguo();
        assert_eq!(rules.epoch().get(), 2_419_403);
        assert_eq!(rules.latest_valid_date().get(), 5_373_484);
        assert_eq!(rules.latest_valid_year(), 8088);
        // 1 January 2000 is ROC 89
        let date = CivilDate::new(89, 1, 1);
        assert_eq!(rules.date_to_day_count(date).get(), 2_451_545);
        assert_eq!(rules.day_count_to_date(DayCount::new(2_451_545)), date);
        assert!(rules.is_leap_year(113));
        assert!(!rules.is_leap_year(112));
        assert_eq!(rules.days_in_month(113, 2), 29);
        assert_eq!(rules.days_in_month(113, 13), 0);
    }

    #[test]
    fn test_thai_crosses_gregorian_year_zero() {
        let rules = GregorianOffset::thai();
        assert_eq!(rules.epoch().get(), 1_523_099);
        assert_eq!(rules.latest_valid_date().get(), 5_175_158);
        assert_eq!(rules.day_count_to_date(rules.epoch()), CivilDate::new(1, 1, 1));

        // BE 543 is 1 BC and BE 544 is 1 AD
        let gregorian = Gregorian::default();
        let last_bc = gregorian.date_to_day_count(CivilDate::new(-1, 12, 31));
        assert_eq!(rules.day_count_to_date(last_bc), CivilDate::new(543, 12, 31));
        assert_eq!(rules.day_count_to_date(last_bc + 1), CivilDate::new(544, 1, 1));
        assert!(rules.is_leap_year(543));
        assert_eq!(rules.date_to_day_count(CivilDate::new(2543, 1, 1)).get(), 2_451_545);
    }

    #[test]
    fn test_japanese_matches_gregorian() {
        let rules = GregorianOffset::japanese();
        let gregorian = Gregorian::default();
        assert_eq!(rules.epoch(), gregorian.epoch());
        for jd in [1_721_426, 2_403_584, 2_451_545, 2_458_605] {
            let day = DayCount::new(jd);
            assert_eq!(rules.day_count_to_date(day), gregorian.day_count_to_date(day));
        }
    }

    #[test]
    fn test_default_eras() {
        let minguo = GregorianOffset::minguo().default_eras();
        assert_eq!(minguo[0].short_name, "ROC");
        assert_eq!(minguo[0].format, "%EC %Ey");

        let japanese = GregorianOffset::japanese().default_eras();
        let names: Vec<&str> = japanese.iter().map(|era| era.short_name.as_str()).collect();
        assert_eq!(names, ["AD", "M", "T", "S", "H", "R"]);
        assert_eq!(japanese[1].start, CivilDate::new(1868, 9, 8));
    }
}

//! Per-calendar conversion rules.
//!
//! Every calendar system implements [`CalendarRules`], a capability interface
//! with two conversion primitives ([`CalendarRules::date_to_day_count`] and
//! [`CalendarRules::day_count_to_date`]) plus the metadata the engine needs to
//! validate dates and do arithmetic. Rules assume pre-validated input; range and
//! structure checks happen in [`CalendarEngine`](crate::CalendarEngine).

mod coptic;
mod ethiopian;
mod gregorian;
mod hebrew;
mod hijri;
mod indian;
mod jalali;
mod julian;
mod offset;

pub use coptic::Coptic;
pub use ethiopian::Ethiopian;
pub use gregorian::Gregorian;
pub use hebrew::{Hebrew, HebrewYearType};
pub use hijri::Hijri;
pub use indian::IndianNational;
pub use jalali::Jalali;
pub use julian::Julian;
pub use offset::GregorianOffset;

use crate::era::EraRecord;
use crate::prelude::*;
use crate::{CalendarError, CivilDate, DayCount, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Conversion primitives and metadata of one calendar system.
///
/// Implementations are immutable after construction and must be safe to share
/// across threads. Methods taking a year, month or day assume the year lies
/// within the calendar's valid range and the month and day are structurally
/// valid for it; other input gives unspecified results.
/// [`CalendarEngine`](crate::CalendarEngine) validates before calling in.
pub trait CalendarRules: fmt::Debug + Send + Sync {
    /// Which calendar system these rules implement
    fn system(&self) -> CalendarSystem;

    fn kind(&self) -> CalendarKind;

    /// Day count of the first day of year 1
    fn epoch(&self) -> DayCount;

    fn earliest_valid_date(&self) -> DayCount;

    fn latest_valid_date(&self) -> DayCount;

    fn earliest_valid_year(&self) -> i32 {
        self.day_count_to_date(self.earliest_valid_date()).year()
    }

    fn latest_valid_year(&self) -> i32 {
        self.day_count_to_date(self.latest_valid_date()).year()
    }

    fn months_in_year(&self, year: i32) -> u8;

    fn days_in_month(&self, year: i32, month: u8) -> u8;

    fn days_in_year(&self, year: i32) -> u16 {
        (1..=self.months_in_year(year))
            .map(|month| u16::from(self.days_in_month(year, month)))
            .sum()
    }

    fn is_leap_year(&self, year: i32) -> bool;

    /// Whether some years insert a whole extra month
    fn has_leap_months(&self) -> bool {
        false
    }

    fn has_year_zero(&self) -> bool {
        false
    }

    /// Whether the rules are extended backwards before the calendar's adoption
    fn is_proleptic(&self) -> bool {
        false
    }

    /// The customary day of weekly worship
    fn week_day_of_pray(&self) -> Weekday {
        Weekday::Sunday
    }

    /// Maps a sequential month number to a year-independent month identity.
    ///
    /// Identity for calendars whose months never move; calendars that insert a
    /// leap month mid-year override it.
    fn month_number_to_month_index(&self, _year: i32, month: u8) -> u8 {
        month
    }

    /// Inverse of [`Self::month_number_to_month_index`] for the given year
    fn month_index_to_month_number(&self, _year: i32, index: u8) -> u8 {
        index
    }

    /// The hardcoded era list used when no era records are configured
    fn default_eras(&self) -> Vec<EraRecord>;

    fn date_to_day_count(&self, date: CivilDate) -> DayCount;

    fn day_count_to_date(&self, day: DayCount) -> CivilDate;
}

impl<R: CalendarRules + ?Sized> CalendarRules for Box<R> {
    fn system(&self) -> CalendarSystem {
        (**self).system()
    }

    fn kind(&self) -> CalendarKind {
        (**self).kind()
    }

    fn epoch(&self) -> DayCount {
        (**self).epoch()
    }

    fn earliest_valid_date(&self) -> DayCount {
        (**self).earliest_valid_date()
    }

    fn latest_valid_date(&self) -> DayCount {
        (**self).latest_valid_date()
    }

    fn earliest_valid_year(&self) -> i32 {
        (**self).earliest_valid_year()
    }

    fn latest_valid_year(&self) -> i32 {
        (**self).latest_valid_year()
    }

    fn months_in_year(&self, year: i32) -> u8 {
        (**self).months_in_year(year)
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        (**self).days_in_month(year, month)
    }

    fn days_in_year(&self, year: i32) -> u16 {
        (**self).days_in_year(year)
    }

    fn is_leap_year(&self, year: i32) -> bool {
        (**self).is_leap_year(year)
    }

    fn has_leap_months(&self) -> bool {
        (**self).has_leap_months()
    }

    fn has_year_zero(&self) -> bool {
        (**self).has_year_zero()
    }

    fn is_proleptic(&self) -> bool {
        (**self).is_proleptic()
    }

    fn week_day_of_pray(&self) -> Weekday {
        (**self).week_day_of_pray()
    }

    fn month_number_to_month_index(&self, year: i32, month: u8) -> u8 {
        (**self).month_number_to_month_index(year, month)
    }

    fn month_index_to_month_number(&self, year: i32, index: u8) -> u8 {
        (**self).month_index_to_month_number(year, index)
    }

    fn default_eras(&self) -> Vec<EraRecord> {
        (**self).default_eras()
    }

    fn date_to_day_count(&self, date: CivilDate) -> DayCount {
        (**self).date_to_day_count(date)
    }

    fn day_count_to_date(&self, day: DayCount) -> CivilDate {
        (**self).day_count_to_date(day)
    }
}

/// Astronomical basis of a calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CalendarKind {
    Solar,
    Lunar,
    Lunisolar,
}

/// How Gregorian-style calendars name their two eras
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EraNaming {
    /// Before Christ / Anno Domini
    #[default]
    #[display(fmt = "BC/AD")]
    Christian,
    /// Before Common Era / Common Era
    #[display(fmt = "BCE/CE")]
    Common,
}

/// Selector for one of the supported calendar systems.
///
/// Parsed from and displayed as the calendar's string key, e.g. `"hebrew"` or
/// `"indian-national"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CalendarSystem {
    #[default]
    #[display(fmt = "gregorian")]
    Gregorian,
    #[display(fmt = "julian")]
    Julian,
    #[display(fmt = "coptic")]
    Coptic,
    #[display(fmt = "ethiopian")]
    Ethiopian,
    #[display(fmt = "hebrew")]
    Hebrew,
    #[display(fmt = "hijri")]
    Hijri,
    #[display(fmt = "indian-national")]
    IndianNational,
    #[display(fmt = "jalali")]
    Jalali,
    #[display(fmt = "minguo")]
    Minguo,
    #[display(fmt = "thai")]
    Thai,
    #[display(fmt = "japanese")]
    Japanese,
}

impl CalendarSystem {
    /// Every supported calendar system
    pub const ALL: [Self; 11] = [
        Self::Gregorian,
        Self::Julian,
        Self::Coptic,
        Self::Ethiopian,
        Self::Hebrew,
        Self::Hijri,
        Self::IndianNational,
        Self::Jalali,
        Self::Minguo,
        Self::Thai,
        Self::Japanese,
    ];

    /// Instantiates the rules of this calendar system
    pub fn rules(self, era_naming: EraNaming) -> Box<dyn CalendarRules> {
        match self {
            Self::Gregorian => Box::new(Gregorian::new(era_naming)),
            Self::Julian => Box::new(Julian::new(era_naming)),
            Self::Coptic => Box::new(Coptic::new()),
            Self::Ethiopian => Box::new(Ethiopian::new()),
            Self::Hebrew => Box::new(Hebrew::new()),
            Self::Hijri => Box::new(Hijri::new()),
            Self::IndianNational => Box::new(IndianNational::new()),
            Self::Jalali => Box::new(Jalali::new()),
            Self::Minguo => Box::new(GregorianOffset::minguo()),
            Self::Thai => Box::new(GregorianOffset::thai()),
            Self::Japanese => Box::new(GregorianOffset::japanese()),
        }
    }
}

impl FromStr for CalendarSystem {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gregorian" | "gregorian-proleptic" => Ok(Self::Gregorian),
            "julian" => Ok(Self::Julian),
            "coptic" => Ok(Self::Coptic),
            "ethiopian" | "ethiopic" => Ok(Self::Ethiopian),
            "hebrew" => Ok(Self::Hebrew),
            "hijri" | "islamic-civil" => Ok(Self::Hijri),
            "indian-national" => Ok(Self::IndianNational),
            "jalali" | "persian" => Ok(Self::Jalali),
            "minguo" | "taiwanese" => Ok(Self::Minguo),
            "thai" | "buddhist" => Ok(Self::Thai),
            "japanese" => Ok(Self::Japanese),
            _ => Err(CalendarError::UnknownCalendar(s.to_owned())),
        }
    }
}

impl TryFrom<String> for CalendarSystem {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarSystem> for String {
    fn from(system: CalendarSystem) -> Self {
        system.to_string()
    }
}

// Helpers for calendars that number years ..., -2, -1, 1, 2, ...

/// Maps a public year number to an astronomical one (1 BC = 0, 2 BC = -1)
pub(crate) const fn to_astronomical(year: i32) -> i64 {
    if year < 0 { year as i64 + 1 } else { year as i64 }
}

/// Inverse of [`to_astronomical`]
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn from_astronomical(year: i64) -> i32 {
    if year <= 0 { (year - 1) as i32 } else { year as i32 }
}

/// Adds `years` to `year`, stepping over year 0 when the calendar lacks one
pub(crate) fn offset_year(year: i32, years: i64, has_year_zero: bool) -> Option<i32> {
    if has_year_zero {
        return i32::try_from(i64::from(year) + years).ok();
    }
    let shifted = to_astronomical(year).checked_add(years)?;
    let public = if shifted <= 0 { shifted - 1 } else { shifted };
    i32::try_from(public).ok()
}

/// Number of year steps from `from` to `to`, not counting a missing year 0
pub(crate) const fn year_steps(from: i32, to: i32, has_year_zero: bool) -> i64 {
    if has_year_zero {
        to as i64 - from as i64
    } else {
        to_astronomical(to) - to_astronomical(from)
    }
}

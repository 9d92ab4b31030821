//! Day-count conversions and date arithmetic for eleven calendar systems.
//!
//! Every calendar converts between a [`CivilDate`] and a [`DayCount`], the
//! Julian Day Number shared by all systems. Converting a date between two
//! calendars goes through its day count:
//!
//! ```
//! use calendar_systems::{calendar, CivilDate};
//!
//! let hebrew = calendar("hebrew")?;
//! let gregorian = calendar("gregorian")?;
//! let rosh_hashanah = hebrew.date_to_day_count(CivilDate::new(5785, 1, 1))?;
//! assert_eq!(gregorian.day_count_to_date(rosh_hashanah)?, CivilDate::new(2024, 10, 3));
//! # Ok::<(), calendar_systems::CalendarError>(())
//! ```
//!
//! [`CalendarRules`] implementations hold the per-calendar arithmetic and
//! assume valid input; [`CalendarEngine`] validates at its boundary and adds
//! arithmetic, differences, week numbers and eras on top of any rules.

mod arithmetic;
mod config;
mod consts;
mod engine;
mod era;
mod prelude;
mod rules;
mod types;
mod week;

pub use arithmetic::{DateDifference, Direction};
pub use config::CalendarConfig;
pub use consts::*;
pub use engine::CalendarEngine;
pub use era::{DEFAULT_ERA_FORMAT, Era, EraDirection, EraRecord, EraTable};
pub use rules::{
    CalendarKind, CalendarRules, CalendarSystem, Coptic, EraNaming, Ethiopian, Gregorian, GregorianOffset,
    Hebrew, HebrewYearType, Hijri, IndianNational, Jalali, Julian,
};
pub use types::{CivilDate, DayCount, Weekday};
pub use week::{FirstWeek, WeekNumber, WeekNumberScheme};

use thiserror::Error;

/// An engine over dynamically selected rules, as built from a [`CalendarSystem`]
pub type Calendar = CalendarEngine<Box<dyn CalendarRules>>;

/// Errors returned by calendar operations.
///
/// Invalid input is an expected condition, so every variant carries enough
/// context to report the problem without panicking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The month or day does not exist in the given year
    #[error("invalid {system} date {year}-{month:02}-{day:02}")]
    InvalidDate {
        system: CalendarSystem,
        year:   i32,
        month:  u8,
        day:    u8,
    },

    #[error("invalid {system} month {month} in year {year}")]
    InvalidMonth {
        system: CalendarSystem,
        year:   i32,
        month:  u8,
    },

    #[error("invalid {system} day of year {day_of_year} in year {year}")]
    InvalidDayOfYear {
        system:      CalendarSystem,
        year:        i32,
        day_of_year: u16,
    },

    /// The year lies outside the calendar's supported range
    #[error("{system} year {year} is outside the supported range {earliest}..={latest}")]
    OutOfRange {
        system:   CalendarSystem,
        year:     i32,
        earliest: i32,
        latest:   i32,
    },

    #[error("day count {day_count} is outside the {system} calendar's range")]
    DayCountOutOfRange {
        system:    CalendarSystem,
        day_count: DayCount,
    },

    #[error("invalid {system} ISO week date {year}-W{week:02}-{day}")]
    InvalidWeekDate {
        system: CalendarSystem,
        year:   i32,
        week:   u8,
        day:    u8,
    },

    #[error("unknown calendar system: {0}")]
    UnknownCalendar(String),

    #[error("unknown era: {0}")]
    UnknownEra(String),

    #[error("invalid era definition: {0}")]
    InvalidEra(String),

    #[error("day count {day_count} is not in any {system} era")]
    NoEra {
        system:    CalendarSystem,
        day_count: DayCount,
    },

    #[error("invalid date format: {0}")]
    InvalidFormat(String),
}

/// Builds the calendar for a string key such as `"gregorian"`, `"hebrew"` or
/// `"indian-national"`, with default configuration.
///
/// # Errors
/// Returns `CalendarError::UnknownCalendar` for an unrecognised key.
pub fn calendar(key: &str) -> Result<Calendar, CalendarError> {
    CalendarConfig::new(key.parse()?).build()
}

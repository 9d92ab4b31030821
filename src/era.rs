//! Named eras and the era table of a calendar.
//!
//! An era maps raw calendar years to era-relative years ("5 BC", "Heisei 31").
//! Eras are supplied as [`EraRecord`]s, either the hardcoded defaults of each
//! [`CalendarRules`] or records deserialized by the caller, and resolved once
//! into an [`EraTable`] that is read-only afterwards.

use crate::rules::{CalendarRules, offset_year, year_steps};
use crate::{CalendarError, CivilDate, DayCount};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Display format used when a record does not name one: year then short name
pub const DEFAULT_ERA_FORMAT: &str = "%Ey %EC";

/// Placeholder for the year within the era
const YEAR_IN_ERA_TOKEN: &str = "%Ey";
/// Placeholder for the era's short name
const SHORT_NAME_TOKEN: &str = "%EC";
/// Placeholder for the era's long name
const LONG_NAME_TOKEN: &str = "%EN";

fn default_era_format() -> String {
    DEFAULT_ERA_FORMAT.to_owned()
}

/// Whether era years count up or down from the era's start date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EraDirection {
    #[serde(rename = "+", alias = "forward")]
    Forward,
    #[serde(rename = "-", alias = "backward")]
    Backward,
}

impl EraDirection {
    pub const fn sign(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// An era definition as supplied by configuration.
///
/// `start` is the date on which the era year equals `offset`; its year is the
/// era's start year. A missing `end` leaves the era open towards the latest
/// valid date (forward eras) or the earliest valid date (backward eras).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EraRecord {
    pub direction:  EraDirection,
    pub offset:     i32,
    pub start:      CivilDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end:        Option<CivilDate>,
    pub long_name:  String,
    pub short_name: String,
    #[serde(default = "default_era_format")]
    pub format:     String,
}

impl EraRecord {
    /// An open-ended era counting up from `start`, which is year 1 of the era
    pub fn forward(start: CivilDate, long_name: &str, short_name: &str) -> Self {
        Self {
            direction:  EraDirection::Forward,
            offset:     1,
            start,
            end:        None,
            long_name:  long_name.to_owned(),
            short_name: short_name.to_owned(),
            format:     default_era_format(),
        }
    }

    /// An open-ended era counting down from `start`, which is year 1 of the era
    pub fn backward(start: CivilDate, long_name: &str, short_name: &str) -> Self {
        Self {
            direction: EraDirection::Backward,
            ..Self::forward(start, long_name, short_name)
        }
    }

    #[must_use]
    pub const fn with_end(mut self, end: CivilDate) -> Self {
        self.end = Some(end);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        format.clone_into(&mut self.format);
        self
    }
}

/// An era resolved against one calendar's rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Era {
    sequence:      usize,
    direction:     EraDirection,
    offset:        i32,
    start:         DayCount,
    start_year:    i32,
    end:           DayCount,
    long_name:     String,
    short_name:    String,
    format:        String,
    has_year_zero: bool,
}

impl Era {
    /// Position of the era in its table
    pub const fn sequence(&self) -> usize {
        self.sequence
    }

    pub const fn direction(&self) -> EraDirection {
        self.direction
    }

    pub const fn offset(&self) -> i32 {
        self.offset
    }

    pub const fn start(&self) -> DayCount {
        self.start
    }

    pub const fn start_year(&self) -> i32 {
        self.start_year
    }

    pub const fn end(&self) -> DayCount {
        self.end
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Earliest and latest day covered, whatever the direction
    pub fn span(&self) -> (DayCount, DayCount) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    pub fn contains(&self, day: DayCount) -> bool {
        let (first, last) = self.span();
        first <= day && day <= last
    }

    /// Era-relative number of a calendar year
    #[allow(clippy::cast_possible_truncation)]
    pub fn year_in_era(&self, year: i32) -> i32 {
        let steps = year_steps(self.start_year, year, self.has_year_zero);
        (steps * self.direction.sign() + i64::from(self.offset)) as i32
    }

    /// Calendar year of an era-relative year number
    pub fn year_from_era(&self, year_in_era: i32) -> Option<i32> {
        let steps = (i64::from(year_in_era) - i64::from(self.offset)) * self.direction.sign();
        offset_year(self.start_year, steps, self.has_year_zero)
    }

    /// Renders a calendar year through the era's display format.
    ///
    /// Supports `%Ey` (year in era), `%EC` (short name) and `%EN` (long name).
    pub fn format_year(&self, year: i32) -> String {
        self.format
            .replace(YEAR_IN_ERA_TOKEN, &self.year_in_era(year).to_string())
            .replace(SHORT_NAME_TOKEN, &self.short_name)
            .replace(LONG_NAME_TOKEN, &self.long_name)
    }

    fn overlaps(&self, other: &Self) -> bool {
        let (a_first, a_last) = self.span();
        let (b_first, b_last) = other.span();
        a_first <= b_last && b_first <= a_last
    }
}

/// The ordered, non-overlapping eras of one calendar
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EraTable {
    eras: Vec<Era>,
}

impl EraTable {
    /// Resolves era records against `rules`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidEra` if a record has an empty name, a
    /// start or end date that is not a date of this calendar, an end on the
    /// wrong side of its start, or a span overlapping an earlier record.
    pub fn from_records<R>(rules: &R, records: &[EraRecord]) -> Result<Self, CalendarError>
    where
        R: CalendarRules + ?Sized,
    {
        let mut eras: Vec<Era> = Vec::with_capacity(records.len());

        for (sequence, record) in records.iter().enumerate() {
            if record.long_name.trim().is_empty() || record.short_name.trim().is_empty() {
                return Err(CalendarError::InvalidEra(format!("era #{sequence} has no name")));
            }
            let start = resolve_era_date(rules, record.start, &record.short_name)?;
            let end = match (record.end, record.direction) {
                (Some(end), _) => resolve_era_date(rules, end, &record.short_name)?,
                (None, EraDirection::Forward) => rules.latest_valid_date(),
                (None, EraDirection::Backward) => rules.earliest_valid_date(),
            };
            let ordered = match record.direction {
                EraDirection::Forward => start <= end,
                EraDirection::Backward => end <= start,
            };
            if !ordered {
                return Err(CalendarError::InvalidEra(format!(
                    "era {} ends on the wrong side of its start",
                    record.short_name
                )));
            }

            let era = Era {
                sequence,
                direction: record.direction,
                offset: record.offset,
                start,
                start_year: record.start.year(),
                end,
                long_name: record.long_name.clone(),
                short_name: record.short_name.clone(),
                format: record.format.clone(),
                has_year_zero: rules.has_year_zero(),
            };
            if let Some(other) = eras.iter().find(|other| other.overlaps(&era)) {
                return Err(CalendarError::InvalidEra(format!(
                    "era {} overlaps era {}",
                    era.short_name, other.short_name
                )));
            }
            eras.push(era);
        }

        debug!(system = %rules.system(), eras = eras.len(), "resolved era table");
        Ok(Self { eras })
    }

    pub fn len(&self) -> usize {
        self.eras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eras.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Era> {
        self.eras.iter()
    }

    /// The era containing `day`, most recently added eras first
    pub fn era_for(&self, day: DayCount) -> Option<&Era> {
        self.eras.iter().rev().find(|era| era.contains(day))
    }

    /// Looks up an era by long or short name, ignoring ASCII case
    pub fn by_name(&self, name: &str) -> Option<&Era> {
        let name = name.trim();
        self.eras.iter().rev().find(|era| {
            era.short_name.eq_ignore_ascii_case(name) || era.long_name.eq_ignore_ascii_case(name)
        })
    }
}

fn resolve_era_date<R>(rules: &R, date: CivilDate, era: &str) -> Result<DayCount, CalendarError>
where
    R: CalendarRules + ?Sized,
{
    let (year, month, day) = date.to_tuple();
    let structurally_valid = (year != 0 || rules.has_year_zero())
        && (1..=rules.months_in_year(year)).contains(&month)
        && (1..=rules.days_in_month(year, month)).contains(&day);
    if !structurally_valid {
        return Err(CalendarError::InvalidEra(format!("era {era} has invalid date {date}")));
    }
    Ok(rules.date_to_day_count(date))
}

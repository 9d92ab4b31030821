//! Validation and calendar-independent queries over any [`CalendarRules`].

use crate::consts::{DAYS_IN_WEEK, REFERENCE_DAY_2000, SHORT_YEAR_WINDOW_SPAN};
use crate::era::{Era, EraRecord, EraTable};
use crate::rules::{CalendarKind, CalendarRules, CalendarSystem, offset_year};
use crate::{CalendarError, CivilDate, DayCount, Weekday};
use tracing::{debug, trace};

/// Two-digit years expand into the century-long window starting here
const SHORT_YEAR_MAX: i32 = 99;

/// A calendar system ready for use: its rules plus a resolved era table.
///
/// Every public operation validates its input against the rules before
/// touching the conversion arithmetic, so invalid dates come back as
/// [`CalendarError`] values rather than wrong day counts. The engine is
/// immutable after construction and can be shared between threads.
#[derive(Debug, Clone)]
pub struct CalendarEngine<R = Box<dyn CalendarRules>> {
    rules:                   R,
    system:                  CalendarSystem,
    earliest:                DayCount,
    latest:                  DayCount,
    earliest_year:           i32,
    latest_year:             i32,
    eras:                    EraTable,
    short_year_window_start: i32,
}

impl<R: CalendarRules> CalendarEngine<R> {
    /// Wraps `rules` using their default era list.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidEra` if the default eras do not resolve,
    /// which indicates a bug in the rules.
    pub fn new(rules: R) -> Result<Self, CalendarError> {
        let eras = rules.default_eras();
        Self::with_eras(rules, &eras)
    }

    /// Wraps `rules` with caller-supplied era records.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidEra` if a record is malformed or overlaps
    /// another.
    pub fn with_eras(rules: R, records: &[EraRecord]) -> Result<Self, CalendarError> {
        let eras = EraTable::from_records(&rules, records)?;
        let earliest = rules.earliest_valid_date();
        let latest = rules.latest_valid_date();

        let reference = DayCount::new(REFERENCE_DAY_2000).clamp(earliest, latest);
        let reference_year = rules.day_count_to_date(reference).year();
        let short_year_window_start =
            offset_year(reference_year, -i64::from(SHORT_YEAR_WINDOW_SPAN), rules.has_year_zero())
                .unwrap_or(reference_year);

        debug!(
            system = %rules.system(),
            earliest = %earliest,
            latest = %latest,
            eras = eras.len(),
            "built calendar engine"
        );

        Ok(Self {
            system: rules.system(),
            earliest_year: rules.earliest_valid_year(),
            latest_year: rules.latest_valid_year(),
            rules,
            earliest,
            latest,
            eras,
            short_year_window_start,
        })
    }

    /// Sets the first year of the window two-digit years expand into
    #[must_use]
    pub const fn with_short_year_window_start(mut self, start: i32) -> Self {
        self.short_year_window_start = start;
        self
    }

    pub const fn rules(&self) -> &R {
        &self.rules
    }

    pub const fn eras(&self) -> &EraTable {
        &self.eras
    }

    pub const fn short_year_window_start(&self) -> i32 {
        self.short_year_window_start
    }

    // Validation

    pub(crate) fn check_year(&self, year: i32) -> Result<(), CalendarError> {
        let missing_zero = year == 0 && !self.rules.has_year_zero();
        if missing_zero || !(self.earliest_year..=self.latest_year).contains(&year) {
            trace!(system = %self.system(), year, "rejected year");
            return Err(self.out_of_range(year));
        }
        Ok(())
    }

    pub(crate) fn check_month(&self, year: i32, month: u8) -> Result<(), CalendarError> {
        self.check_year(year)?;
        if month == 0 || month > self.rules.months_in_year(year) {
            trace!(system = %self.system(), year, month, "rejected month");
            return Err(CalendarError::InvalidMonth { system: self.system(), year, month });
        }
        Ok(())
    }

    /// Validates `date` and returns its day count
    pub(crate) fn check(&self, date: CivilDate) -> Result<DayCount, CalendarError> {
        let (year, month, day) = date.to_tuple();
        self.check_year(year)?;

        let structurally_valid = (1..=self.rules.months_in_year(year)).contains(&month)
            && (1..=self.rules.days_in_month(year, month)).contains(&day);
        if !structurally_valid {
            trace!(system = %self.system(), %date, "rejected date");
            return Err(CalendarError::InvalidDate { system: self.system(), year, month, day });
        }

        let count = self.rules.date_to_day_count(date);
        if !self.contains(count) {
            trace!(system = %self.system(), %date, "date outside valid range");
            return Err(self.out_of_range(year));
        }
        Ok(count)
    }

    pub(crate) fn check_day_count(&self, day: DayCount) -> Result<(), CalendarError> {
        if !self.contains(day) {
            trace!(system = %self.system(), %day, "rejected day count");
            return Err(CalendarError::DayCountOutOfRange { system: self.system(), day_count: day });
        }
        Ok(())
    }

    pub(crate) fn contains(&self, day: DayCount) -> bool {
        self.earliest <= day && day <= self.latest
    }

    pub(crate) const fn out_of_range(&self, year: i32) -> CalendarError {
        CalendarError::OutOfRange {
            system:   self.system,
            year,
            earliest: self.earliest_year,
            latest:   self.latest_year,
        }
    }

    /// Whether `(year, month, day)` is a date of this calendar within its range
    pub fn is_valid(&self, year: i32, month: u8, day: u8) -> bool {
        self.check(CivilDate::new(year, month, day)).is_ok()
    }

    /// Builds a validated date.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for a year outside the calendar's
    /// range and `CalendarError::InvalidDate` for a month or day that does not
    /// exist in that year.
    pub fn date(&self, year: i32, month: u8, day: u8) -> Result<CivilDate, CalendarError> {
        let date = CivilDate::new(year, month, day);
        self.check(date)?;
        Ok(date)
    }

    /// Converts a date to its day count.
    ///
    /// # Errors
    /// Same as [`Self::date`].
    pub fn date_to_day_count(&self, date: CivilDate) -> Result<DayCount, CalendarError> {
        self.check(date)
    }

    /// Converts a day count to a date of this calendar.
    ///
    /// # Errors
    /// Returns `CalendarError::DayCountOutOfRange` outside
    /// [`Self::earliest_valid_date`]`..=`[`Self::latest_valid_date`].
    pub fn day_count_to_date(&self, day: DayCount) -> Result<CivilDate, CalendarError> {
        self.check_day_count(day)?;
        Ok(self.rules.day_count_to_date(day))
    }

    // Metadata

    pub const fn system(&self) -> CalendarSystem {
        self.system
    }

    pub fn kind(&self) -> CalendarKind {
        self.rules.kind()
    }

    pub fn epoch(&self) -> DayCount {
        self.rules.epoch()
    }

    pub const fn earliest_valid_date(&self) -> DayCount {
        self.earliest
    }

    pub const fn latest_valid_date(&self) -> DayCount {
        self.latest
    }

    pub const fn earliest_valid_year(&self) -> i32 {
        self.earliest_year
    }

    pub const fn latest_valid_year(&self) -> i32 {
        self.latest_year
    }

    pub fn has_leap_months(&self) -> bool {
        self.rules.has_leap_months()
    }

    pub fn has_year_zero(&self) -> bool {
        self.rules.has_year_zero()
    }

    pub fn is_proleptic(&self) -> bool {
        self.rules.is_proleptic()
    }

    pub fn week_day_of_pray(&self) -> Weekday {
        self.rules.week_day_of_pray()
    }

    pub const fn days_in_week(&self) -> u8 {
        DAYS_IN_WEEK
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` for a year outside the calendar's range.
    pub fn months_in_year(&self, year: i32) -> Result<u8, CalendarError> {
        self.check_year(year)?;
        Ok(self.rules.months_in_year(year))
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` or `CalendarError::InvalidMonth`.
    pub fn days_in_month(&self, year: i32, month: u8) -> Result<u8, CalendarError> {
        self.check_month(year, month)?;
        Ok(self.rules.days_in_month(year, month))
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` for a year outside the calendar's range.
    pub fn days_in_year(&self, year: i32) -> Result<u16, CalendarError> {
        self.check_year(year)?;
        Ok(self.rules.days_in_year(year))
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` for a year outside the calendar's range.
    pub fn is_leap_year(&self, year: i32) -> Result<bool, CalendarError> {
        self.check_year(year)?;
        Ok(self.rules.is_leap_year(year))
    }

    // Day and month positions

    /// 1-based position of `date` within its year.
    ///
    /// # Errors
    /// Same as [`Self::date`].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn day_of_year(&self, date: CivilDate) -> Result<u16, CalendarError> {
        let count = self.check(date)?;
        let first = self.rules.date_to_day_count(CivilDate::new(date.year(), 1, 1));
        Ok((count - first + 1) as u16)
    }

    /// # Errors
    /// Same as [`Self::date`].
    pub fn day_of_week(&self, date: CivilDate) -> Result<Weekday, CalendarError> {
        Ok(self.check(date)?.day_of_week())
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` for a year outside the calendar's range.
    pub fn first_day_of_year(&self, year: i32) -> Result<CivilDate, CalendarError> {
        self.date(year, 1, 1)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` for a year outside the calendar's range.
    pub fn last_day_of_year(&self, year: i32) -> Result<CivilDate, CalendarError> {
        self.check_year(year)?;
        let month = self.rules.months_in_year(year);
        self.date(year, month, self.rules.days_in_month(year, month))
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` or `CalendarError::InvalidMonth`.
    pub fn first_day_of_month(&self, year: i32, month: u8) -> Result<CivilDate, CalendarError> {
        self.check_month(year, month)?;
        self.date(year, month, 1)
    }

    /// # Errors
    /// Returns `CalendarError::OutOfRange` or `CalendarError::InvalidMonth`.
    pub fn last_day_of_month(&self, year: i32, month: u8) -> Result<CivilDate, CalendarError> {
        self.check_month(year, month)?;
        self.date(year, month, self.rules.days_in_month(year, month))
    }

    /// The date at 1-based `day_of_year` within `year`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for a year outside the calendar's
    /// range and `CalendarError::InvalidDayOfYear` past the end of the year.
    pub fn date_from_day_of_year(&self, year: i32, day_of_year: u16) -> Result<CivilDate, CalendarError> {
        self.check_year(year)?;
        if day_of_year == 0 || day_of_year > self.rules.days_in_year(year) {
            trace!(system = %self.system(), year, day_of_year, "rejected day of year");
            return Err(CalendarError::InvalidDayOfYear { system: self.system(), year, day_of_year });
        }
        let first = self.rules.date_to_day_count(CivilDate::new(year, 1, 1));
        self.day_count_to_date(first + i64::from(day_of_year) - 1)
    }

    // Eras

    /// The era containing `date`.
    ///
    /// # Errors
    /// Returns the validation errors of [`Self::date`], or
    /// `CalendarError::NoEra` if no era covers the date.
    pub fn era(&self, date: CivilDate) -> Result<&Era, CalendarError> {
        let count = self.check(date)?;
        self.eras
            .era_for(count)
            .ok_or(CalendarError::NoEra { system: self.system(), day_count: count })
    }

    /// Era-relative year of `date`, e.g. 44 for 44 BC.
    ///
    /// # Errors
    /// Same as [`Self::era`].
    pub fn year_in_era(&self, date: CivilDate) -> Result<i32, CalendarError> {
        Ok(self.era(date)?.year_in_era(date.year()))
    }

    /// Resolves a year within a named era to a calendar year.
    ///
    /// # Errors
    /// Returns `CalendarError::UnknownEra` if no era has that long or short
    /// name, and `CalendarError::OutOfRange` if the year falls outside the
    /// era or the calendar's range.
    pub fn year_from_era(&self, era_name: &str, year_in_era: i32) -> Result<i32, CalendarError> {
        let era = self
            .eras
            .by_name(era_name)
            .ok_or_else(|| CalendarError::UnknownEra(era_name.to_owned()))?;

        let (first, last) = era.span();
        let first_year = self.rules.day_count_to_date(first.max(self.earliest)).year();
        let last_year = self.rules.day_count_to_date(last.min(self.latest)).year();
        let out_of_era = CalendarError::OutOfRange {
            system:   self.system(),
            year:     year_in_era,
            earliest: era.year_in_era(first_year).min(era.year_in_era(last_year)),
            latest:   era.year_in_era(first_year).max(era.year_in_era(last_year)),
        };

        let year = era.year_from_era(year_in_era).ok_or_else(|| out_of_era.clone())?;
        if !(first_year..=last_year).contains(&year) {
            trace!(system = %self.system(), era = era.short_name(), year_in_era, "year outside era");
            return Err(out_of_era);
        }
        self.check_year(year)?;
        Ok(year)
    }

    /// Renders the year of `date` through its era's format, e.g. `"Heisei 31"`.
    ///
    /// # Errors
    /// Same as [`Self::era`].
    pub fn format_era_year(&self, date: CivilDate) -> Result<String, CalendarError> {
        Ok(self.era(date)?.format_year(date.year()))
    }

    /// Expands a two-digit year into the hundred-year window starting at
    /// [`Self::short_year_window_start`]. Other years are returned unchanged.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result is not a valid year.
    pub fn apply_short_year_window(&self, year: i32) -> Result<i32, CalendarError> {
        if !(0..=SHORT_YEAR_MAX).contains(&year) {
            return Ok(year);
        }
        let start = i64::from(self.short_year_window_start);
        let century = i64::from(SHORT_YEAR_MAX) + 1;
        let mut expanded = start - start.rem_euclid(century) + i64::from(year);
        if expanded < start {
            expanded += century;
        }
        let expanded = i32::try_from(expanded).map_err(|_| self.out_of_range(year))?;
        self.check_year(expanded)?;
        Ok(expanded)
    }
}

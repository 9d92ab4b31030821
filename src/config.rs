use crate::era::EraRecord;
use crate::rules::{CalendarSystem, EraNaming};
use crate::{Calendar, CalendarEngine, CalendarError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything needed to build a [`Calendar`].
///
/// Missing fields take their defaults when deserialized: Gregorian with
/// BC/AD naming, the calendar's built-in eras and the default two-digit year
/// window.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    pub system:                  CalendarSystem,
    pub era_naming:              EraNaming,
    /// Replaces the calendar's built-in eras when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eras:                    Option<Vec<EraRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_year_window_start: Option<i32>,
}

impl CalendarConfig {
    pub fn new(system: CalendarSystem) -> Self {
        Self { system, ..Self::default() }
    }

    #[must_use]
    pub const fn with_era_naming(mut self, era_naming: EraNaming) -> Self {
        self.era_naming = era_naming;
        self
    }

    #[must_use]
    pub fn with_eras(mut self, eras: Vec<EraRecord>) -> Self {
        self.eras = Some(eras);
        self
    }

    #[must_use]
    pub const fn with_short_year_window_start(mut self, start: i32) -> Self {
        self.short_year_window_start = Some(start);
        self
    }

    /// Instantiates the configured calendar.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidEra` if a configured era record is
    /// malformed or overlaps another.
    pub fn build(&self) -> Result<Calendar, CalendarError> {
        debug!(
            system = %self.system,
            era_naming = %self.era_naming,
            custom_eras = self.eras.is_some(),
            "building calendar"
        );

        let rules = self.system.rules(self.era_naming);
        let engine = match &self.eras {
            Some(records) => CalendarEngine::with_eras(rules, records)?,
            None => CalendarEngine::new(rules)?,
        };
        Ok(match self.short_year_window_start {
            Some(start) => engine.with_short_year_window_start(start),
            None => engine,
        })
    }
}

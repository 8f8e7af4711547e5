// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time periods and the set that owns them

use crate::daterange::DateRange;
use crate::error::ConfigError;
use crate::timerange::TimeRange;
use std::collections::{BTreeMap, BTreeSet};

/// Number of exception precedence levels, one per [`crate::daterange::DateRule`] variant
pub const EXCEPTION_LEVELS: usize = 5;

/// A named availability calendar: a weekly schedule, calendar exceptions
/// grouped by precedence level, and exclusion references to other
/// periods. Immutable once owned by a resolved [`PeriodSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePeriod {
    name: String,
    alias: String,
    days: [Vec<TimeRange>; 7],
    exceptions: [Vec<DateRange>; EXCEPTION_LEVELS],
    exclusions: BTreeSet<String>,
}

impl TimePeriod {
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyPeriodName);
        }
        Ok(Self {
            alias: name.clone(),
            name,
            days: Default::default(),
            exceptions: Default::default(),
            exclusions: BTreeSet::new(),
        })
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if !alias.is_empty() {
            self.alias = alias;
        }
        self
    }

    /// Replace the weekly ranges for a weekday (Sunday = 0)
    pub fn set_day(&mut self, weekday: u32, ranges: Vec<TimeRange>) -> Result<(), ConfigError> {
        let slot = self
            .days
            .get_mut(weekday as usize)
            .ok_or(ConfigError::InvalidWeekday(weekday as i32))?;
        *slot = ranges;
        Ok(())
    }

    /// Add a calendar exception; it files under its rule's precedence level
    pub fn add_exception(&mut self, exception: DateRange) {
        self.exceptions[exception.rule().level()].push(exception);
    }

    /// Reference another period whose valid times subtract from this one
    pub fn add_exclusion(&mut self, name: impl Into<String>) {
        self.exclusions.insert(name.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Weekly ranges for a weekday (Sunday = 0); empty when out of range
    pub fn day(&self, weekday: u32) -> &[TimeRange] {
        self.days.get(weekday as usize).map_or(&[], Vec::as_slice)
    }

    /// Exceptions at a precedence level, strongest first at level 0
    pub fn exceptions_at(&self, level: usize) -> &[DateRange] {
        self.exceptions.get(level).map_or(&[], Vec::as_slice)
    }

    pub fn exclusions(&self) -> &BTreeSet<String> {
        &self.exclusions
    }
}

/// All configured periods, keyed by unique name.
///
/// Exclusion references are names into this set; [`PeriodSet::resolve`]
/// validates them once, after which evaluation treats the set as
/// read-only.
#[derive(Debug, Clone, Default)]
pub struct PeriodSet {
    periods: BTreeMap<String, TimePeriod>,
}

impl PeriodSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, period: TimePeriod) -> Result<(), ConfigError> {
        if self.periods.contains_key(period.name()) {
            return Err(ConfigError::DuplicatePeriod(period.name().to_string()));
        }
        self.periods.insert(period.name().to_string(), period);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TimePeriod> {
        self.periods.get(name)
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimePeriod> {
        self.periods.values()
    }

    /// Check every exclusion reference against the set
    pub fn resolve(&self) -> Result<(), ConfigError> {
        for period in self.periods.values() {
            for excluded in period.exclusions() {
                if !self.periods.contains_key(excluded) {
                    return Err(ConfigError::UnknownExclusion {
                        period: period.name().to_string(),
                        excluded: excluded.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "timeperiod_tests.rs"]
mod tests;

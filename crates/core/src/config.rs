// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serde DTOs for externally loaded time-period configuration
//!
//! An external loader hands these over already parsed; conversion into
//! the domain types performs all validation. No file I/O here.

use crate::daterange::{CalendarDay, DateRange, DateRule};
use crate::error::ConfigError;
use crate::timeperiod::{PeriodSet, TimePeriod};
use crate::timerange::TimeRange;
use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TimeRangeConfig {
    pub start: u32,
    pub end: u32,
}

impl TryFrom<TimeRangeConfig> for TimeRange {
    type Error = ConfigError;

    fn try_from(config: TimeRangeConfig) -> Result<Self, Self::Error> {
        TimeRange::new(config.start, config.end)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CalendarDayConfig {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl From<CalendarDayConfig> for CalendarDay {
    fn from(config: CalendarDayConfig) -> Self {
        CalendarDay {
            year: config.year,
            month: config.month,
            day: config.day,
        }
    }
}

/// Date rule variants, tagged by `kind`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateRuleConfig {
    CalendarDate {
        start: CalendarDayConfig,
        #[serde(default)]
        end: Option<CalendarDayConfig>,
    },
    MonthDate {
        start_month: u32,
        start_day: i32,
        end_month: u32,
        end_day: i32,
    },
    MonthDay {
        start_day: i32,
        end_day: i32,
    },
    MonthWeekDay {
        start_month: u32,
        start_weekday: u32,
        start_ordinal: i32,
        end_month: u32,
        end_weekday: u32,
        end_ordinal: i32,
    },
    WeekDay {
        start_weekday: u32,
        start_ordinal: i32,
        end_weekday: u32,
        end_ordinal: i32,
    },
}

impl From<DateRuleConfig> for DateRule {
    fn from(config: DateRuleConfig) -> Self {
        match config {
            DateRuleConfig::CalendarDate { start, end } => DateRule::CalendarDate {
                start: start.into(),
                end: end.map(Into::into),
            },
            DateRuleConfig::MonthDate {
                start_month,
                start_day,
                end_month,
                end_day,
            } => DateRule::MonthDate {
                start_month,
                start_day,
                end_month,
                end_day,
            },
            DateRuleConfig::MonthDay { start_day, end_day } => {
                DateRule::MonthDay { start_day, end_day }
            }
            DateRuleConfig::MonthWeekDay {
                start_month,
                start_weekday,
                start_ordinal,
                end_month,
                end_weekday,
                end_ordinal,
            } => DateRule::MonthWeekDay {
                start_month,
                start_weekday,
                start_ordinal,
                end_month,
                end_weekday,
                end_ordinal,
            },
            DateRuleConfig::WeekDay {
                start_weekday,
                start_ordinal,
                end_weekday,
                end_ordinal,
            } => DateRule::WeekDay {
                start_weekday,
                start_ordinal,
                end_weekday,
                end_ordinal,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeConfig {
    #[serde(flatten)]
    pub rule: DateRuleConfig,
    #[serde(default = "default_skip_interval")]
    pub skip_interval: u32,
    #[serde(default)]
    pub times: Vec<TimeRangeConfig>,
}

fn default_skip_interval() -> u32 {
    1
}

impl TryFrom<DateRangeConfig> for DateRange {
    type Error = ConfigError;

    fn try_from(config: DateRangeConfig) -> Result<Self, Self::Error> {
        let times = config
            .times
            .into_iter()
            .map(TimeRange::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        DateRange::new(config.rule.into(), config.skip_interval, times)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimePeriodConfig {
    pub name: String,
    #[serde(default)]
    pub alias: String,
    /// Weekly schedule, Sunday first
    #[serde(default)]
    pub days: [Vec<TimeRangeConfig>; 7],
    #[serde(default)]
    pub exceptions: Vec<DateRangeConfig>,
    #[serde(default)]
    pub exclude: BTreeSet<String>,
}

impl TryFrom<TimePeriodConfig> for TimePeriod {
    type Error = ConfigError;

    fn try_from(config: TimePeriodConfig) -> Result<Self, Self::Error> {
        let mut period = TimePeriod::new(config.name)?.with_alias(config.alias);
        for (weekday, ranges) in config.days.into_iter().enumerate() {
            let ranges = ranges
                .into_iter()
                .map(TimeRange::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            period.set_day(weekday as u32, ranges)?;
        }
        for exception in config.exceptions {
            period.add_exception(exception.try_into()?);
        }
        for name in config.exclude {
            period.add_exclusion(name);
        }
        Ok(period)
    }
}

impl PeriodSet {
    /// Build and resolve a set from loaded configuration
    pub fn from_configs(
        configs: impl IntoIterator<Item = TimePeriodConfig>,
    ) -> Result<Self, ConfigError> {
        let mut set = PeriodSet::new();
        for config in configs {
            set.insert(config.try_into()?)?;
        }
        set.resolve()?;
        Ok(set)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

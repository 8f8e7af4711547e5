// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for configuration validation

use thiserror::Error;

/// Errors raised while converting loaded configuration into domain types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid time range: start {start} end {end} (need start <= end <= 86400)")]
    InvalidTimeRange { start: u32, end: u32 },
    #[error("invalid month: {0} (need 1..=12)")]
    InvalidMonth(i32),
    #[error("invalid day of month: {0} (need -31..=31, nonzero)")]
    InvalidMonthDay(i32),
    #[error("invalid weekday: {0} (need 0..=6, Sunday = 0)")]
    InvalidWeekday(i32),
    #[error("invalid weekday ordinal: {0} (need -5..=5, nonzero)")]
    InvalidWeekdayOrdinal(i32),
    #[error("invalid skip interval: {0} (need >= 1)")]
    InvalidSkipInterval(u32),
    #[error("time period name must not be empty")]
    EmptyPeriodName,
    #[error("duplicate time period: {0}")]
    DuplicatePeriod(String),
    #[error("time period {period} excludes unknown period {excluded}")]
    UnknownExclusion { period: String, excluded: String },
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

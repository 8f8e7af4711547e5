// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! vigil-core: Time-period data model and resolution for the check scheduler
//!
//! This crate provides:
//! - TimeRange / DateRange / TimePeriod domain types
//! - Serde DTOs for externally loaded configuration
//! - The valid/invalid-time resolver with exception precedence and exclusions
//! - DST-safe calendar arithmetic and a testable clock abstraction

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod calendar;
pub mod clock;
pub mod config;
pub mod daterange;
pub mod error;
pub mod resolver;
pub mod timeperiod;
pub mod timerange;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock, Timestamp};
pub use config::{
    CalendarDayConfig, DateRangeConfig, DateRuleConfig, TimePeriodConfig, TimeRangeConfig,
};
pub use daterange::{CalendarDay, DateRange, DateRule};
pub use error::ConfigError;
pub use timeperiod::{PeriodSet, TimePeriod};
pub use timerange::{TimeRange, SECONDS_PER_DAY};

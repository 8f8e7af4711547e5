// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the spec modules

use chrono::{TimeZone, Utc};
use vigil_core::{PeriodSet, TimePeriod, TimeRange, Timestamp};

pub fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap().timestamp()
}

pub fn hours(start: u32, end: u32) -> TimeRange {
    TimeRange::new(start * 3600, end * 3600).unwrap()
}

/// Monday-Friday 09:00-17:00
pub fn business_hours(name: &str) -> TimePeriod {
    let mut period = TimePeriod::new(name).unwrap();
    for weekday in 1..=5 {
        period.set_day(weekday, vec![hours(9, 17)]).unwrap();
    }
    period
}

pub fn lone(period: TimePeriod) -> PeriodSet {
    let mut set = PeriodSet::new();
    set.insert(period).unwrap();
    set.resolve().unwrap();
    set
}

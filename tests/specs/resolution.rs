// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time-period resolution scenarios

use crate::prelude::*;
use chrono_tz::Tz;
use vigil_core::{PeriodSet, TimePeriodConfig};

fn period_set(value: serde_json::Value) -> PeriodSet {
    let configs: Vec<TimePeriodConfig> = serde_json::from_value(value).unwrap();
    PeriodSet::from_configs(configs).unwrap()
}

#[test]
fn business_calendar_with_holiday_exclusion() {
    let set = period_set(serde_json::json!([
        {
            "name": "holidays",
            "exceptions": [
                {
                    "kind": "calendar_date",
                    "start": { "year": 2024, "month": 1, "day": 1 },
                    "times": [{ "start": 0, "end": 86_400 }]
                },
                {
                    "kind": "month_date",
                    "start_month": 12, "start_day": 25,
                    "end_month": 12, "end_day": 25,
                    "times": [{ "start": 0, "end": 86_400 }]
                }
            ]
        },
        {
            "name": "business",
            "days": [
                [],
                [{ "start": 32_400, "end": 61_200 }],
                [{ "start": 32_400, "end": 61_200 }],
                [{ "start": 32_400, "end": 61_200 }],
                [{ "start": 32_400, "end": 61_200 }],
                [{ "start": 32_400, "end": 61_200 }],
                []
            ],
            "exclude": ["holidays"]
        }
    ]));
    let business = set.get("business").unwrap();

    // 2024-01-01 is a Monday but also a holiday.
    assert!(!set.is_time_valid(ts(2024, 1, 1, 10, 0), business, Tz::UTC));
    assert_eq!(
        set.next_valid_time(ts(2024, 1, 1, 10, 0), business, Tz::UTC),
        ts(2024, 1, 2, 9, 0)
    );

    // Christmas recurs every year through the month_date rule.
    assert!(!set.is_time_valid(ts(2024, 12, 25, 10, 0), business, Tz::UTC));
    assert!(!set.is_time_valid(ts(2025, 12, 25, 10, 0), business, Tz::UTC));
    assert_eq!(
        set.next_valid_time(ts(2024, 12, 25, 10, 0), business, Tz::UTC),
        ts(2024, 12, 26, 9, 0)
    );

    // An ordinary working Tuesday is unaffected.
    assert!(set.is_time_valid(ts(2024, 1, 9, 10, 0), business, Tz::UTC));
}

#[test]
fn last_friday_maintenance_window() {
    let set = period_set(serde_json::json!([
        {
            "name": "monthly-maintenance",
            "exceptions": [
                {
                    "kind": "month_week_day",
                    "start_month": 3, "start_weekday": 5, "start_ordinal": -1,
                    "end_month": 3, "end_weekday": 5, "end_ordinal": -1,
                    "times": [{ "start": 79_200, "end": 86_400 }]
                }
            ]
        }
    ]));
    let period = set.get("monthly-maintenance").unwrap();

    // Last Friday of March 2024 is the 29th; window is 22:00-24:00.
    assert!(set.is_time_valid(ts(2024, 3, 29, 22, 30), period, Tz::UTC));
    assert!(!set.is_time_valid(ts(2024, 3, 29, 21, 0), period, Tz::UTC));
    assert!(!set.is_time_valid(ts(2024, 3, 22, 22, 30), period, Tz::UTC));
    assert_eq!(
        set.next_valid_time(ts(2024, 3, 1, 0, 0), period, Tz::UTC),
        ts(2024, 3, 29, 22, 0)
    );
}

#[test]
fn weekend_resolution_in_local_timezone() {
    let set = lone(business_hours("workhours"));
    let period = set.get("workhours").unwrap();
    let tz = Tz::America__New_York;

    // 2024-01-08 13:00 UTC is 08:00 in New York, one hour before the
    // window opens.
    let t = ts(2024, 1, 8, 13, 0);
    assert!(!set.is_time_valid(t, period, tz));
    assert_eq!(set.next_valid_time(t, period, tz), ts(2024, 1, 8, 14, 0));
    assert!(set.is_time_valid(ts(2024, 1, 8, 15, 0), period, tz));
}

#[test]
fn invalid_and_valid_walk_are_duals() {
    let set = lone(business_hours("workhours"));
    let period = set.get("workhours").unwrap();

    let mut t = ts(2024, 1, 8, 0, 0);
    // Walk a week of boundaries; each flip lands exactly where the
    // other walk says it should.
    for _ in 0..5 {
        let open = set.next_valid_time(t, period, Tz::UTC);
        assert!(set.is_time_valid(open, period, Tz::UTC));
        let close = set.next_invalid_time(open, period, Tz::UTC);
        assert!(close > open);
        assert!(!set.is_time_valid(close, period, Tz::UTC));
        t = close;
    }
}

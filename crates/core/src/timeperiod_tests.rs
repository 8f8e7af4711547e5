// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::daterange::{CalendarDay, DateRule};

fn workhours() -> TimePeriod {
    let mut period = TimePeriod::new("workhours").unwrap();
    let nine_to_five = TimeRange::new(9 * 3600, 17 * 3600).unwrap();
    for weekday in 1..=5 {
        period.set_day(weekday, vec![nine_to_five]).unwrap();
    }
    period
}

#[test]
fn new_rejects_empty_name() {
    assert_eq!(
        TimePeriod::new("").unwrap_err(),
        ConfigError::EmptyPeriodName
    );
}

#[test]
fn alias_defaults_to_name() {
    let period = TimePeriod::new("workhours").unwrap();
    assert_eq!(period.alias(), "workhours");
    let aliased = TimePeriod::new("workhours").unwrap().with_alias("Business");
    assert_eq!(aliased.alias(), "Business");
    let blank = TimePeriod::new("workhours").unwrap().with_alias("");
    assert_eq!(blank.alias(), "workhours");
}

#[test]
fn set_day_rejects_out_of_range_weekday() {
    let mut period = TimePeriod::new("p").unwrap();
    assert_eq!(
        period.set_day(7, Vec::new()).unwrap_err(),
        ConfigError::InvalidWeekday(7)
    );
}

#[test]
fn exceptions_file_under_their_precedence_level() {
    let mut period = TimePeriod::new("p").unwrap();
    period.add_exception(
        DateRange::new(
            DateRule::CalendarDate {
                start: CalendarDay {
                    year: 2024,
                    month: 1,
                    day: 1,
                },
                end: None,
            },
            1,
            Vec::new(),
        )
        .unwrap(),
    );
    period.add_exception(
        DateRange::new(
            DateRule::WeekDay {
                start_weekday: 1,
                start_ordinal: 1,
                end_weekday: 1,
                end_ordinal: 1,
            },
            1,
            Vec::new(),
        )
        .unwrap(),
    );
    assert_eq!(period.exceptions_at(0).len(), 1);
    assert_eq!(period.exceptions_at(4).len(), 1);
    assert!(period.exceptions_at(1).is_empty());
}

#[test]
fn insert_rejects_duplicate_names() {
    let mut set = PeriodSet::new();
    set.insert(workhours()).unwrap();
    assert_eq!(
        set.insert(workhours()).unwrap_err(),
        ConfigError::DuplicatePeriod("workhours".to_string())
    );
}

#[test]
fn resolve_rejects_unknown_exclusion() {
    let mut set = PeriodSet::new();
    let mut period = workhours();
    period.add_exclusion("holidays");
    set.insert(period).unwrap();
    assert_eq!(
        set.resolve().unwrap_err(),
        ConfigError::UnknownExclusion {
            period: "workhours".to_string(),
            excluded: "holidays".to_string(),
        }
    );
}

#[test]
fn resolve_accepts_valid_exclusion_chain() {
    let mut set = PeriodSet::new();
    set.insert(TimePeriod::new("holidays").unwrap()).unwrap();
    let mut period = workhours();
    period.add_exclusion("holidays");
    set.insert(period).unwrap();
    set.resolve().unwrap();
    assert_eq!(set.len(), 2);
}

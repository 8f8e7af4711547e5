// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calendar exception rules for time periods
//!
//! A [`DateRange`] pairs a date rule with the time ranges that apply on
//! the days it covers. Rules come in five variants, listed in precedence
//! order; coverage is decided in civil-date space so DST never shifts a
//! window boundary.

use crate::calendar;
use crate::error::ConfigError;
use crate::timerange::TimeRange;
use chrono::{Datelike, NaiveDate};

/// An absolute civil date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDay {
    fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// The date-selection rule of an exception, in precedence order.
///
/// Weekdays are indexed Sunday = 0. Negative days count from the month
/// end (-1 = last day); negative ordinals count occurrences from the
/// month end (-1 = last such weekday).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRule {
    /// A fixed date or span of dates
    CalendarDate {
        start: CalendarDay,
        end: Option<CalendarDay>,
    },
    /// A month+day span, recurring every year
    MonthDate {
        start_month: u32,
        start_day: i32,
        end_month: u32,
        end_day: i32,
    },
    /// A day-of-month span, recurring every month
    MonthDay { start_day: i32, end_day: i32 },
    /// An "Nth weekday of month" span, recurring every year
    MonthWeekDay {
        start_month: u32,
        start_weekday: u32,
        start_ordinal: i32,
        end_month: u32,
        end_weekday: u32,
        end_ordinal: i32,
    },
    /// An "Nth weekday" span, recurring every month
    WeekDay {
        start_weekday: u32,
        start_ordinal: i32,
        end_weekday: u32,
        end_ordinal: i32,
    },
}

impl DateRule {
    /// Exception precedence, 0 = strongest
    pub fn level(&self) -> usize {
        match self {
            DateRule::CalendarDate { .. } => 0,
            DateRule::MonthDate { .. } => 1,
            DateRule::MonthDay { .. } => 2,
            DateRule::MonthWeekDay { .. } => 3,
            DateRule::WeekDay { .. } => 4,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            DateRule::CalendarDate { start, end } => {
                check_month(start.month as i32)?;
                if start.to_date().is_none() {
                    return Err(ConfigError::InvalidMonthDay(start.day as i32));
                }
                if let Some(end) = end {
                    check_month(end.month as i32)?;
                    if end.to_date().is_none() {
                        return Err(ConfigError::InvalidMonthDay(end.day as i32));
                    }
                }
                Ok(())
            }
            DateRule::MonthDate {
                start_month,
                start_day,
                end_month,
                end_day,
            } => {
                check_month(start_month as i32)?;
                check_month(end_month as i32)?;
                check_day(start_day)?;
                check_day(end_day)
            }
            DateRule::MonthDay { start_day, end_day } => {
                check_day(start_day)?;
                check_day(end_day)
            }
            DateRule::MonthWeekDay {
                start_month,
                start_weekday,
                start_ordinal,
                end_month,
                end_weekday,
                end_ordinal,
            } => {
                check_month(start_month as i32)?;
                check_month(end_month as i32)?;
                check_weekday(start_weekday as i32)?;
                check_weekday(end_weekday as i32)?;
                check_ordinal(start_ordinal)?;
                check_ordinal(end_ordinal)
            }
            DateRule::WeekDay {
                start_weekday,
                start_ordinal,
                end_weekday,
                end_ordinal,
            } => {
                check_weekday(start_weekday as i32)?;
                check_weekday(end_weekday as i32)?;
                check_ordinal(start_ordinal)?;
                check_ordinal(end_ordinal)
            }
        }
    }
}

fn check_month(month: i32) -> Result<(), ConfigError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ConfigError::InvalidMonth(month))
    }
}

fn check_day(day: i32) -> Result<(), ConfigError> {
    if day != 0 && (-31..=31).contains(&day) {
        Ok(())
    } else {
        Err(ConfigError::InvalidMonthDay(day))
    }
}

fn check_weekday(weekday: i32) -> Result<(), ConfigError> {
    if (0..=6).contains(&weekday) {
        Ok(())
    } else {
        Err(ConfigError::InvalidWeekday(weekday))
    }
}

fn check_ordinal(ordinal: i32) -> Result<(), ConfigError> {
    if ordinal != 0 && (-5..=5).contains(&ordinal) {
        Ok(())
    } else {
        Err(ConfigError::InvalidWeekdayOrdinal(ordinal))
    }
}

/// A concrete civil-date window produced by a rule. `end` is the last
/// covered day, inclusive; `None` means the window is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateWindow {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && self.end.is_none_or(|end| day <= end)
    }
}

/// A calendar exception: a date rule plus the time ranges valid on the
/// days it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    rule: DateRule,
    skip_interval: u32,
    times: Vec<TimeRange>,
}

impl DateRange {
    pub fn new(
        rule: DateRule,
        skip_interval: u32,
        times: Vec<TimeRange>,
    ) -> Result<Self, ConfigError> {
        if skip_interval == 0 {
            return Err(ConfigError::InvalidSkipInterval(skip_interval));
        }
        rule.validate()?;
        Ok(Self {
            rule,
            skip_interval,
            times,
        })
    }

    pub fn rule(&self) -> &DateRule {
        &self.rule
    }

    pub fn skip_interval(&self) -> u32 {
        self.skip_interval
    }

    pub fn times(&self) -> &[TimeRange] {
        &self.times
    }

    /// True when `day` falls inside the rule's window and on a
    /// skip-interval step counted from the window start
    pub fn covers(&self, day: NaiveDate) -> bool {
        let Some(window) = self.window_containing(day) else {
            return false;
        };
        (day - window.start).num_days() % i64::from(self.skip_interval) == 0
    }

    fn window_containing(&self, day: NaiveDate) -> Option<DateWindow> {
        self.candidate_windows(day)
            .into_iter()
            .flatten()
            .find(|window| window.contains(day))
    }

    /// Concrete windows near `day`. Recurring rules anchored to a year
    /// or month may wrap into the next one, so the previous anchor is
    /// offered as well.
    fn candidate_windows(&self, day: NaiveDate) -> Vec<Option<DateWindow>> {
        match self.rule {
            DateRule::CalendarDate { start, end } => {
                vec![self.calendar_window(start, end)]
            }
            DateRule::MonthDate { .. } => vec![
                self.month_date_window(day.year() - 1),
                self.month_date_window(day.year()),
            ],
            DateRule::MonthDay { .. } => {
                let (py, pm) = previous_month(day.year(), day.month());
                vec![
                    self.month_day_window(py, pm),
                    self.month_day_window(day.year(), day.month()),
                ]
            }
            DateRule::MonthWeekDay { .. } => vec![
                self.month_week_day_window(day.year() - 1),
                self.month_week_day_window(day.year()),
            ],
            DateRule::WeekDay { .. } => {
                let (py, pm) = previous_month(day.year(), day.month());
                vec![
                    self.week_day_window(py, pm),
                    self.week_day_window(day.year(), day.month()),
                ]
            }
        }
    }

    fn calendar_window(
        &self,
        start: CalendarDay,
        end: Option<CalendarDay>,
    ) -> Option<DateWindow> {
        let start = start.to_date()?;
        let end = match end {
            Some(end) => Some(end.to_date()?),
            // A dated rule with a skip interval but no end recurs
            // open-endedly; without a skip it names the one day.
            None if self.skip_interval > 1 => None,
            None => Some(start),
        };
        Some(DateWindow { start, end })
    }

    fn month_date_window(&self, anchor_year: i32) -> Option<DateWindow> {
        let DateRule::MonthDate {
            start_month,
            start_day,
            end_month,
            end_day,
        } = self.rule
        else {
            return None;
        };
        let start = calendar::day_of_month(anchor_year, start_month, start_day)?;
        let mut end = calendar::day_of_month(anchor_year, end_month, end_day)?;
        if end < start {
            end = calendar::day_of_month(anchor_year + 1, end_month, end_day)?;
        }
        Some(DateWindow {
            start,
            end: Some(end),
        })
    }

    fn month_day_window(&self, year: i32, month: u32) -> Option<DateWindow> {
        let DateRule::MonthDay { start_day, end_day } = self.rule else {
            return None;
        };
        let start = calendar::day_of_month(year, month, start_day)?;
        let mut end = calendar::day_of_month(year, month, end_day)?;
        if end < start {
            let (ny, nm) = next_month(year, month);
            end = calendar::day_of_month(ny, nm, end_day)?;
        }
        Some(DateWindow {
            start,
            end: Some(end),
        })
    }

    fn month_week_day_window(&self, anchor_year: i32) -> Option<DateWindow> {
        let DateRule::MonthWeekDay {
            start_month,
            start_weekday,
            start_ordinal,
            end_month,
            end_weekday,
            end_ordinal,
        } = self.rule
        else {
            return None;
        };
        let start =
            calendar::weekday_of_month(anchor_year, start_month, start_weekday, start_ordinal)?;
        let mut end =
            calendar::weekday_of_month(anchor_year, end_month, end_weekday, end_ordinal)?;
        if end < start {
            end = calendar::weekday_of_month(anchor_year + 1, end_month, end_weekday, end_ordinal)?;
        }
        Some(DateWindow {
            start,
            end: Some(end),
        })
    }

    fn week_day_window(&self, year: i32, month: u32) -> Option<DateWindow> {
        let DateRule::WeekDay {
            start_weekday,
            start_ordinal,
            end_weekday,
            end_ordinal,
        } = self.rule
        else {
            return None;
        };
        let start = calendar::weekday_of_month(year, month, start_weekday, start_ordinal)?;
        let end = match calendar::weekday_of_month(year, month, end_weekday, end_ordinal) {
            Some(end) if end >= start => end,
            // The end occurrence precedes the start or the month has no
            // such occurrence; the window runs to the end of the month.
            _ => calendar::day_of_month(year, month, -1)?,
        };
        Some(DateWindow {
            start,
            end: Some(end),
        })
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
#[path = "daterange_tests.rs"]
mod tests;

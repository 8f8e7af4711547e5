// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Valid/invalid-time resolution over time periods
//!
//! The resolver walks civil days from a preferred instant. Each day is
//! decided by the strongest exception level with a covering rule, or by
//! the weekly schedule when no exception covers it; exclusions then
//! subtract availability by consulting the excluded periods' own
//! resolution. The walk is bounded; a period with no reachable valid
//! time degrades to returning the preferred instant unchanged.

use crate::calendar;
use crate::clock::Timestamp;
use crate::timeperiod::{PeriodSet, TimePeriod, EXCEPTION_LEVELS};
use crate::timerange::TimeRange;
use chrono::{Days, NaiveDate};
use chrono_tz::Tz;
use tracing::{debug, trace, warn};

/// Days searched past the preferred instant before giving up
pub const SEARCH_HORIZON_DAYS: u64 = 366;

/// Bound on mutual-exclusion recursion; past it a branch stops
/// consulting exclusions
pub const MAX_EXCLUSION_DEPTH: u8 = 8;

impl PeriodSet {
    /// True when `t` falls inside one of the period's valid windows
    pub fn is_time_valid(&self, t: Timestamp, period: &TimePeriod, tz: Tz) -> bool {
        self.next_valid_time(t, period, tz) == t
    }

    /// Earliest valid instant at or after `preferred`.
    ///
    /// Returns `preferred` unchanged when no valid instant exists within
    /// the search horizon.
    pub fn next_valid_time(&self, preferred: Timestamp, period: &TimePeriod, tz: Tz) -> Timestamp {
        self.next_valid_at_depth(preferred, period, tz, 0)
    }

    /// Earliest invalid instant at or after `preferred`; the exact dual
    /// of [`PeriodSet::next_valid_time`]
    pub fn next_invalid_time(
        &self,
        preferred: Timestamp,
        period: &TimePeriod,
        tz: Tz,
    ) -> Timestamp {
        self.next_invalid_at_depth(preferred, period, tz, 0)
    }

    fn next_valid_at_depth(
        &self,
        preferred: Timestamp,
        period: &TimePeriod,
        tz: Tz,
        depth: u8,
    ) -> Timestamp {
        let horizon = search_horizon(preferred, tz);
        let mut at = preferred;
        loop {
            let day = calendar::local_date(at, tz);
            if day > horizon {
                debug!(
                    period = period.name(),
                    preferred, "no valid time within the search horizon"
                );
                return preferred;
            }
            let ranges = day_ranges(period, day);
            let Some(candidate) = earliest_candidate(&ranges, day, at, tz) else {
                at = calendar::midnight_of(calendar::next_day(day), tz);
                continue;
            };
            match self.exclusion_push(candidate, period, tz, depth) {
                // An exclusion swallows the candidate; resume where the
                // last one releases.
                Some(resume) => {
                    trace!(
                        period = period.name(),
                        candidate, resume, "candidate excluded"
                    );
                    at = resume;
                }
                None => return candidate,
            }
        }
    }

    fn next_invalid_at_depth(
        &self,
        preferred: Timestamp,
        period: &TimePeriod,
        tz: Tz,
        depth: u8,
    ) -> Timestamp {
        let horizon = search_horizon(preferred, tz);
        let mut at = preferred;
        loop {
            let day = calendar::local_date(at, tz);
            if day > horizon {
                debug!(
                    period = period.name(),
                    preferred, "no invalid time within the search horizon"
                );
                return preferred;
            }
            let ranges = day_ranges(period, day);
            let Some(window_end) = covering_end(&ranges, day, at, tz) else {
                return at;
            };
            if let Some(excluded_at) = self.exclusion_cut(at, window_end, period, tz, depth) {
                return excluded_at;
            }
            // Validity may continue in an adjacent window; keep walking
            // from this window's end.
            at = window_end;
        }
    }

    /// The latest instant at which any exclusion of `period` stops
    /// covering `candidate`; None when no exclusion covers it
    fn exclusion_push(
        &self,
        candidate: Timestamp,
        period: &TimePeriod,
        tz: Tz,
        depth: u8,
    ) -> Option<Timestamp> {
        if period.exclusions().is_empty() {
            return None;
        }
        if depth >= MAX_EXCLUSION_DEPTH {
            warn!(
                period = period.name(),
                depth, "exclusion depth limit reached; ignoring exclusions"
            );
            return None;
        }
        let mut push: Option<Timestamp> = None;
        for name in period.exclusions() {
            // References were validated at resolve time.
            let Some(excluded) = self.get(name) else {
                continue;
            };
            let release = self.next_invalid_at_depth(candidate, excluded, tz, depth + 1);
            if release > candidate {
                push = Some(push.map_or(release, |p| p.max(release)));
            }
        }
        push
    }

    /// The earliest instant in `[at, window_end)` at which an exclusion
    /// of `period` becomes valid; None when none does
    fn exclusion_cut(
        &self,
        at: Timestamp,
        window_end: Timestamp,
        period: &TimePeriod,
        tz: Tz,
        depth: u8,
    ) -> Option<Timestamp> {
        if period.exclusions().is_empty() {
            return None;
        }
        if depth >= MAX_EXCLUSION_DEPTH {
            warn!(
                period = period.name(),
                depth, "exclusion depth limit reached; ignoring exclusions"
            );
            return None;
        }
        let mut cut: Option<Timestamp> = None;
        for name in period.exclusions() {
            let Some(excluded) = self.get(name) else {
                continue;
            };
            let valid = self.next_valid_at_depth(at, excluded, tz, depth + 1);
            if valid < window_end {
                cut = Some(cut.map_or(valid, |c| c.min(valid)));
            }
        }
        cut
    }
}

/// The time ranges governing `day`: the strongest exception level with
/// a covering rule decides, with all covering rules at that level
/// contributing; otherwise the weekly schedule applies
fn day_ranges(period: &TimePeriod, day: NaiveDate) -> Vec<TimeRange> {
    for level in 0..EXCEPTION_LEVELS {
        let mut covered = false;
        let mut ranges = Vec::new();
        for exception in period.exceptions_at(level) {
            if exception.covers(day) {
                covered = true;
                ranges.extend_from_slice(exception.times());
            }
        }
        if covered {
            return ranges;
        }
    }
    period.day(calendar::weekday_index(day)).to_vec()
}

/// Earliest instant at or after `preferred` inside one of `ranges` on
/// `day`; the range start when `preferred` precedes it
fn earliest_candidate(
    ranges: &[TimeRange],
    day: NaiveDate,
    preferred: Timestamp,
    tz: Tz,
) -> Option<Timestamp> {
    let mut best: Option<Timestamp> = None;
    for range in ranges {
        if range.is_empty() {
            continue;
        }
        let start = calendar::instant_at(day, range.start(), tz);
        let end = calendar::instant_at(day, range.end(), tz);
        let candidate = if preferred <= start {
            start
        } else if preferred < end {
            preferred
        } else {
            continue;
        };
        best = Some(best.map_or(candidate, |b| b.min(candidate)));
    }
    best
}

/// Latest end among ranges on `day` containing `at`; None when `at` is
/// outside every range
fn covering_end(ranges: &[TimeRange], day: NaiveDate, at: Timestamp, tz: Tz) -> Option<Timestamp> {
    let mut latest: Option<Timestamp> = None;
    for range in ranges {
        if range.is_empty() {
            continue;
        }
        let start = calendar::instant_at(day, range.start(), tz);
        let end = calendar::instant_at(day, range.end(), tz);
        if at >= start && at < end {
            latest = Some(latest.map_or(end, |l| l.max(end)));
        }
    }
    latest
}

fn search_horizon(preferred: Timestamp, tz: Tz) -> NaiveDate {
    calendar::local_date(preferred, tz)
        .checked_add_days(Days::new(SEARCH_HORIZON_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

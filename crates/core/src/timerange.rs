// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Within-day time ranges

use crate::error::ConfigError;
use std::fmt;

/// Seconds in a civil day; range ends may land exactly here (midnight)
pub const SECONDS_PER_DAY: u32 = 86_400;

/// A half-open window `[start, end)` of seconds within one day.
///
/// `end == 86400` means the range runs to midnight. Immutable after
/// construction; invalid bounds are rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeRange {
    start: u32,
    end: u32,
}

impl TimeRange {
    pub fn new(start: u32, end: u32) -> Result<Self, ConfigError> {
        if start > end || end > SECONDS_PER_DAY {
            return Err(ConfigError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Start offset in seconds from local midnight
    pub fn start(&self) -> u32 {
        self.start
    }

    /// End offset in seconds from local midnight (exclusive)
    pub fn end(&self) -> u32 {
        self.end
    }

    /// True when the range covers no instant
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when the given day offset falls inside the range
    pub fn contains(&self, second_of_day: u32) -> bool {
        second_of_day >= self.start && second_of_day < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hm = |s: u32| (s / 3600, (s % 3600) / 60);
        let (sh, sm) = hm(self.start);
        let (eh, em) = hm(self.end);
        write!(f, "{sh:02}:{sm:02}-{eh:02}:{em:02}")
    }
}

#[cfg(test)]
#[path = "timerange_tests.rs"]
mod tests;

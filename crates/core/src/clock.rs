// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling

use std::sync::{Arc, Mutex};

/// Unix timestamp in whole seconds
pub type Timestamp = i64;

/// A clock that provides the current wall-clock time
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        chrono::Utc::now().timestamp()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Timestamp>>,
}

impl FakeClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Advance the clock by the given number of seconds
    pub fn advance(&self, seconds: i64) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += seconds;
    }

    /// Set the clock to a specific timestamp
    pub fn set(&self, timestamp: Timestamp) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = timestamp;
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Timestamp {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;

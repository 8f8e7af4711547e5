// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The timed event queue

use crate::entity::EntityId;
use std::collections::BTreeMap;
use vigil_core::Timestamp;

/// The kind of queued event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    HostCheck,
    ServiceCheck,
    /// Recurring engine bookkeeping unrelated to any one entity
    Misc,
}

/// A queued unit of future work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEvent {
    pub kind: EventKind,
    pub run_time: Timestamp,
    pub recurring: bool,
    /// Re-insertion interval in seconds for recurring events
    pub interval: u64,
    pub entity: Option<EntityId>,
}

impl TimedEvent {
    /// A one-shot check event for an entity
    pub fn check(kind: EventKind, entity: EntityId, run_time: Timestamp) -> Self {
        Self {
            kind,
            run_time,
            recurring: false,
            interval: 0,
            entity: Some(entity),
        }
    }

    /// A recurring bookkeeping event
    pub fn recurring_misc(run_time: Timestamp, interval: u64) -> Self {
        Self {
            kind: EventKind::Misc,
            run_time,
            recurring: true,
            interval,
            entity: None,
        }
    }
}

/// Time-ordered event queue, stable for equal run times.
///
/// Externally owned; the scheduler inserts and removes entries but the
/// engine's loop drains it.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: BTreeMap<(Timestamp, u64), TimedEvent>,
    seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, event: TimedEvent) {
        let key = (event.run_time, self.seq);
        self.seq += 1;
        self.events.insert(key, event);
    }

    /// Remove every event of `kind` linked to `entity`; returns how
    /// many were removed
    pub fn remove_matching(&mut self, kind: EventKind, entity: Option<EntityId>) -> usize {
        let before = self.events.len();
        self.events
            .retain(|_, event| !(event.kind == kind && event.entity == entity));
        before - self.events.len()
    }

    pub fn contains(&self, kind: EventKind, entity: Option<EntityId>) -> bool {
        self.events
            .values()
            .any(|event| event.kind == kind && event.entity == entity)
    }

    pub fn next_run_time(&self) -> Option<Timestamp> {
        self.events.keys().next().map(|(run_time, _)| *run_time)
    }

    /// Drain every event due at or before `now`, re-inserting recurring
    /// events at their next occurrence
    pub fn pop_due(&mut self, now: Timestamp) -> Vec<TimedEvent> {
        let mut due = Vec::new();
        while let Some((&key, _)) = self.events.first_key_value() {
            if key.0 > now {
                break;
            }
            let Some(event) = self.events.remove(&key) else {
                break;
            };
            if event.recurring && event.interval > 0 {
                let mut next = event.clone();
                next.run_time = event.run_time + event.interval as Timestamp;
                self.schedule(next);
            }
            due.push(event);
        }
        due
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedEvent> {
        self.events.values()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;

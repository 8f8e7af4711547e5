// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedulable entities and the table that owns them

use crate::error::ScheduleError;
use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use vigil_core::{ConfigError, Timestamp};

/// Stable identifier linking queue events back to entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of check an entity receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Host,
    Service,
}

/// Per-check option bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct CheckOptions(u32);

impl CheckOptions {
    pub const NONE: CheckOptions = CheckOptions(0);
    /// Run the check even outside its check period
    pub const FORCE_EXECUTION: CheckOptions = CheckOptions(1 << 0);
    pub const FRESHNESS_CHECK: CheckOptions = CheckOptions(1 << 1);
    pub const ORPHAN_CHECK: CheckOptions = CheckOptions(1 << 2);

    pub fn contains(self, other: CheckOptions) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: CheckOptions) {
        self.0 |= other.0;
    }
}

/// A host or service the scheduler places checks for
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: CheckKind,
    /// Seconds between checks; 0 means never check
    pub check_interval: u32,
    pub active_checks_enabled: bool,
    /// Name of the period restricting when checks may run
    pub check_period: Option<String>,
    pub timezone: Option<Tz>,
    pub next_check: Timestamp,
    pub should_be_scheduled: bool,
    pub check_options: CheckOptions,
}

impl Entity {
    pub fn new(id: EntityId, kind: CheckKind, check_interval: u32) -> Self {
        Self {
            id,
            kind,
            check_interval,
            active_checks_enabled: true,
            check_period: None,
            timezone: None,
            next_check: 0,
            should_be_scheduled: false,
            check_options: CheckOptions::NONE,
        }
    }

    pub fn from_config(config: EntityConfig) -> Result<Self, ConfigError> {
        let timezone = config
            .timezone
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| ConfigError::UnknownTimezone(name))
            })
            .transpose()?;
        Ok(Self {
            id: config.id,
            kind: config.kind,
            check_interval: config.check_interval,
            active_checks_enabled: config.active_checks_enabled,
            check_period: config.check_period,
            timezone,
            next_check: 0,
            should_be_scheduled: false,
            check_options: CheckOptions::NONE,
        })
    }

    /// Timezone for period resolution; UTC when unset
    pub fn tz(&self) -> Tz {
        self.timezone.unwrap_or(Tz::UTC)
    }
}

/// Loaded entity configuration, before timezone parsing
#[derive(Debug, Clone, Deserialize)]
pub struct EntityConfig {
    pub id: EntityId,
    pub kind: CheckKind,
    pub check_interval: u32,
    #[serde(default = "default_true")]
    pub active_checks_enabled: bool,
    #[serde(default)]
    pub check_period: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

fn default_true() -> bool {
    true
}

/// All known entities, in deterministic id order
#[derive(Debug, Clone, Default)]
pub struct EntityTable {
    entities: BTreeMap<EntityId, Entity>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entity
    pub fn insert(&mut self, entity: Entity) {
        self.entities.insert(entity.id, entity);
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Strict lookup for callers that treat absence as an error
    pub fn require(&self, id: EntityId) -> Result<&Entity, ScheduleError> {
        self.get(id).ok_or(ScheduleError::UnknownEntity(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;

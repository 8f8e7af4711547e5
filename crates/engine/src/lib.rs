// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! vigil-engine: Check scheduling for monitored hosts and services
//!
//! This crate provides:
//! - Schedulable entities and the table that owns them
//! - The timed event queue the engine's loop drains
//! - Scheduling statistics and the delay/interleave policies
//! - The scheduler: full passes, incremental updates, diff reconciliation

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod entity;
pub mod error;
pub mod info;
pub mod queue;
pub mod scheduler;

// Re-exports
pub use config::SchedulerConfig;
pub use entity::{CheckKind, CheckOptions, Entity, EntityConfig, EntityId, EntityTable};
pub use error::ScheduleError;
pub use info::{DelayMethod, InterleaveMethod, SchedulingInfo};
pub use queue::{EventKind, EventQueue, TimedEvent};
pub use scheduler::{EntityDiff, Scheduler};

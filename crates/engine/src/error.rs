// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the scheduling engine

use crate::entity::EntityId;
use thiserror::Error;
use vigil_core::ConfigError;

/// Errors that can occur while scheduling
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),
    #[error("unknown check period: {0}")]
    UnknownPeriod(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

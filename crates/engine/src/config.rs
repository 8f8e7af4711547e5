// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler configuration

use crate::info::{DelayMethod, InterleaveMethod};
use serde::Deserialize;

/// Knobs controlling how checks are spread
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub host_delay_method: DelayMethod,
    pub service_delay_method: DelayMethod,
    pub service_interleave_method: InterleaveMethod,
    /// Maximum minutes between now and the last host check of a pass
    pub max_host_check_spread: u32,
    /// Maximum minutes between now and the last service check of a pass
    pub max_service_check_spread: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            host_delay_method: DelayMethod::Smart,
            service_delay_method: DelayMethod::Smart,
            service_interleave_method: InterleaveMethod::Smart,
            max_host_check_spread: 30,
            max_service_check_spread: 30,
        }
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduling statistics and spread policies

use serde::Deserialize;
use vigil_core::Timestamp;

/// How checks of one kind are spread over their interval
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DelayMethod {
    /// No spreading; everything fires immediately
    None,
    /// One second between consecutive checks
    Dumb,
    /// A fixed delay in seconds
    User { delay: f64 },
    /// Spread evenly over the average interval, capped by the
    /// configured maximum spread
    #[default]
    Smart,
}

impl DelayMethod {
    /// Inter-check delay in seconds for `scheduled` checks totalling
    /// `interval_total` seconds, capped by `spread_minutes`
    pub fn delay(self, interval_total: u64, scheduled: u32, spread_minutes: u32) -> f64 {
        match self {
            DelayMethod::None => 0.0,
            DelayMethod::Dumb => 1.0,
            DelayMethod::User { delay } => delay,
            DelayMethod::Smart => {
                if scheduled == 0 || interval_total == 0 {
                    return 0.0;
                }
                let scheduled = f64::from(scheduled);
                let average_interval = interval_total as f64 / scheduled;
                let cap = f64::from(spread_minutes) * 60.0 / scheduled;
                (average_interval / scheduled).min(cap)
            }
        }
    }
}

/// How service checks interleave across hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum InterleaveMethod {
    /// A fixed interleave factor
    User { factor: u32 },
    /// One block per average scheduled service per host
    #[default]
    Smart,
}

impl InterleaveMethod {
    pub fn factor(self, total_scheduled_services: u32, total_hosts: u32) -> u32 {
        match self {
            InterleaveMethod::User { factor } => factor.max(1),
            InterleaveMethod::Smart => {
                if total_hosts == 0 {
                    return 1;
                }
                let per_host = f64::from(total_scheduled_services) / f64::from(total_hosts);
                (per_host.ceil() as u32).max(1)
            }
        }
    }
}

/// Statistics of one scheduling pass. Recomputed wholesale each pass;
/// `first_*`/`last_*` stamps of 0 mean no check was placed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulingInfo {
    pub total_hosts: u32,
    pub total_scheduled_hosts: u32,
    pub host_check_interval_total: u64,
    pub average_host_check_interval: f64,
    pub host_inter_check_delay: f64,
    pub first_host_check: Timestamp,
    pub last_host_check: Timestamp,
    pub max_host_check_spread: u32,

    pub total_services: u32,
    pub total_scheduled_services: u32,
    pub service_check_interval_total: u64,
    pub average_service_check_interval: f64,
    pub service_inter_check_delay: f64,
    pub first_service_check: Timestamp,
    pub last_service_check: Timestamp,
    pub max_service_check_spread: u32,

    pub average_services_per_host: f64,
    pub average_scheduled_services_per_host: f64,
    pub service_interleave_factor: u32,
}

#[cfg(test)]
#[path = "info_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Check placement and diff reconciliation
//!
//! A scheduling pass first recomputes parameters over the full entity
//! set, then places check times: hosts spaced by the inter-check delay,
//! services interleaved in blocks so consecutive services land on
//! different hosts. Configuration changes reconcile through
//! [`Scheduler::apply_diff`], which never disturbs events outside the
//! diffed entities.

use crate::config::SchedulerConfig;
use crate::entity::{CheckKind, CheckOptions, Entity, EntityId, EntityTable};
use crate::info::SchedulingInfo;
use crate::queue::{EventKind, EventQueue, TimedEvent};
use tracing::{debug, warn};
use vigil_core::{PeriodSet, Timestamp};

/// A reconciliation request: which entities appeared, disappeared, or
/// changed since the last applied configuration
#[derive(Debug, Clone, Default)]
pub struct EntityDiff {
    pub added: Vec<EntityId>,
    pub removed: Vec<EntityId>,
    pub modified: Vec<EntityId>,
}

/// Places checks for the entities of a table
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Recompute scheduling parameters and place a check for every
    /// schedulable entity. Returns the pass statistics and the events
    /// to insert, sorted by run time.
    pub fn compute_scheduling_pass(
        &self,
        table: &mut EntityTable,
        periods: &PeriodSet,
        now: Timestamp,
    ) -> (SchedulingInfo, Vec<TimedEvent>) {
        let mut info = self.calculate_scheduling_params(table, periods, now);
        let ids: Vec<EntityId> = table.ids().collect();
        let events = self.place_checks(&ids, table, periods, &mut info, now);
        (info, events)
    }

    /// Place and enqueue checks for the given entities using
    /// already-computed pass parameters. Unknown ids are skipped with a
    /// warning. Returns the number of events enqueued.
    pub fn schedule(
        &self,
        ids: &[EntityId],
        info: &mut SchedulingInfo,
        table: &mut EntityTable,
        periods: &PeriodSet,
        queue: &mut EventQueue,
        now: Timestamp,
    ) -> usize {
        let events = self.place_checks(ids, table, periods, info, now);
        let count = events.len();
        for event in events {
            queue.schedule(event);
        }
        count
    }

    /// Drop the pending check events of the given entities and mark
    /// them unscheduled. Misc events are untouched. Returns the number
    /// of events removed.
    pub fn unschedule(
        &self,
        ids: &[EntityId],
        table: &mut EntityTable,
        queue: &mut EventQueue,
    ) -> usize {
        let mut removed = 0;
        for &id in ids {
            removed += queue.remove_matching(EventKind::HostCheck, Some(id));
            removed += queue.remove_matching(EventKind::ServiceCheck, Some(id));
            if let Some(entity) = table.get_mut(id) {
                entity.should_be_scheduled = false;
            }
        }
        removed
    }

    /// Reconcile the queue with a configuration diff: stale events of
    /// removed and modified entities go first, parameters are
    /// recomputed over the live set, then added and modified entities
    /// are scheduled fresh
    pub fn apply_diff(
        &self,
        diff: &EntityDiff,
        table: &mut EntityTable,
        periods: &PeriodSet,
        queue: &mut EventQueue,
        now: Timestamp,
    ) -> SchedulingInfo {
        let stale: Vec<EntityId> = diff
            .removed
            .iter()
            .chain(diff.modified.iter())
            .copied()
            .collect();
        self.unschedule(&stale, table, queue);

        let mut info = self.calculate_scheduling_params(table, periods, now);

        let fresh: Vec<EntityId> = diff
            .added
            .iter()
            .chain(diff.modified.iter())
            .copied()
            .collect();
        self.schedule(&fresh, &mut info, table, periods, queue, now);
        info
    }

    /// Decide which entities are schedulable and derive the pass-wide
    /// totals, delays, and the interleave factor
    fn calculate_scheduling_params(
        &self,
        table: &mut EntityTable,
        periods: &PeriodSet,
        now: Timestamp,
    ) -> SchedulingInfo {
        let mut info = SchedulingInfo {
            max_host_check_spread: self.config.max_host_check_spread,
            max_service_check_spread: self.config.max_service_check_spread,
            ..SchedulingInfo::default()
        };

        for entity in table.iter_mut() {
            let schedulable = entity.check_interval > 0
                && entity.active_checks_enabled
                && in_check_period(entity, periods, now);
            entity.should_be_scheduled = schedulable;
            match entity.kind {
                CheckKind::Host => {
                    info.total_hosts += 1;
                    if schedulable {
                        info.total_scheduled_hosts += 1;
                        info.host_check_interval_total += u64::from(entity.check_interval);
                    }
                }
                CheckKind::Service => {
                    info.total_services += 1;
                    if schedulable {
                        info.total_scheduled_services += 1;
                        info.service_check_interval_total += u64::from(entity.check_interval);
                    }
                }
            }
        }

        if info.total_scheduled_hosts > 0 {
            info.average_host_check_interval =
                info.host_check_interval_total as f64 / f64::from(info.total_scheduled_hosts);
        }
        if info.total_scheduled_services > 0 {
            info.average_service_check_interval = info.service_check_interval_total as f64
                / f64::from(info.total_scheduled_services);
        }
        if info.total_hosts > 0 {
            info.average_services_per_host =
                f64::from(info.total_services) / f64::from(info.total_hosts);
            info.average_scheduled_services_per_host =
                f64::from(info.total_scheduled_services) / f64::from(info.total_hosts);
        }

        info.host_inter_check_delay = self.config.host_delay_method.delay(
            info.host_check_interval_total,
            info.total_scheduled_hosts,
            info.max_host_check_spread,
        );
        info.service_inter_check_delay = self.config.service_delay_method.delay(
            info.service_check_interval_total,
            info.total_scheduled_services,
            info.max_service_check_spread,
        );
        info.service_interleave_factor = self
            .config
            .service_interleave_method
            .factor(info.total_scheduled_services, info.total_hosts);

        debug!(
            scheduled_hosts = info.total_scheduled_hosts,
            scheduled_services = info.total_scheduled_services,
            host_delay = info.host_inter_check_delay,
            service_delay = info.service_inter_check_delay,
            interleave = info.service_interleave_factor,
            "scheduling parameters computed"
        );
        info
    }

    /// Compute check times for the given entities and update the pass
    /// first/last stamps. Events come back sorted by run time.
    fn place_checks(
        &self,
        ids: &[EntityId],
        table: &mut EntityTable,
        periods: &PeriodSet,
        info: &mut SchedulingInfo,
        now: Timestamp,
    ) -> Vec<TimedEvent> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut events = Vec::new();

        // Hosts: evenly spaced by the inter-check delay.
        let mut mult: u32 = 0;
        for &id in &ids {
            let Some(entity) = table.get_mut(id) else {
                warn!(entity = %id, "unknown entity; skipping");
                continue;
            };
            if entity.kind != CheckKind::Host {
                continue;
            }
            if !entity.should_be_scheduled {
                if let Some(event) = preserved_forced_check(entity) {
                    events.push(event);
                }
                continue;
            }
            let offset = (f64::from(mult) * info.host_inter_check_delay).floor() as Timestamp;
            mult += 1;
            let at = snap_to_period(periods, entity, now + offset);
            entity.next_check = at;
            stamp(&mut info.first_host_check, &mut info.last_host_check, at);
            events.push(TimedEvent::check(EventKind::HostCheck, id, at));
        }

        // Services: walk interleave blocks so consecutive services land
        // `total_blocks` delays apart.
        let factor = u64::from(info.service_interleave_factor.max(1));
        let total_blocks =
            (u64::from(info.total_scheduled_services).div_ceil(factor)).max(1);
        let mut current_block: u64 = 0;
        let mut index_in_block: u64 = 0;
        for &id in &ids {
            let Some(entity) = table.get_mut(id) else {
                continue;
            };
            if entity.kind != CheckKind::Service {
                continue;
            }
            if !entity.should_be_scheduled {
                if let Some(event) = preserved_forced_check(entity) {
                    events.push(event);
                }
                continue;
            }
            if index_in_block >= factor {
                current_block += 1;
                index_in_block = 0;
            }
            index_in_block += 1;
            let mult = current_block + index_in_block * total_blocks;
            let offset = (mult as f64 * info.service_inter_check_delay).floor() as Timestamp;
            let at = snap_to_period(periods, entity, now + offset);
            entity.next_check = at;
            stamp(
                &mut info.first_service_check,
                &mut info.last_service_check,
                at,
            );
            events.push(TimedEvent::check(EventKind::ServiceCheck, id, at));
        }

        events.sort_by_key(|event| event.run_time);
        events
    }
}

fn in_check_period(entity: &Entity, periods: &PeriodSet, now: Timestamp) -> bool {
    let Some(name) = entity.check_period.as_deref() else {
        return true;
    };
    match periods.get(name) {
        Some(period) => periods.is_time_valid(now, period, entity.tz()),
        None => {
            warn!(entity = %entity.id, period = name, "unknown check period; not scheduling");
            false
        }
    }
}

/// Snap a computed time forward into the entity's check period
fn snap_to_period(periods: &PeriodSet, entity: &Entity, at: Timestamp) -> Timestamp {
    let Some(name) = entity.check_period.as_deref() else {
        return at;
    };
    match periods.get(name) {
        Some(period) => periods.next_valid_time(at, period, entity.tz()),
        None => at,
    }
}

/// A disabled entity keeps its pending event when a forced check was
/// left behind
fn preserved_forced_check(entity: &Entity) -> Option<TimedEvent> {
    let preserved = !entity.active_checks_enabled
        && entity.next_check != 0
        && entity.check_options.contains(CheckOptions::FORCE_EXECUTION);
    if !preserved {
        return None;
    }
    let kind = match entity.kind {
        CheckKind::Host => EventKind::HostCheck,
        CheckKind::Service => EventKind::ServiceCheck,
    };
    Some(TimedEvent::check(kind, entity.id, entity.next_check))
}

fn stamp(first: &mut Timestamp, last: &mut Timestamp, at: Timestamp) {
    if *first == 0 || at < *first {
        *first = at;
    }
    if at > *last {
        *last = at;
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

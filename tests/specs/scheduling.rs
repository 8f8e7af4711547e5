// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler lifecycle scenarios

use crate::prelude::*;
use vigil_core::{Clock, FakeClock, PeriodSet};
use vigil_engine::{
    CheckKind, DelayMethod, Entity, EntityDiff, EntityId, EntityTable, EventKind, EventQueue,
    InterleaveMethod, Scheduler, SchedulerConfig, TimedEvent,
};

fn id(n: u64) -> EntityId {
    EntityId::new(n)
}

fn fixed_scheduler() -> Scheduler {
    Scheduler::new(SchedulerConfig {
        host_delay_method: DelayMethod::User { delay: 10.0 },
        service_delay_method: DelayMethod::User { delay: 5.0 },
        service_interleave_method: InterleaveMethod::User { factor: 2 },
        ..SchedulerConfig::default()
    })
}

fn small_fleet() -> EntityTable {
    let mut table = EntityTable::new();
    for n in 1..=3 {
        table.insert(Entity::new(id(n), CheckKind::Host, 300));
    }
    for n in 4..=9 {
        table.insert(Entity::new(id(n), CheckKind::Service, 60));
    }
    table
}

#[test]
fn full_pass_then_drain() {
    let scheduler = fixed_scheduler();
    let mut table = small_fleet();
    let periods = PeriodSet::new();
    let mut queue = EventQueue::new();
    let clock = FakeClock::new(1_000);

    let (info, events) = scheduler.compute_scheduling_pass(&mut table, &periods, clock.now());
    assert_eq!(info.total_scheduled_hosts, 3);
    assert_eq!(info.total_scheduled_services, 6);
    for event in events {
        queue.schedule(event);
    }
    assert_eq!(queue.len(), 9);

    // Nothing is due yet; everything lands at or after now and drains
    // in time order once the clock catches up.
    assert!(queue.next_run_time().is_some_and(|t| t >= clock.now()));
    clock.advance(3_600);
    let due = queue.pop_due(clock.now());
    assert_eq!(due.len(), 9);
    assert!(due.iter().all(|e| e.run_time >= 1_000));
    assert!(due.windows(2).all(|w| w[0].run_time <= w[1].run_time));
    assert!(queue.is_empty());
}

#[test]
fn reconciliation_keeps_queue_consistent() {
    let scheduler = fixed_scheduler();
    let mut table = small_fleet();
    let periods = PeriodSet::new();
    let mut queue = EventQueue::new();
    queue.schedule(TimedEvent::recurring_misc(1_500, 60));

    let (_info, events) = scheduler.compute_scheduling_pass(&mut table, &periods, 1_000);
    for event in events {
        queue.schedule(event);
    }

    // One service disappears, one host changes, one service appears.
    table.remove(id(9));
    table.get_mut(id(1)).unwrap().check_interval = 600;
    table.insert(Entity::new(id(10), CheckKind::Service, 60));
    let diff = EntityDiff {
        added: vec![id(10)],
        removed: vec![id(9)],
        modified: vec![id(1)],
    };
    let info = scheduler.apply_diff(&diff, &mut table, &periods, &mut queue, 2_000);

    assert_eq!(info.total_scheduled_hosts, 3);
    assert_eq!(info.total_scheduled_services, 6);
    assert!(!queue.contains(EventKind::ServiceCheck, Some(id(9))));
    assert!(queue.contains(EventKind::ServiceCheck, Some(id(10))));
    assert!(queue.contains(EventKind::Misc, None));

    // Exactly one pending check per live entity.
    for n in [1, 2, 3] {
        let count = queue
            .iter()
            .filter(|e| e.kind == EventKind::HostCheck && e.entity == Some(id(n)))
            .count();
        assert_eq!(count, 1, "host {n}");
    }
    for n in [4, 5, 6, 7, 8, 10] {
        let count = queue
            .iter()
            .filter(|e| e.kind == EventKind::ServiceCheck && e.entity == Some(id(n)))
            .count();
        assert_eq!(count, 1, "service {n}");
    }
}

#[test]
fn check_period_and_timezone_gate_scheduling() {
    let scheduler = fixed_scheduler();
    let set = lone(business_hours("workhours"));
    let mut table = EntityTable::new();
    let mut entity = Entity::new(id(1), CheckKind::Host, 300);
    entity.check_period = Some("workhours".to_string());
    entity.timezone = Some(chrono_tz::Tz::America__New_York);
    table.insert(entity);

    // Monday 2024-01-08 13:00 UTC is 08:00 in New York: outside the
    // window, nothing schedules.
    let early = ts(2024, 1, 8, 13, 0);
    let (info, events) = scheduler.compute_scheduling_pass(&mut table, &set, early);
    assert_eq!(info.total_scheduled_hosts, 0);
    assert!(events.is_empty());

    // Two hours later it is 10:00 local and the check schedules.
    let later = ts(2024, 1, 8, 15, 0);
    let (info, events) = scheduler.compute_scheduling_pass(&mut table, &set, later);
    assert_eq!(info.total_scheduled_hosts, 1);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].run_time, later);
}

#[test]
fn recurring_housekeeping_survives_many_reconciliations() {
    let scheduler = fixed_scheduler();
    let mut table = EntityTable::new();
    table.insert(Entity::new(id(1), CheckKind::Host, 300));
    let periods = PeriodSet::new();
    let mut queue = EventQueue::new();
    queue.schedule(TimedEvent::recurring_misc(1_000, 60));

    for round in 0u32..5 {
        table.get_mut(id(1)).unwrap().check_interval = 300 + round;
        let diff = EntityDiff {
            modified: vec![id(1)],
            ..EntityDiff::default()
        };
        scheduler.apply_diff(&diff, &mut table, &periods, &mut queue, 2_000);
    }

    assert!(queue.contains(EventKind::Misc, None));
    let checks = queue
        .iter()
        .filter(|e| e.kind == EventKind::HostCheck)
        .count();
    assert_eq!(checks, 1);
}

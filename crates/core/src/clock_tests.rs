// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_clock_starts_at_given_time() {
    let clock = FakeClock::new(1_700_000_000);
    assert_eq!(clock.now(), 1_700_000_000);
}

#[test]
fn fake_clock_advance_moves_forward() {
    let clock = FakeClock::new(100);
    clock.advance(60);
    assert_eq!(clock.now(), 160);
}

#[test]
fn fake_clock_set_overrides_current_time() {
    let clock = FakeClock::new(100);
    clock.advance(60);
    clock.set(5);
    assert_eq!(clock.now(), 5);
}

#[test]
fn fake_clock_clones_share_state() {
    let clock = FakeClock::new(0);
    let other = clock.clone();
    clock.advance(30);
    assert_eq!(other.now(), 30);
}

#[test]
fn system_clock_returns_plausible_time() {
    let clock = SystemClock;
    // After 2020-01-01, before 2100-01-01.
    let now = clock.now();
    assert!(now > 1_577_836_800);
    assert!(now < 4_102_444_800);
}

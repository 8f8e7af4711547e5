// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! DST-safe calendar arithmetic
//!
//! Day boundaries are computed in civil-date space and re-resolved to
//! instants through the timezone, never by adding 86400 seconds. Local
//! times that a DST transition makes ambiguous resolve to the earliest
//! instant; skipped local times probe forward to the first valid one.

use crate::clock::Timestamp;
use crate::timerange::SECONDS_PER_DAY;
use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Civil date of the given instant in the given timezone
pub fn local_date(t: Timestamp, tz: Tz) -> NaiveDate {
    let utc = DateTime::from_timestamp(t, 0).unwrap_or(DateTime::UNIX_EPOCH);
    utc.with_timezone(&tz).date_naive()
}

/// Instant of `second_of_day` on `date` in `tz`.
///
/// An offset of 86400 resolves to the next day's midnight.
pub fn instant_at(date: NaiveDate, second_of_day: u32, tz: Tz) -> Timestamp {
    let (date, secs) = if second_of_day >= SECONDS_PER_DAY {
        (next_day(date), second_of_day - SECONDS_PER_DAY)
    } else {
        (date, second_of_day)
    };
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MIN)
        + Duration::seconds(i64::from(secs));
    resolve_local(naive, tz)
}

/// Instant of local midnight on `date` in `tz`
pub fn midnight_of(date: NaiveDate, tz: Tz) -> Timestamp {
    instant_at(date, 0, tz)
}

/// The civil day after `date`
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(NaiveDate::MAX)
}

/// Weekday index of `date`, Sunday = 0
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Resolve a civil day number within a month; negative counts from the
/// month end (-1 = last day). Days past the month end clamp to it,
/// days before the 1st clamp to the 1st.
pub fn day_of_month(year: i32, month: u32, day: i32) -> Option<NaiveDate> {
    let len = days_in_month(year, month)?;
    let resolved = if day > 0 {
        day.min(len as i32)
    } else {
        (len as i32 + day + 1).max(1)
    };
    NaiveDate::from_ymd_opt(year, month, resolved as u32)
}

/// Resolve "the Nth `weekday` of the month" (Sunday = 0); negative
/// ordinals count from the month end (-1 = last). None when the month
/// has no such occurrence.
pub fn weekday_of_month(year: i32, month: u32, weekday: u32, ordinal: i32) -> Option<NaiveDate> {
    let len = days_in_month(year, month)?;
    if ordinal > 0 {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let offset = (weekday + 7 - weekday_index(first)) % 7;
        let day = 1 + offset + (ordinal as u32 - 1) * 7;
        if day > len {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)
    } else {
        let last = NaiveDate::from_ymd_opt(year, month, len)?;
        let back = (weekday_index(last) + 7 - weekday) % 7;
        let day = len as i32 - back as i32 - (-ordinal - 1) * 7;
        if day < 1 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day as u32)
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Timestamp {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.timestamp(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp(),
        LocalResult::None => {
            // Inside a DST gap; the first valid instant is at most a few
            // probe steps ahead.
            let mut probe = naive;
            for _ in 0..8 {
                probe += Duration::minutes(30);
                match tz.from_local_datetime(&probe) {
                    LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                        return dt.timestamp();
                    }
                    LocalResult::None => {}
                }
            }
            Utc.from_utc_datetime(&naive).timestamp()
        }
    }
}

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod tests;

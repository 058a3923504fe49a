//! # Slot Generation
//!
//! Splits a pitch's operating window for one date into consecutive one-hour
//! slots and marks each slot available or not.
//!
//! A slot is unavailable when any of the following hold:
//!
//! - it has already ended (`slot.end <= now`)
//! - it overlaps a holding booking
//! - it overlaps a closure
//!
//! Bookings and closures use the same [`TimeRange::overlaps`] test, so a
//! booking ending exactly when a slot starts leaves that slot free.
//!
//! Window times are wall-clock times in the venue's timezone. Each slot is
//! exactly [`slot_length`] long in absolute time, so a window that straddles a
//! daylight-saving change yields one more or one fewer slot than its
//! wall-clock length suggests.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::{
    interval::{TimeRange, resolve_local},
    models::{schedule::OperatingWindow, slot::Slot},
};

pub const SLOT_MINUTES: i64 = 60;

/// Length of every generated slot.
pub fn slot_length() -> Duration {
    Duration::minutes(SLOT_MINUTES)
}

/// Generates the one-hour slots for `date` under `window`.
///
/// Returns an empty list when the pitch has no window that day or the window
/// is malformed (end not after start). Never fails.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
/// use pitchbook_core::{models::schedule::OperatingWindow, slots::generate_slots};
///
/// let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let window = OperatingWindow::new(
///     1,
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
/// );
/// let now = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
///
/// let slots = generate_slots(monday, Some(&window), chrono_tz::UTC, &[], &[], 2500, now);
/// assert_eq!(slots.len(), 3);
/// assert!(slots.iter().all(|s| s.available && s.price == 2500));
/// ```
pub fn generate_slots(
    date: NaiveDate,
    window: Option<&OperatingWindow>,
    timezone: Tz,
    closures: &[TimeRange],
    booked: &[TimeRange],
    price: i64,
    now: DateTime<Utc>,
) -> Vec<Slot> {
    let Some(window) = window else {
        return Vec::new();
    };
    if !window.is_well_formed() {
        return Vec::new();
    }

    let (Some(day_start), Some(day_end)) = (
        resolve_local(timezone, date, window.start_time),
        resolve_local(timezone, date, window.end_time),
    ) else {
        return Vec::new();
    };

    let step = slot_length();
    let mut slots = Vec::new();
    let mut cursor = day_start;
    while let Some(slot_end) = cursor.checked_add_signed(step) {
        if slot_end > day_end {
            break;
        }
        let range = TimeRange::new(cursor, slot_end);

        let is_past = range.end <= now;
        let is_booked = overlaps_any(&range, booked);
        let is_closed = overlaps_any(&range, closures);

        slots.push(Slot {
            start: range.start,
            end: range.end,
            available: !is_past && !is_booked && !is_closed,
            price,
        });
        cursor = range.end;
    }

    slots
}

fn overlaps_any(range: &TimeRange, others: &[TimeRange]) -> bool {
    others.iter().any(|other| range.overlaps(other))
}

use std::fmt::{Debug, Formatter};

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::{booking::Booking, closure::Closure};

// tzdata transitions never open a gap longer than this.
const GAP_LOOKBACK_HOURS: i64 = 3;

/// A half-open span of time, `[start, end)`.
///
/// Slots, closures and bookings are all compared through [`TimeRange::overlaps`]
/// so that every availability check agrees on what happens at an exact boundary.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive.
    pub start: DateTime<Utc>,

    /// Exclusive.
    pub end: DateTime<Utc>,
}

impl Debug for TimeRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl TimeRange {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Two ranges overlap iff each one starts before the other ends.
    ///
    /// Ranges that merely touch (`a.end == b.start`) do not overlap.
    /// Containment in either direction counts as overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The whole local calendar day `date` in `tz`, from midnight to the next midnight.
    ///
    /// `None` when either midnight falls outside the representable range.
    pub fn local_day(date: NaiveDate, tz: Tz) -> Option<Self> {
        let start = resolve_local(tz, date, NaiveTime::MIN)?;
        let end = resolve_local(tz, date.succ_opt()?, NaiveTime::MIN)?;
        Some(Self { start, end })
    }
}

impl From<&Closure> for TimeRange {
    fn from(closure: &Closure) -> Self {
        Self::new(closure.start, closure.end)
    }
}

impl From<&Booking> for TimeRange {
    fn from(booking: &Booking) -> Self {
        Self::new(booking.start, booking.end)
    }
}

/// Converts a venue-local wall-clock time on `date` into a UTC instant.
///
/// Ambiguous times (the repeated hour when clocks go back) resolve to the
/// earlier instant. Times inside a spring-forward gap keep the offset that was
/// in force before the gap, which moves them forward by the gap's length.
///
/// Returns `None` only at the far ends of the calendar, where the UTC instant
/// cannot be represented.
pub fn resolve_local(tz: Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => Some(local.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let before = naive.checked_sub_signed(Duration::hours(GAP_LOOKBACK_HOURS))?;
            let offset = tz
                .offset_from_local_datetime(&before)
                .earliest()
                .map(|offset| offset.fix())
                .unwrap_or_else(|| tz.offset_from_utc_datetime(&naive).fix());
            let utc = naive
                .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
            Some(Utc.from_utc_datetime(&utc))
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    interval::TimeRange,
    models::pitch::Pitch,
};

pub const CURRENCY: &str = "gbp";

/// A requested booking range, as posted by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<BookingRequest> for TimeRange {
    fn from(request: BookingRequest) -> Self {
        TimeRange::new(request.start, request.end)
    }
}

/// The price of a requested range on a pitch that is free to book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingQuote {
    pub pitch_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_pence: i64,
    pub currency: String,
}

/// Hourly rate times duration in hours, rounded to the nearest penny.
pub fn quote_total(price_per_hour: i64, range: &TimeRange) -> i64 {
    let hours = range.duration().num_seconds() as f64 / 3600.0;
    (price_per_hour as f64 * hours).round() as i64
}

/// The first range in `existing` that overlaps `requested`.
pub fn find_conflict(requested: &TimeRange, existing: &[TimeRange]) -> Option<TimeRange> {
    existing.iter().copied().find(|other| requested.overlaps(other))
}

/// Checks that `requested` can be booked on `pitch` and prices it.
///
/// `closures` and `holding` are the closure and pending/confirmed booking
/// ranges around the requested time. The booking itself is not recorded.
///
/// # Errors
///
/// * `BookingError::Validation` - Pitch inactive, empty range, or start in the past
/// * `BookingError::Conflict` - Range overlaps a holding booking or a closure
pub fn check_booking(
    pitch: &Pitch,
    requested: &TimeRange,
    closures: &[TimeRange],
    holding: &[TimeRange],
    now: DateTime<Utc>,
) -> BookingResult<BookingQuote> {
    if !pitch.is_active {
        return Err(BookingError::Validation(
            "This pitch is not available for booking".to_string(),
        ));
    }
    if requested.is_empty() {
        return Err(BookingError::Validation(
            "Booking end must be after its start".to_string(),
        ));
    }
    if requested.start < now {
        return Err(BookingError::Validation(
            "Booking cannot start in the past".to_string(),
        ));
    }

    if let Some(existing) = find_conflict(requested, holding) {
        return Err(BookingError::Conflict(format!(
            "This time slot is already booked ({} to {})",
            existing.start.to_rfc3339(),
            existing.end.to_rfc3339()
        )));
    }
    if let Some(closure) = find_conflict(requested, closures) {
        return Err(BookingError::Conflict(format!(
            "The pitch is closed from {} to {}",
            closure.start.to_rfc3339(),
            closure.end.to_rfc3339()
        )));
    }

    Ok(BookingQuote {
        pitch_id: pitch.id,
        start: requested.start,
        end: requested.end,
        total_pence: quote_total(pitch.price_per_hour, requested),
        currency: CURRENCY.to_string(),
    })
}

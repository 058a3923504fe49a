use axum::{
    Json,
    extract::{Path, State},
};
use pitchbook_core::{
    booking::{BookingQuote, BookingRequest, check_booking},
    errors::BookingError,
    interval::TimeRange,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Checks that a range is free on a pitch and prices it
///
/// Nothing is reserved; a quote only says the range was bookable at the time
/// of the request.
///
/// # Endpoint
///
/// ```text
/// POST /api/pitches/:id/quote
/// {"start": "2024-06-03T18:00:00Z", "end": "2024-06-03T19:00:00Z"}
/// ```
///
/// # Errors
///
/// * `BookingError::NotFound` - No pitch with this ID
/// * `BookingError::Validation` - Inactive pitch, empty range or start in the past
/// * `BookingError::Conflict` - Range overlaps a booking or closure
#[axum::debug_handler]
pub async fn quote_booking(
    State(state): State<Arc<ApiState>>,
    Path(pitch_id): Path<Uuid>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookingQuote>, AppError> {
    let pitch = state
        .store
        .get_pitch(pitch_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Pitch with ID {} not found", pitch_id)))?;

    let requested = TimeRange::from(request);
    let closures: Vec<TimeRange> = state
        .store
        .get_closures(pitch_id, requested)
        .await?
        .iter()
        .map(TimeRange::from)
        .collect();
    let holding: Vec<TimeRange> = state
        .store
        .get_holding_bookings(pitch_id, requested)
        .await?
        .iter()
        .map(TimeRange::from)
        .collect();

    let quote = check_booking(&pitch, &requested, &closures, &holding, state.clock.now())?;

    info!(
        "Quoted {} pence for pitch {} from {} to {}",
        quote.total_pence, pitch_id, quote.start, quote.end
    );
    Ok(Json(quote))
}

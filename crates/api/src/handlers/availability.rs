//! # Availability Handlers
//!
//! Serves the bookable one-hour slots for a pitch on a given date.
//!
//! The handler gathers the inputs the slot generator needs:
//!
//! 1. The pitch, for its hourly rate, active flag and timezone
//! 2. The operating window that applies to the requested date
//! 3. Closures and pending/confirmed bookings overlapping that local day
//!
//! It then hands them to [`generate_slots`] together with the current time.
//! An inactive pitch, or a date with no operating window, yields an empty
//! slot list rather than an error.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use pitchbook_core::{
    errors::BookingError,
    interval::TimeRange,
    models::slot::AvailabilityResponse,
    slots::generate_slots,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Calendar date in the venue's timezone, formatted `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Lists the one-hour slots of a pitch for a date
///
/// # Endpoint
///
/// ```text
/// GET /api/pitches/:id/availability?date=2024-06-03
/// ```
///
/// # Errors
///
/// * `BookingError::Validation` - Missing or malformed `date`
/// * `BookingError::NotFound` - No pitch with this ID
/// * `BookingError::Store` - The store failed
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(pitch_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = parse_date(query.date.as_deref())?;

    let pitch = state
        .store
        .get_pitch(pitch_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Pitch with ID {} not found", pitch_id)))?;

    if !pitch.is_active {
        debug!("Pitch {} is inactive; no slots for {}", pitch_id, date);
        return Ok(Json(AvailabilityResponse::empty()));
    }

    let schedule = state.store.get_schedule(pitch_id).await?;
    let Some(window) = schedule.window_for(date) else {
        debug!("Pitch {} has no operating window on {}", pitch_id, date);
        return Ok(Json(AvailabilityResponse::empty()));
    };

    let Some(day) = TimeRange::local_day(date, pitch.timezone) else {
        debug!("Date {} is outside the supported range", date);
        return Ok(Json(AvailabilityResponse::empty()));
    };
    let closures: Vec<TimeRange> = state
        .store
        .get_closures(pitch_id, day)
        .await?
        .iter()
        .map(TimeRange::from)
        .collect();
    let booked: Vec<TimeRange> = state
        .store
        .get_holding_bookings(pitch_id, day)
        .await?
        .iter()
        .map(TimeRange::from)
        .collect();

    let slots = generate_slots(
        date,
        Some(window),
        pitch.timezone,
        &closures,
        &booked,
        pitch.price_per_hour,
        state.clock.now(),
    );

    debug!(
        "Pitch {} on {}: {} slots, {} available ({} closures, {} bookings)",
        pitch_id,
        date,
        slots.len(),
        slots.iter().filter(|s| s.available).count(),
        closures.len(),
        booked.len()
    );

    Ok(Json(AvailabilityResponse { slots }))
}

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| BookingError::Validation("Date parameter is required".to_string()))?;

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError(BookingError::Validation(format!(
            "Invalid date '{}', expected YYYY-MM-DD",
            raw
        )))
    })
}

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Datelike, NaiveDate, NaiveTime};
use pitchbook_core::models::{
    schedule::{OperatingWindow, WeeklySchedule},
    slot::{AvailabilityResponse, Slot},
};
use pitchbook_store::{MemoryStore, mock::MockPitchStore};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use uuid::Uuid;

use crate::test_utils::{
    PRICE, active_pitch_id, inactive_pitch_id, london, pitch, seeded_server, server,
};

fn availability_path(id: Uuid) -> String {
    format!("/api/pitches/{}/availability", id)
}

fn availability(slots: &[Slot]) -> Vec<bool> {
    slots.iter().map(|s| s.available).collect()
}

#[test_log::test(tokio::test)]
async fn test_monday_slots_reflect_bookings() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .get(&availability_path(active_pitch_id()))
        .add_query_param("date", "2024-06-03")
        .await;

    response.assert_status(StatusCode::OK);
    let body: AvailabilityResponse = response.json();
    assert_eq!(body.slots.len(), 3);
    assert_eq!(body.slots[0].start, london(3, 9, 0));
    assert_eq!(body.slots[2].end, london(3, 12, 0));
    // Confirmed 10-11 blocks; cancelled 11-12 does not.
    assert_eq!(availability(&body.slots), vec![true, false, true]);
    assert!(body.slots.iter().all(|s| s.price == PRICE));
}

#[tokio::test]
async fn test_slots_serialize_as_iso_timestamps() {
    let server = seeded_server(london(1, 12, 0)).await;

    let body: Value = server
        .get(&availability_path(active_pitch_id()))
        .add_query_param("date", "2024-06-03")
        .await
        .json();

    let first = &body["slots"][0];
    assert_eq!(first["start"], "2024-06-03T08:00:00Z");
    assert_eq!(first["end"], "2024-06-03T09:00:00Z");
    assert_eq!(first["available"], true);
    assert_eq!(first["price"], PRICE);
}

#[tokio::test]
async fn test_past_slots_marked_unavailable() {
    let server = seeded_server(london(3, 11, 30)).await;

    let body: AvailabilityResponse = server
        .get(&availability_path(active_pitch_id()))
        .add_query_param("date", "2024-06-03")
        .await
        .json();

    assert_eq!(availability(&body.slots), vec![false, false, true]);
}

#[tokio::test]
async fn test_closure_blocks_whole_evening() {
    let server = seeded_server(london(1, 12, 0)).await;

    let body: AvailabilityResponse = server
        .get(&availability_path(active_pitch_id()))
        .add_query_param("date", "2024-06-05")
        .await
        .json();

    assert_eq!(body.slots.len(), 3);
    assert_eq!(availability(&body.slots), vec![false, false, false]);
}

#[tokio::test]
async fn test_day_without_window_is_empty() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .get(&availability_path(active_pitch_id()))
        .add_query_param("date", "2024-06-04")
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<AvailabilityResponse>(), AvailabilityResponse::empty());
}

#[tokio::test]
async fn test_inactive_pitch_is_empty() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .get(&availability_path(inactive_pitch_id()))
        .add_query_param("date", "2024-06-03")
        .await;

    response.assert_status(StatusCode::OK);
    assert!(response.json::<AvailabilityResponse>().slots.is_empty());
}

#[tokio::test]
async fn test_inactive_pitch_skips_schedule_lookup() {
    let mut store = MockPitchStore::new();
    store
        .expect_get_pitch()
        .times(1)
        .returning(|id| Ok(Some(pitch(id, false))));
    store.expect_get_schedule().never();
    store.expect_get_closures().never();
    store.expect_get_holding_bookings().never();
    let server = server(Arc::new(store), london(1, 12, 0));

    let response = server
        .get(&availability_path(Uuid::new_v4()))
        .add_query_param("date", "2024-06-03")
        .await;

    response.assert_status(StatusCode::OK);
    assert!(response.json::<AvailabilityResponse>().slots.is_empty());
}

#[tokio::test]
async fn test_unknown_pitch_is_not_found() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .get(&availability_path(Uuid::new_v4()))
        .add_query_param("date", "2024-06-03")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_missing_date_is_rejected() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server.get(&availability_path(active_pitch_id())).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Validation error: Date parameter is required");
}

#[rstest]
#[case("03/06/2024")]
#[case("2024-13-01")]
#[case("tomorrow")]
#[tokio::test]
async fn test_malformed_date_is_rejected(#[case] date: &str) {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .get(&availability_path(active_pitch_id()))
        .add_query_param("date", date)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let mut store = MockPitchStore::new();
    store
        .expect_get_pitch()
        .returning(|id| Ok(Some(pitch(id, true))));
    store
        .expect_get_schedule()
        .returning(|_| Err(eyre::eyre!("snapshot unavailable")));
    let server = server(Arc::new(store), london(1, 12, 0));

    let response = server
        .get(&availability_path(active_pitch_id()))
        .add_query_param("date", "2024-06-03")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Store error:"));
}

#[tokio::test]
async fn test_store_receives_local_day_range() {
    let mut store = MockPitchStore::new();
    store
        .expect_get_pitch()
        .returning(|id| Ok(Some(pitch(id, true))));
    store.expect_get_schedule().returning(|_| {
        Ok(WeeklySchedule::new(vec![
            pitchbook_core::models::schedule::OperatingWindow::new(
                1,
                chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            ),
        ]))
    });
    store
        .expect_get_closures()
        .withf(|_, range| range.start == london(3, 0, 0) && range.end == london(4, 0, 0))
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    store
        .expect_get_holding_bookings()
        .withf(|_, range| range.start == london(3, 0, 0) && range.end == london(4, 0, 0))
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    let server = server(Arc::new(store), london(1, 12, 0));

    let body: AvailabilityResponse = server
        .get(&availability_path(active_pitch_id()))
        .add_query_param("date", "2024-06-03")
        .await
        .json();

    assert_eq!(availability(&body.slots), vec![true]);
}

#[tokio::test]
async fn test_last_representable_date_has_no_slots() {
    let store = MemoryStore::new();
    store.insert_pitch(pitch(active_pitch_id(), true)).await;
    let weekday = NaiveDate::MAX.weekday().num_days_from_sunday() as u8;
    store
        .insert_window(
            active_pitch_id(),
            OperatingWindow::new(
                weekday,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            ),
        )
        .await
        .unwrap();
    let server = server(Arc::new(store), london(1, 12, 0));

    let response = server
        .get(&availability_path(active_pitch_id()))
        .add_query_param("date", NaiveDate::MAX.format("%Y-%m-%d").to_string())
        .await;

    response.assert_status(StatusCode::OK);
    let body: AvailabilityResponse = response.json();
    assert!(body.slots.is_empty());
}

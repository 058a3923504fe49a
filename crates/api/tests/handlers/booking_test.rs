use axum::http::StatusCode;
use pitchbook_core::booking::{BookingQuote, BookingRequest};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{active_pitch_id, inactive_pitch_id, london, seeded_server};

fn quote_path(id: Uuid) -> String {
    format!("/api/pitches/{}/quote", id)
}

#[tokio::test]
async fn test_quote_for_free_range() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .post(&quote_path(active_pitch_id()))
        .json(&BookingRequest {
            start: london(3, 11, 0),
            end: london(3, 12, 30),
        })
        .await;

    response.assert_status(StatusCode::OK);
    let quote: BookingQuote = response.json();
    assert_eq!(quote.pitch_id, active_pitch_id());
    assert_eq!(quote.total_pence, 6750);
    assert_eq!(quote.currency, "gbp");
}

#[tokio::test]
async fn test_quote_ignores_touching_booking() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .post(&quote_path(active_pitch_id()))
        .json(&json!({
            "start": "2024-06-03T08:00:00Z",
            "end": "2024-06-03T09:00:00Z"
        }))
        .await;

    // 09:00-10:00 BST ends exactly where the confirmed 10:00 booking starts.
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_quote_conflicts_with_booking() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .post(&quote_path(active_pitch_id()))
        .json(&BookingRequest {
            start: london(3, 10, 30),
            end: london(3, 11, 30),
        })
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("already booked"));
}

#[tokio::test]
async fn test_quote_conflicts_with_closure() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .post(&quote_path(active_pitch_id()))
        .json(&BookingRequest {
            start: london(5, 18, 0),
            end: london(5, 19, 0),
        })
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_quote_rejects_inactive_pitch() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .post(&quote_path(inactive_pitch_id()))
        .json(&BookingRequest {
            start: london(3, 9, 0),
            end: london(3, 10, 0),
        })
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quote_rejects_past_start() {
    let server = seeded_server(london(3, 12, 0)).await;

    let response = server
        .post(&quote_path(active_pitch_id()))
        .json(&BookingRequest {
            start: london(3, 11, 0),
            end: london(3, 12, 0),
        })
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quote_for_unknown_pitch() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .post(&quote_path(Uuid::new_v4()))
        .json(&BookingRequest {
            start: london(3, 9, 0),
            end: london(3, 10, 0),
        })
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quote_rejects_inverted_range() {
    let server = seeded_server(london(1, 12, 0)).await;

    let response = server
        .post(&quote_path(active_pitch_id()))
        .json(&BookingRequest {
            start: london(3, 12, 0),
            end: london(3, 11, 0),
        })
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Validation error: Booking end must be after its start");
}

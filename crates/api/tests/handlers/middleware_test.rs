use axum::http::StatusCode;
use pitchbook_api::middleware::error_handling::{AppError, map_error};
use pitchbook_core::errors::BookingError;
use rstest::rstest;

#[rstest]
#[case(BookingError::NotFound("Pitch not found".to_string()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Conflict("Already booked".to_string()), StatusCode::CONFLICT)]
#[case(BookingError::Store(eyre::eyre!("Store error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    BookingError::Internal(Box::new(std::io::Error::other("Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_report_becomes_store_error() {
    let error = AppError::from(eyre::eyre!("disk full"));

    assert!(matches!(error.0, BookingError::Store(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

//! # Pitchbook API
//!
//! The API crate provides the web server for the pitch availability service.
//! It exposes the slot generator and the booking quote check over HTTP.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Fetch pitch data from the store and call into `pitchbook-core`
//! - **Middleware**: Map domain errors onto HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Pitch data comes from any
//! [`PitchStore`] implementation.

/// Source of the current instant for handlers
pub mod clock;
/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{Router, http::HeaderValue};
use eyre::{Result, WrapErr};
use pitchbook_store::PitchStore;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::clock::{Clock, SystemClock};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust,ignore
/// let state = Arc::new(ApiState::new(Arc::new(store)));
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// Read access to pitches, schedules, closures and bookings
    pub store: Arc<dyn PitchStore>,
    /// Decides which slots are already in the past
    pub clock: Arc<dyn Clock>,
}

impl ApiState {
    /// State backed by `store` and the system clock
    pub fn new(store: Arc<dyn PitchStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(store: Arc<dyn PitchStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

/// Builds the application router with all routes attached to `state`
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot availability endpoints
        .merge(routes::availability::routes())
        // Booking quote endpoints
        .merge(routes::booking::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and state
///
/// This function sets up logging, configures routes and middleware, and
/// serves HTTP until the process is stopped.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `state` - Shared state holding the pitch store
///
/// # Example
///
/// ```rust,ignore
/// let config = ApiConfig::from_env()?;
/// let store = MemoryStore::load_from_file(&config.data_file).await?;
/// start_server(config, Arc::new(ApiState::new(Arc::new(store)))).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware; slow requests get a 408
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

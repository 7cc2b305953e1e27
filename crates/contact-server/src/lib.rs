//! Contact Server
//!
//! Backend for the website's contact form. Visitors post name, phone and
//! grade; submissions are validated, stored in an embedded SQLite file and
//! can be listed and counted per day.
//!
//! Routes:
//! - `GET /` health check
//! - `POST /api/contact` submit the form
//! - `GET /api/contacts` list submissions, newest first
//! - `GET /api/stats` total plus counts for the 7 most recent dates

pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiError;
use storage::Database;

/// Local development origins allowed to call the API from a browser
pub const ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://10.12.10.5:5173",
    "http://127.0.0.1:5173",
];

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }
}

/// Build the full HTTP router
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/", get(handlers::health))
        // REST API routes
        .nest("/api", api_routes())
        // Layers
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(handlers::contacts::submit))
        .route("/contacts", get(handlers::contacts::list))
        .route("/stats", get(handlers::stats::stats))
}

// Credentials rule out `*` for methods and headers, so both are mirrored
// from the preflight request instead.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            ALLOWED_ORIGINS.map(HeaderValue::from_static),
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Server-local time as ISO-8601 with microseconds.
///
/// Fixed width, so text ordering matches time ordering.
pub fn now_iso() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

//! Aggregate stats handler

use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use contact_types::ContactStats;
use tracing::error;

pub async fn stats(State(state): State<AppState>) -> Result<Json<ContactStats>, ApiError> {
    let stats = state.db.stats().await.map_err(|e| {
        error!("Failed to compute contact stats: {:#}", e);
        ApiError::Storage(e)
    })?;

    Ok(Json(stats))
}

//! Contact handlers

use crate::error::ApiError;
use crate::{now_iso, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use contact_types::{Contact, ContactForm, CreatedContact, SubmitResponse};
use tracing::{debug, error, info, warn};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Submitted successfully";

pub async fn submit(
    State(state): State<AppState>,
    body: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(form) = body.map_err(|e| {
        warn!("Rejected contact submission body: {}", e.body_text());
        ApiError::from(e)
    })?;

    let contact = form.validate().map_err(|e| {
        warn!("Rejected contact submission: {}", e);
        ApiError::from(e)
    })?;

    // Timestamp is taken at request time, not by the database
    let created_at = now_iso();

    let id = state
        .db
        .insert_contact(&contact, &created_at)
        .await
        .map_err(|e| {
            error!("Failed to store contact: {:#}", e);
            ApiError::Storage(e)
        })?;

    info!("Stored contact {} (grade: {})", id, contact.grade);

    Ok(Json(SubmitResponse {
        success: true,
        message: SUBMIT_SUCCESS_MESSAGE.to_string(),
        data: CreatedContact::new(id, contact),
    }))
}

/// Every submission, newest first.
///
/// No credential check: this listing is open to anyone who can reach the
/// server.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state.db.list_contacts().await.map_err(|e| {
        error!("Failed to list contacts: {:#}", e);
        ApiError::Storage(e)
    })?;

    debug!("Listing {} contacts", contacts.len());
    Ok(Json(contacts))
}

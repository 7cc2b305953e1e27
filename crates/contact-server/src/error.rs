//! API error type
//!
//! Maps validation and storage failures to HTTP status codes and JSON
//! bodies carrying a `detail` field.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contact_types::ValidationError;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// One or more submission fields broke a rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The body could not be decoded as a submission
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    /// Anything that went wrong talking to the database
    #[error("server error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> Value {
        match self {
            ApiError::Validation(err) => err
                .errors
                .iter()
                .map(|e| {
                    json!({
                        "loc": ["body", e.field.to_string()],
                        "msg": e.message,
                        "type": e.kind.to_string(),
                    })
                })
                .collect(),
            ApiError::MalformedBody(rejection) => json!([{
                "loc": ["body"],
                "msg": rejection.body_text(),
                "type": "json_invalid",
            }]),
            ApiError::Storage(_) => Value::String(self.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "detail": self.detail() });
        (self.status(), Json(body)).into_response()
    }
}

//! API Error Taxonomy
//!
//! Every handler-level failure is converted here into a JSON body
//! `{ error, message? }` with the status the cause deserves. Webhook
//! processing failures map to 5xx so the platform's delivery retry fires;
//! every other error must not trigger external retries.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Handler-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid request field
    #[error("{0}")]
    Validation(String),

    /// Unknown resource (e.g. product id)
    #[error("{0}")]
    NotFound(String),

    /// No or invalid session
    #[error("Unauthorized")]
    Unauthorized,

    /// Payment platform key not configured
    #[error("Payments not configured")]
    PaymentsDisabled,

    /// Payment platform call failed
    #[error("{0}")]
    Upstream(String),

    /// Webhook signature verification failed
    #[error("{0}")]
    Signature(String),

    /// Webhook handler failed; the platform will retry the delivery
    #[error("Webhook processing failed: {0}")]
    Webhook(String),

    /// Anything else; details are logged, never sent to the client
    #[error("Internal server error")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".into(), None),
            ApiError::PaymentsDisabled => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Payments not configured".into(),
                Some("Set STRIPE_SECRET_KEY and STRIPE_WEBHOOK_SECRET".into()),
            ),
            ApiError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Payment platform request failed".into(),
                Some(msg),
            ),
            ApiError::Signature(msg) => {
                (StatusCode::BAD_REQUEST, "Invalid signature".into(), Some(msg))
            }
            ApiError::Webhook(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Webhook processing failed".into(),
                None,
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into(), None)
            }
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}

impl From<hub_core::CoreError> for ApiError {
    fn from(err: hub_core::CoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

//! HTTP error response mapping.
//!
//! Every failure, whatever layer it comes from, is translated to a status
//! code and an [`ErrorBody`] here and nowhere else.

use std::any::Any;

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use appliances_domain::error::ApplianceError;

use crate::response::ErrorBody;

/// Errors surfaced by the HTTP layer.
#[derive(Debug)]
pub enum ApiError {
    /// A use-case failed.
    Domain(ApplianceError),
    /// The request body is not valid JSON.
    InvalidJson,
    /// The request body could not be read at all.
    Body(BytesRejection),
    /// No operation matches the path and method.
    RouteNotFound,
    /// A handler failed unexpectedly (e.g. panicked).
    Internal(String),
}

impl From<ApplianceError> for ApiError {
    fn from(err: ApplianceError) -> Self {
        Self::Domain(err)
    }
}

fn server_error(details: String) -> (StatusCode, ErrorBody) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody::new("Server error").with_details(details),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Domain(ApplianceError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("Validation failed")
                    .with_details(serde_json::to_value(&errors).unwrap_or_default()),
            ),
            Self::Domain(ApplianceError::NotFound(_)) | Self::RouteNotFound => {
                (StatusCode::NOT_FOUND, ErrorBody::new("Not found"))
            }
            Self::Domain(ApplianceError::Conflict(err)) => (
                StatusCode::CONFLICT,
                ErrorBody::new(format!("{} already exists", err.field.to_uppercase())),
            ),
            Self::Domain(ApplianceError::NoChanges) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new("No fields to update"))
            }
            Self::Domain(ApplianceError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                server_error(err.to_string())
            }
            Self::InvalidJson => (StatusCode::BAD_REQUEST, ErrorBody::new("Invalid JSON")),
            Self::Body(rejection) => (rejection.status(), ErrorBody::new(rejection.body_text())),
            Self::Internal(details) => server_error(details),
        };

        (status, Json(body)).into_response()
    }
}

/// Convert a handler panic into the generic 500 envelope.
///
/// Used with [`tower_http::catch_panic::CatchPanicLayer::custom`].
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "handler panicked".to_string()
    };
    tracing::error!(%details, "handler panicked");
    ApiError::Internal(details).into_response()
}

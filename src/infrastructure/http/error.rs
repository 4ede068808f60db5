//! HTTP Error Mapping
//!
//! Maps the core taxonomy onto status codes: INVALID is 400, NOT_FOUND
//! is 404, CONFLICT is 409, INTERNAL is 500. Only public errors expose
//! their message; internal failures surface the status text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::domain::error::CoreError;

/// Error payload of every non-2xx response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Core error carried across the axum boundary
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CoreError::Invalid(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::AlreadyAssigned => StatusCode::CONFLICT,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let CoreError::Internal(message) = &self.0 {
            error!(error = %message, "request failed");
        }

        let message = if self.0.is_public() {
            self.0.to_string()
        } else {
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

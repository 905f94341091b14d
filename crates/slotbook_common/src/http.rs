// --- File: crates/slotbook_common/src/http.rs ---
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::error::{HttpStatusCode, SchedulingError};

pub mod client;

/// The `{ error, details }` envelope every endpoint fails with.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Fixed, per-endpoint summary such as "Failed to create event".
    pub error: String,
    /// Human-readable message taken from the underlying failure.
    pub details: String,
}

/// A `SchedulingError` tagged with the summary of the endpoint it came from.
#[derive(Debug)]
pub struct ApiError {
    pub summary: &'static str,
    pub error: SchedulingError,
}

impl ApiError {
    pub fn new(summary: &'static str, error: SchedulingError) -> Self {
        Self { summary, error }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.summary.to_string(),
            details: self.error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Unwraps a JSON body extracted as `Result<Json<T>, JsonRejection>`.
///
/// Malformed JSON, a wrong-typed field, an unknown field or a wrong content
/// type all become a 400 envelope carrying the rejection text.
pub fn accept_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    summary: &'static str,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            let details = rejection.body_text();
            warn!(status = %rejection.status(), "Rejected request body: {}", details);
            Err(ApiError::new(summary, SchedulingError::InvalidRequest(details)))
        }
    }
}

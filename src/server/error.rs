use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Client-facing failures of the HTTP layer. Scoring itself never fails.
#[derive(Debug)]
pub enum ApiError {
    /// Body could not be read as the expected JSON shape.
    MalformedBody { status: StatusCode, message: String },
    /// Body parsed but violates the schema.
    Validation(Vec<String>),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: Vec<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody { status, .. } => *status,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::MalformedBody { message, .. } => ErrorBody {
                error: "malformed request body".to_string(),
                details: vec![message],
            },
            ApiError::Validation(errors) => ErrorBody {
                error: "validation failed".to_string(),
                details: errors,
            },
        };
        (status, Json(body)).into_response()
    }
}

//! Mapping of domain errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use layerx_core::CoreError;

use crate::http::responses::ErrorResponse;

/// Error returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Core(e) => match e {
                CoreError::NotFound { .. }
                | CoreError::NodeNotFound(_)
                | CoreError::UnknownProvider(_) => StatusCode::NOT_FOUND,
                CoreError::DuplicateTask(..)
                | CoreError::Conflict { .. }
                | CoreError::InvalidTransition { .. } => StatusCode::CONFLICT,
                CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Core(e) => e.kind(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

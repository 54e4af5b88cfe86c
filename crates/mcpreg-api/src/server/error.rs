//! API errors and their JSON bodies

use axum::response::{IntoResponse, Json, Response};
use http::StatusCode;
use mcpreg_core::RegistryError;
use serde::{Deserialize, Serialize};

/// JSON error body: `{"error": "...", "message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Name or name/version could not be resolved
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// No route matched
    #[error("The endpoint {path} does not exist")]
    RouteNotFound { path: String },

    /// A handler failed unexpectedly
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Registry(_) | ApiError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short error label placed in the `error` field
    pub fn label(&self) -> &'static str {
        match self {
            ApiError::Registry(_) => "Server not found",
            ApiError::RouteNotFound { .. } => "Not found",
            ApiError::Internal(_) => "Internal server error",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.label().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

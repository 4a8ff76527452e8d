use assets_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Message returned for every failure that is not a domain error.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce plain-text error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `assets_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An unexpected failure. The message is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The status code and caller-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => {
                let status = match core {
                    CoreError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
                    CoreError::NotAllowed { .. } => StatusCode::FORBIDDEN,
                    CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                    CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                    CoreError::Internal(_) => {
                        return (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            INTERNAL_ERROR_MESSAGE.to_string(),
                        )
                    }
                };
                (status, core.to_string())
            }
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Core(CoreError::Unauthorized { reason }) => {
                tracing::debug!(%reason, "Rejected unauthenticated request");
            }
            AppError::Core(CoreError::Internal(msg)) | AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
            }
            _ => {}
        }

        self.status_and_message().into_response()
    }
}

//! JWT-based authentication extractor for Axum handlers.

use assets_core::error::CoreError;
use assets_core::permissions::Permission;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub email: String,
    pub permissions: Vec<Permission>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|e| unauthorized(format!("Invalid or expired token: {e}")))?;

        Ok(AuthUser {
            username: claims.sub,
            email: claims.email,
            permissions: claims.permissions,
        })
    }
}

fn unauthorized(reason: impl Into<String>) -> AppError {
    AppError::Core(CoreError::Unauthorized {
        reason: reason.into(),
    })
}

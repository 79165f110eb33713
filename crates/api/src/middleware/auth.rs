//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use devtrack_core::error::CoreError;
use devtrack_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's email address (from `claims.email`).
    pub email: String,
}

/// All rejection paths return the same message so a caller cannot tell a
/// missing header from a malformed or expired token.
fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid or missing authentication token".into(),
    ))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(unauthorized)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| unauthorized())?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

//! Handlers for the `/auth` resource (register, login).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use devtrack_core::error::CoreError;
use devtrack_db::models::user::{CreateUser, UserResponse};
use devtrack_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
///
/// Fields are optional at the deserialization layer so that missing values
/// surface as a validation error rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Response body for `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication response returned by login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a new account. Returns the public user info; the password is
/// stored as an Argon2id hash and never echoed back.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(input) = payload
        .map_err(|e| AppError::InternalError(format!("Unreadable request body: {e}")))?;

    // 1. Both fields must be present and non-empty (empty strings count
    //    as missing, matching the web client's falsy checks).
    let (email, password) = match (non_empty(input.email), non_empty(input.password)) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Email and password are required".into(),
            )))
        }
    };

    // 2. Reject duplicate emails.
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Validation(
            "An account with this email already exists".into(),
        )));
    }

    // 3. Hash the password and create the user.
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        email,
        password_hash,
        name: non_empty(input.name),
    };
    let user = UserRepo::create(&state.pool, &input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { user: user.into() }),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with email + password. Returns a signed session token plus
/// the public user info.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(input) = payload
        .map_err(|e| AppError::InternalError(format!("Unreadable request body: {e}")))?;

    // 1. Both credentials must be present. Missing fields, an unknown email
    //    and a wrong password all produce the identical response.
    let (email, password) = match (non_empty(input.email), non_empty(input.password)) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(invalid_credentials()),
    };

    // 2. Find user by email.
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    // 3. Verify password.
    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(invalid_credentials());
    }

    // 4. Issue the session token.
    let token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Empty strings behave as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// Registration and login endpoints
///
/// # Endpoints
///
/// - `POST /registrar` - Register a new account
/// - `POST /login` - Exchange email and password for a bearer token

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Json};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::jwt::{create_token, Claims},
    models::{normalize_email, AccountResponse},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,

    /// Email address (login identifier)
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Normalized account email
    pub email: String,

    /// Bearer token for the `Authorization` header
    pub token: String,
}

/// Register a new account
///
/// The email is trimmed and lowercased before validation.
///
/// # Endpoint
///
/// ```text
/// POST /registrar
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "a@x.com",
///   "password": "pw"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the account (never the password hash):
///
/// ```json
/// {
///   "id": "uuid",
///   "username": "alice",
///   "email": "a@x.com",
///   "created_at": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Email already registered
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(mut req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AccountResponse>)> {
    req.email = normalize_email(&req.email);
    req.validate()?;

    let account = state
        .accounts
        .register(&req.username, &req.email, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "email": "a@x.com",
///   "password": "pw"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "email": "a@x.com",
///   "token": "eyJ..."
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password (not distinguished)
/// - `422 Unprocessable Entity`: Validation failed
pub async fn login(
    State(state): State<AppState>,
    Json(mut req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.email = normalize_email(&req.email);
    req.validate()?;

    let identity = state.accounts.authenticate(&req.email, &req.password).await?;

    let claims = Claims::with_expiration(
        identity.account_id,
        identity.email.clone(),
        identity.name,
        Duration::hours(state.config.jwt.expiration_hours),
    );
    let token = create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        email: identity.email,
        token,
    }))
}

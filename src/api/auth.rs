//! Authentication API endpoints
//!
//! Handles HTTP requests for user authentication:
//! - POST /api/register - Create an account and log it in
//! - POST /api/login - User login
//! - POST /api/logout - User logout
//! - GET /api/user - Get current user
//!
//! Successful register/login responses set an `HttpOnly` session cookie;
//! logout clears it.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::api::middleware::{extract_session_token, ApiError, AppState, AuthenticatedUser};
use crate::api::validate::{as_object, optional_string, required_string};
use crate::models::User;
use crate::services::user::{LoginInput, RegisterInput, UserServiceError};

/// Build the session cookie for a fresh login
fn session_cookie(state: &AppState, token: &str) -> HeaderMap {
    let max_age = state.config.session.expiration_days * 24 * 60 * 60;
    let cookie = format!(
        "session={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        token, max_age
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).expect("cookie value is always valid ASCII"),
    );
    headers
}

fn parse_register(body: &Value) -> Result<RegisterInput, String> {
    let body = as_object(body)?;
    Ok(RegisterInput {
        username: required_string(body, "username")?,
        password: required_string(body, "password")?,
        email: required_string(body, "email")?,
        phone: optional_string(body, "phone")?,
    })
}

fn parse_login(body: &Value) -> Result<LoginInput, String> {
    let body = as_object(body)?;
    Ok(LoginInput {
        username: required_string(body, "username")?,
        password: required_string(body, "password")?,
    })
}

/// POST /api/register - User registration
///
/// Creates the account and immediately authenticates it. An existing
/// username is a conflict and leaves the store untouched.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = parse_register(&body).map_err(ApiError::validation_error)?;
    let password = input.password.clone();

    let user = state.user_service.register(input).await.map_err(|e| match e {
        UserServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        UserServiceError::UserExists(msg) => ApiError::conflict(msg),
        _ => ApiError::internal_error(e.to_string()),
    })?;

    // Establish the first session for the new account
    let session = state
        .user_service
        .login(LoginInput::new(user.username.as_str(), password.as_str()))
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    Ok((StatusCode::CREATED, session_cookie(&state, &session.id), Json(user)))
}

/// POST /api/login - User login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let input = parse_login(&body).map_err(ApiError::validation_error)?;

    let session = state.user_service.login(input).await.map_err(|e| match e {
        UserServiceError::AuthenticationError(_) => {
            ApiError::unauthorized("Invalid username or password")
        }
        _ => ApiError::internal_error(e.to_string()),
    })?;

    let user = state
        .user_service
        .get_by_id(session.user_id)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?
        .ok_or_else(|| ApiError::internal_error("Session user vanished"))?;

    Ok((session_cookie(&state, &session.id), Json(user)))
}

/// POST /api/logout - User logout
///
/// Requires authentication. Destroys the caller's session and clears the
/// cookie.
pub async fn logout(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = extract_session_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

    state
        .user_service
        .logout(&token)
        .await
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    let clear_cookie = "session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";
    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::SET_COOKIE, HeaderValue::from_static(clear_cookie));

    Ok((StatusCode::NO_CONTENT, response_headers))
}

/// GET /api/user - Get current user
///
/// Requires authentication.
pub async fn current_user(user: AuthenticatedUser) -> Json<User> {
    Json(user.0)
}

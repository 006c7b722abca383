//! Auth handlers: register, login, logout, me.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use biblios_auth::cookie::{removal_cookie, session_cookie};
use biblios_core::error::AppError;
use biblios_service::account;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .account_service
        .register(account::RegisterRequest {
            username: req.username,
            email: req.email,
            password: req.password,
            display_name: req.display_name,
        })
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/auth/login
///
/// On success the signed session token is set as an httpOnly cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<UserResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state
        .account_service
        .login(&req.username, &req.password)
        .await?;

    let jar = jar.add(session_cookie(&state.config.auth, outcome.token));
    Ok((jar, Json(ApiResponse::ok(outcome.user.into()))))
}

/// POST /api/auth/logout
///
/// Clears the session cookie. Sessions are stateless, so expiring the
/// cookie ends the session.
pub async fn logout(
    State(state): State<AppState>,
    _auth: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    let jar = jar.add(removal_cookie(&state.config.auth));
    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse::new(
            "Logged out successfully",
        ))),
    ))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.account_service.current_user(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

use auth::ACCESS_TOKEN_TTL_MINUTES;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::require_field;
use super::ApiError;
use super::INVALID_CREDENTIALS_MESSAGE;
use crate::admin::errors::AdminError;
use crate::domain::admin::ports::AdminServicePort;
use crate::inbound::http::router::AppState;

/// Exchange administrator credentials for an access and refresh token pair.
///
/// Every authentication failure is a 401 with the same message, including a
/// credential store outage. Store errors are logged.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<(StatusCode, Json<LoginResponseData>), ApiError> {
    let Json(body) = body?;
    require_field("username", &body.username)?;
    require_field("password", &body.password)?;

    let principal = state
        .admin_service
        .authenticate(&body.username, &body.password)
        .await
        .map_err(|e| {
            if !matches!(e, AdminError::InvalidCredentials) {
                tracing::error!(error = %e, "Credential lookup failed during login");
            }
            ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
        })?;

    let token = state
        .token_service
        .issue_access_token(&principal.username, &principal.role)
        .map_err(ApiError::internal)?;

    let refresh_token = state
        .token_service
        .issue_refresh_token(&principal.username)
        .map_err(ApiError::internal)?;

    tracing::info!(username = %principal.username, "Administrator logged in");

    Ok((
        StatusCode::OK,
        Json(LoginResponseData {
            token,
            refresh_token,
            username: principal.username,
            role: principal.role,
            expires_at: access_token_expiry(),
        }),
    ))
}

/// Access-token expiry reported to clients.
///
/// Recomputed from the current clock rather than read back from the issued
/// claims, so it can land a moment after the signed `exp`.
pub(super) fn access_token_expiry() -> i64 {
    (Utc::now() + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)).timestamp()
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub refresh_token: String,
    pub username: String,
    pub role: String,
    /// Access-token expiry, Unix seconds
    pub expires_at: i64,
}

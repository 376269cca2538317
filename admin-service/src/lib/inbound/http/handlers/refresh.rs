use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::login::access_token_expiry;
use super::require_field;
use super::ApiError;
use crate::admin::errors::AdminError;
use crate::domain::admin::models::ADMIN_ROLE;
use crate::domain::admin::ports::AdminServicePort;
use crate::inbound::http::router::AppState;

const INVALID_REFRESH_TOKEN_MESSAGE: &str = "Invalid refresh token";

/// Exchange a refresh token for a new access token.
///
/// The administrator is re-read from the store so a deleted account cannot
/// keep refreshing. The refresh token itself is never rotated.
pub async fn refresh(
    State(state): State<AppState>,
    body: Result<Json<RefreshRequestBody>, JsonRejection>,
) -> Result<(StatusCode, Json<RefreshResponseData>), ApiError> {
    let Json(body) = body?;
    require_field("refresh_token", &body.refresh_token)?;

    let claims = state
        .token_service
        .validate_refresh_token(&body.refresh_token)
        .map_err(|e| {
            tracing::warn!(reason = %e, "Refresh token rejected");
            ApiError::Unauthorized(INVALID_REFRESH_TOKEN_MESSAGE.to_string())
        })?;

    let administrator = state
        .admin_service
        .find_by_username(&claims.username)
        .await
        .map_err(|e| {
            match &e {
                AdminError::NotFound(_) => tracing::warn!(
                    username = %claims.username,
                    "Refresh for administrator that no longer exists"
                ),
                other => tracing::error!(error = %other, "Administrator lookup failed during refresh"),
            }
            ApiError::Unauthorized(INVALID_REFRESH_TOKEN_MESSAGE.to_string())
        })?;

    let token = state
        .token_service
        .issue_access_token(&administrator.username, ADMIN_ROLE)
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::OK,
        Json(RefreshResponseData {
            token,
            expires_at: access_token_expiry(),
        }),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequestBody {
    #[serde(default)]
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
    /// Access-token expiry, Unix seconds
    pub expires_at: i64,
}

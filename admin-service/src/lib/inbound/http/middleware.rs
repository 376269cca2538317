use std::sync::Arc;

use auth::JwtError;
use auth::TokenService;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use thiserror::Error;

use crate::domain::admin::models::Principal;
use crate::inbound::http::handlers::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Reason a request was turned away by the auth gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateRejection {
    #[error("Authorization header required")]
    MissingHeader,

    #[error("Invalid authorization header format")]
    MalformedHeader,

    /// Every token validation failure collapses to this for the client.
    #[error("Invalid or expired token")]
    InvalidToken(JwtError),
}

impl From<GateRejection> for ApiError {
    fn from(rejection: GateRejection) -> Self {
        ApiError::Unauthorized(rejection.to_string())
    }
}

/// Middleware that validates access tokens and attaches the [`Principal`]
/// to request extensions.
pub async fn authenticate(
    State(token_service): State<Arc<dyn TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = authorize(req.headers(), token_service.as_ref()).map_err(|rejection| {
        match &rejection {
            GateRejection::InvalidToken(kind) => {
                tracing::warn!(reason = %kind, "Access token rejected");
            }
            other => tracing::debug!(reason = %other, "Request rejected by auth gate"),
        }
        rejection
    })?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Decide whether a request's headers carry a valid access token.
///
/// # Errors
/// * `MissingHeader` - No Authorization header
/// * `MalformedHeader` - Header is not `Bearer <token>` or not visible ASCII
/// * `InvalidToken` - Token failed validation (kind preserved for logging)
pub fn authorize(
    headers: &HeaderMap,
    token_service: &dyn TokenService,
) -> Result<Principal, GateRejection> {
    let token = extract_bearer_token(headers)?;

    let claims = token_service
        .validate_access_token(token)
        .map_err(GateRejection::InvalidToken)?;

    Ok(Principal::new(claims.username, claims.role))
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, GateRejection> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(GateRejection::MissingHeader)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| GateRejection::MalformedHeader)?;

    auth_str
        .strip_prefix(BEARER_PREFIX)
        .ok_or(GateRejection::MalformedHeader)
}

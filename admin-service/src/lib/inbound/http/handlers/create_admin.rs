use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::get_admin::AdministratorData;
use super::require_field;
use super::ApiError;
use super::ApiSuccess;
use crate::admin::errors::PlaintextPasswordError;
use crate::admin::errors::UsernameError;
use crate::domain::admin::models::CreateAdministratorCommand;
use crate::domain::admin::models::PlaintextPassword;
use crate::domain::admin::models::Username;
use crate::domain::admin::ports::AdminServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_admin(
    State(state): State<AppState>,
    body: Result<Json<CreateAdminRequest>, JsonRejection>,
) -> Result<ApiSuccess<AdministratorData>, ApiError> {
    let Json(body) = body?;
    require_field("username", &body.username)?;
    require_field("password", &body.password)?;

    state
        .admin_service
        .create_administrator(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref administrator| ApiSuccess::new(StatusCode::CREATED, administrator.into()))
}

/// HTTP request body for creating an administrator (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAdminRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateAdminRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PlaintextPasswordError),
}

impl CreateAdminRequest {
    fn try_into_command(self) -> Result<CreateAdministratorCommand, ParseCreateAdminRequestError> {
        let username = Username::new(self.username)?;
        let password = PlaintextPassword::new(self.password)?;
        Ok(CreateAdministratorCommand::new(username, password))
    }
}

impl From<ParseCreateAdminRequestError> for ApiError {
    fn from(err: ParseCreateAdminRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

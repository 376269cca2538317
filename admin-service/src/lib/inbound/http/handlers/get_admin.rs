use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::admin::models::Administrator;
use crate::domain::admin::models::AdministratorId;
use crate::domain::admin::ports::AdminServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<AdministratorData>, ApiError> {
    let id = AdministratorId::from_string(&id)
        .ok_or_else(|| ApiError::BadRequest("Invalid ID format".to_string()))?;

    state
        .admin_service
        .find_by_id(id)
        .await
        .map_err(ApiError::from)
        .map(|ref administrator| ApiSuccess::new(StatusCode::OK, administrator.into()))
}

/// Public view of an administrator; the password hash is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdministratorData {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Administrator> for AdministratorData {
    fn from(administrator: &Administrator) -> Self {
        Self {
            id: administrator.id.0,
            username: administrator.username.clone(),
            created_at: administrator.created_at,
        }
    }
}

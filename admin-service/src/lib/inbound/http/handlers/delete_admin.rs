use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::admin::models::AdministratorId;
use crate::domain::admin::ports::AdminServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = AdministratorId::from_string(&id)
        .ok_or_else(|| ApiError::BadRequest("Invalid ID format".to_string()))?;

    state
        .admin_service
        .delete_administrator(id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

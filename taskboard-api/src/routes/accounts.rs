/// Account endpoints
///
/// # Endpoints
///
/// - `GET /usuarios` - List all accounts
/// - `GET /usuarios/:id` - Get one account
/// - `DELETE /usuarios/:id` - Delete your own account (auth)
/// - `GET /usuarios/:id/tarefas` - Tasks assigned to an account

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use taskboard_shared::{
    auth::identity::IdentityClaims,
    models::{AccountResponse, TaskResponse},
};
use uuid::Uuid;

pub async fn list_accounts(State(state): State<AppState>) -> ApiResult<Json<Vec<AccountResponse>>> {
    Ok(Json(state.accounts.list().await?))
}

/// # Errors
///
/// - `404 Not Found`: No account with this ID
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<AccountResponse>> {
    Ok(Json(state.accounts.get(id).await?))
}

/// Delete an account
///
/// Only the account itself may delete it. Tasks assigned to it are kept
/// and become unassigned.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: Token belongs to another account
/// - `404 Not Found`: No account with this ID
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityClaims>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.accounts.delete(&identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the tasks assigned to an account
///
/// # Errors
///
/// - `404 Not Found`: No account with this ID
pub async fn list_account_tasks(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = state.accounts.tasks_for(id).await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Task endpoints
///
/// Reads are public. Creating, updating and deleting need a bearer token, and
/// update/delete are further limited to the task's creator.
///
/// # Endpoints
///
/// - `POST /tarefas` - Create a task (auth)
/// - `GET /tarefas` - List all tasks
/// - `GET /tarefas/:id` - Get one task
/// - `PUT /tarefas/:id` - Update a task (auth, creator only)
/// - `DELETE /tarefas/:id` - Delete a task (auth, creator only)
/// - `GET /tarefas/status/:status` - List tasks with a status

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::identity::IdentityClaims,
    models::{TaskChanges, TaskResponse, TaskStatus},
    services::CreateTask,
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Account the task is for
    pub account_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,

    /// Defaults to `PENDING`
    #[serde(default)]
    pub status: TaskStatus,
}

/// Update task request (replaces all three fields)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,

    pub status: TaskStatus,
}

/// Create a task on behalf of an account
///
/// The caller becomes the task's creator; `account_id` only decides who the
/// task is for.
///
/// # Endpoint
///
/// ```text
/// POST /tarefas
/// Authorization: Bearer eyJ...
/// Content-Type: application/json
///
/// {
///   "account_id": "uuid",
///   "title": "T",
///   "description": "",
///   "status": "PENDING"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: Target account does not exist
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_task(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityClaims>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    req.validate()?;

    let task = state
        .tasks
        .create(
            &identity,
            CreateTask {
                account_id: req.account_id,
                title: req.title,
                description: req.description,
                status: req.status,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = state.tasks.list().await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// # Errors
///
/// - `404 Not Found`: No task with this ID
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    Ok(Json(state.tasks.get(id).await?.into()))
}

/// Update a task's title, description and status
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: Caller is not the creator
/// - `404 Not Found`: No task with this ID
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_task(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityClaims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    req.validate()?;

    let task = state
        .tasks
        .update(
            &identity,
            id,
            TaskChanges {
                title: req.title,
                description: req.description,
                status: req.status,
            },
        )
        .await?;

    Ok(Json(task.into()))
}

/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: Caller is not the creator
/// - `404 Not Found`: No task with this ID
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(identity): Extension<IdentityClaims>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.tasks.delete(&identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List tasks with a given status
///
/// Accepts `PENDING`, `IN_PROGRESS` or `DONE` in any letter case.
///
/// # Errors
///
/// - `400 Bad Request`: Unknown status
pub async fn list_tasks_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let status: TaskStatus = status
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown task status: {}", status)))?;

    let tasks = state.tasks.list_by_status(status).await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

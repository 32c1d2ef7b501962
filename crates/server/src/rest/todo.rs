use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use shared_types::{
    title_is_missing, AppError, CreateTodoRequest, NewTodo, Todo, TodoResponse,
    UpdateTodoRequest, UpdateTodoStatusRequest,
};
use uuid::Uuid;

use super::body::{parse_json, TodoId};
use crate::db::AppState;
use crate::repo::{TodoFields, TodoStore};
use crate::uniqueness;

/// Current time at the precision the store keeps.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// `updated_at` for a mutation of a record created at `created_at`: the current
/// time, or one microsecond past creation when the clock has not yet moved on.
fn touched_at(created_at: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > created_at {
        now
    } else {
        created_at + Duration::microseconds(1)
    }
}

async fn find_existing(store: &dyn TodoStore, id: Uuid) -> Result<Todo, AppError> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Todo not found"))
}

// ---------------------------------------------------------------------------
// POST /api/v1/todos
// ---------------------------------------------------------------------------

/// Create a new to-do item.
#[utoipa::path(
    post,
    path = "/api/v1/todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "To-do created", body = TodoResponse),
        (status = 400, description = "Invalid JSON or missing title", body = AppError),
        (status = 409, description = "Title already in use", body = AppError),
        (status = 500, description = "Database error", body = AppError)
    ),
    tag = "todos"
)]
pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    let req: CreateTodoRequest = parse_json(&body)?;
    if title_is_missing(&req.title) {
        return Err(AppError::missing_title());
    }

    let todo = uniqueness::insert_unique(
        state.store.as_ref(),
        NewTodo::new(req.title, req.description, req.completed, now()),
    )
    .await?;

    tracing::info!(id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

// ---------------------------------------------------------------------------
// GET /api/v1/todos
// ---------------------------------------------------------------------------

/// List every to-do item.
#[utoipa::path(
    get,
    path = "/api/v1/todos",
    responses(
        (status = 200, description = "To-do list", body = Vec<TodoResponse>),
        (status = 500, description = "Database error", body = AppError)
    ),
    tag = "todos"
)]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = state.store.find_all().await?;
    let response: Vec<TodoResponse> = todos.into_iter().map(TodoResponse::from).collect();
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// GET /api/v1/todos/{id}
// ---------------------------------------------------------------------------

/// Get a single to-do item by ID.
#[utoipa::path(
    get,
    path = "/api/v1/todos/{id}",
    params(
        ("id" = String, Path, description = "Todo UUID")
    ),
    responses(
        (status = 200, description = "To-do found", body = TodoResponse),
        (status = 400, description = "Invalid ID", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 500, description = "Database error", body = AppError)
    ),
    tag = "todos"
)]
pub async fn get_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = find_existing(state.store.as_ref(), id).await?;
    Ok(Json(TodoResponse::from(todo)))
}

// ---------------------------------------------------------------------------
// PUT /api/v1/todos/{id}
// ---------------------------------------------------------------------------

/// Replace the title, description and completed flag of a to-do item.
///
/// The target is resolved before the body is read, so an unknown id is a 404
/// whatever the payload looks like.
#[utoipa::path(
    put,
    path = "/api/v1/todos/{id}",
    params(
        ("id" = String, Path, description = "Todo UUID")
    ),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "To-do updated", body = TodoResponse),
        (status = 400, description = "Invalid ID, invalid JSON or missing title", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 409, description = "Title already in use", body = AppError),
        (status = 500, description = "Database error", body = AppError)
    ),
    tag = "todos"
)]
pub async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    body: Bytes,
) -> Result<Json<TodoResponse>, AppError> {
    let store = state.store.as_ref();
    let existing = find_existing(store, id).await?;

    let req: UpdateTodoRequest = parse_json(&body)?;
    if title_is_missing(&req.title) {
        return Err(AppError::missing_title());
    }

    let fields = TodoFields::full(
        req.title,
        req.description,
        req.completed,
        touched_at(existing.created_at),
    );
    if uniqueness::update_unique(store, id, &fields).await? == 0 {
        return Err(AppError::not_found("Todo not found"));
    }

    let todo = find_existing(store, id).await?;
    tracing::info!(id = %todo.id, "todo updated");
    Ok(Json(TodoResponse::from(todo)))
}

// ---------------------------------------------------------------------------
// PATCH /api/v1/todos/{id}/status
// ---------------------------------------------------------------------------

/// Set the completed flag of a to-do item.
#[utoipa::path(
    patch,
    path = "/api/v1/todos/{id}/status",
    params(
        ("id" = String, Path, description = "Todo UUID")
    ),
    request_body = UpdateTodoStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = TodoResponse),
        (status = 400, description = "Invalid ID, invalid JSON or missing completed flag", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 500, description = "Database error", body = AppError)
    ),
    tag = "todos"
)]
pub async fn update_todo_status(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    body: Bytes,
) -> Result<Json<TodoResponse>, AppError> {
    let store = state.store.as_ref();
    let existing = find_existing(store, id).await?;

    let req: UpdateTodoStatusRequest = parse_json(&body)?;
    let completed = req.completed.ok_or_else(AppError::missing_completed)?;

    let fields = TodoFields::status(completed, touched_at(existing.created_at));
    if store.update_fields(id, &fields).await? == 0 {
        return Err(AppError::not_found("Todo not found"));
    }

    let todo = find_existing(store, id).await?;
    tracing::info!(id = %todo.id, completed, "todo status updated");
    Ok(Json(TodoResponse::from(todo)))
}

// ---------------------------------------------------------------------------
// DELETE /api/v1/todos/{id}
// ---------------------------------------------------------------------------

/// Delete a to-do item.
#[utoipa::path(
    delete,
    path = "/api/v1/todos/{id}",
    params(
        ("id" = String, Path, description = "Todo UUID")
    ),
    responses(
        (status = 204, description = "To-do deleted"),
        (status = 400, description = "Invalid ID", body = AppError),
        (status = 404, description = "Not found", body = AppError),
        (status = 500, description = "Database error", body = AppError)
    ),
    tag = "todos"
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<StatusCode, AppError> {

    if state.store.delete_by_id(id).await? == 0 {
        return Err(AppError::not_found("Todo not found"));
    }

    tracing::info!(%id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub mod body;
pub mod todo;

use axum::{routing::{get, patch}, Router};
use crate::db::AppState;

/// Version prefix shared by every REST route.
pub const API_PREFIX: &str = "/api/v1";

/// To-do routes, relative to [`API_PREFIX`].
pub fn todo_router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(todo::list_todos).post(todo::create_todo))
        .route(
            "/todos/{id}",
            get(todo::get_todo).put(todo::update_todo).delete(todo::delete_todo),
        )
        .route("/todos/{id}/status", patch(todo::update_todo_status))
}

/// Build the versioned REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new().nest(API_PREFIX, todo_router())
}

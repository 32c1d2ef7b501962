use axum::Router;
use shared_types::{
    AppError, CreateTodoRequest, ErrorCode, TodoResponse, UpdateTodoRequest,
    UpdateTodoStatusRequest,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::{health, rest};

#[derive(OpenApi)]
#[openapi(
    paths(
        rest::todo::create_todo,
        rest::todo::list_todos,
        rest::todo::get_todo,
        rest::todo::update_todo,
        rest::todo::update_todo_status,
        rest::todo::delete_todo,
        health::health_check,
    ),
    components(schemas(
        TodoResponse, CreateTodoRequest, UpdateTodoRequest, UpdateTodoStatusRequest,
        AppError, ErrorCode,
        health::HealthResponse,
    )),
    tags(
        (name = "todos", description = "To-do item management"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Todo API",
        description = "CRUD API for to-do items with unique titles",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`,
/// the health check at `/health`, and the REST API at `/api/v1/*`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}

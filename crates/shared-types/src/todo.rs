use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Domain Structs
// ---------------------------------------------------------------------------

/// A stored to-do item.
///
/// `id` is assigned by the store on insert and never changes afterwards.
/// `created_at` is fixed at creation; `updated_at` moves on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A to-do that has not been stored yet, so it has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewTodo {
    /// Build a new record with both timestamps set to `now`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        completed: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the id the store assigned.
    pub fn with_id(self, id: Uuid) -> Todo {
        Todo {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Request/Response DTOs
// ---------------------------------------------------------------------------

/// API response for a to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id.to_string(),
            title: t.title,
            description: t.description,
            completed: t.completed,
            created_at: t.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            updated_at: t.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// Request body for creating a to-do. Any `id` sent by the client is ignored.
///
/// `title` defaults to empty so a missing title is reported as `MISSING_TITLE`
/// rather than as malformed JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request body for a full update. Omitted fields reset to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request body for `PATCH /todos/{id}/status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateTodoStatusRequest {
    pub completed: Option<bool>,
}

/// True when a submitted title counts as absent. Only the empty string does;
/// whitespace is a title like any other.
pub fn title_is_missing(title: &str) -> bool {
    title.is_empty()
}

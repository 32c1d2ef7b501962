pub mod memory;
pub mod todo;

pub use memory::InMemoryTodoStore;
pub use todo::PgTodoStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_types::{NewTodo, Todo};
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by a [`TodoStore`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// The storage-level unique index on `title` rejected the write.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Partial field set applied by [`TodoStore::update_fields`].
///
/// `None` leaves the stored value untouched. `updated_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl TodoFields {
    /// Fields written by a full update.
    pub fn full(
        title: String,
        description: String,
        completed: bool,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: Some(title),
            description: Some(description),
            completed: Some(completed),
            updated_at,
        }
    }

    /// Fields written by a status update.
    pub fn status(completed: bool, updated_at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            description: None,
            completed: Some(completed),
            updated_at,
        }
    }

    pub(crate) fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = description.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        todo.updated_at = self.updated_at;
    }
}

/// Persistence operations for the single collection of to-dos.
///
/// Passed to handlers as `Arc<dyn TodoStore>` inside [`crate::db::AppState`], so
/// tests can swap the Postgres store for [`InMemoryTodoStore`] or a wrapper.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Round-trip to the backing store to prove it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Create the unique index on `title`. Idempotent.
    async fn ensure_unique_title_index(&self) -> Result<(), StoreError>;

    /// Find a to-do with exactly this title, skipping the record whose id is
    /// `exclude_id`.
    async fn find_by_title(
        &self,
        title: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Todo>, StoreError>;

    /// Store a new to-do and return the id assigned to it.
    async fn insert(&self, todo: &NewTodo) -> Result<Uuid, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError>;

    /// Apply `fields` to the record with `id`. Returns the matched count (0 or 1).
    async fn update_fields(&self, id: Uuid, fields: &TodoFields) -> Result<u64, StoreError>;

    /// Returns the deleted count (0 or 1).
    async fn delete_by_id(&self, id: Uuid) -> Result<u64, StoreError>;

    /// All stored to-dos ordered by `created_at`, then `id`. Empty when none exist.
    async fn find_all(&self) -> Result<Vec<Todo>, StoreError>;

    /// Release pooled connections. Called once during shutdown.
    async fn close(&self) {}
}

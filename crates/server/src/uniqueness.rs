//! Title uniqueness checks.
//!
//! The pre-checks here give clean `DUPLICATE_TITLE` responses, but two writers can
//! both pass a check before either writes. The unique index on `todos.title` is
//! what actually serializes conflicting writes; [`insert_unique`] and
//! [`update_unique`] translate its rejection into the same `DUPLICATE_TITLE`
//! outcome.

use shared_types::{AppError, NewTodo, Todo};
use uuid::Uuid;

use crate::repo::{StoreError, TodoFields, TodoStore};

/// Reject `title` if any stored to-do already uses it.
pub async fn check_new_title(store: &dyn TodoStore, title: &str) -> Result<(), AppError> {
    ensure_available(store, title, None).await
}

/// Reject `title` if a to-do other than `id` already uses it.
pub async fn check_renamed_title(
    store: &dyn TodoStore,
    title: &str,
    id: Uuid,
) -> Result<(), AppError> {
    ensure_available(store, title, Some(id)).await
}

async fn ensure_available(
    store: &dyn TodoStore,
    title: &str,
    exclude_id: Option<Uuid>,
) -> Result<(), AppError> {
    match store.find_by_title(title, exclude_id).await {
        Ok(None) => Ok(()),
        Ok(Some(existing)) => {
            tracing::debug!(%title, existing_id = %existing.id, "title already in use");
            Err(AppError::duplicate_title())
        }
        // Not-found is "available"; any other failure must not be read as unique.
        Err(StoreError::NotFound) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Check the title, then insert. Returns the stored record.
pub async fn insert_unique(store: &dyn TodoStore, todo: NewTodo) -> Result<Todo, AppError> {
    check_new_title(store, &todo.title).await?;
    let id = store.insert(&todo).await?;
    Ok(todo.with_id(id))
}

/// Check the new title against every other record, then apply `fields`.
/// Returns the matched count.
pub async fn update_unique(
    store: &dyn TodoStore,
    id: Uuid,
    fields: &TodoFields,
) -> Result<u64, AppError> {
    if let Some(title) = &fields.title {
        check_renamed_title(store, title, id).await?;
    }
    Ok(store.update_fields(id, fields).await?)
}

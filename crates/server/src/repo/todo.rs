use async_trait::async_trait;
use shared_types::{NewTodo, Todo};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{StoreError, TodoFields, TodoStore};
use crate::error_convert::SqlxErrorExt;

/// Name of the storage-level unique index on `todos.title`.
pub const TITLE_INDEX: &str = "todos_title_key";

/// Postgres-backed to-do store.
#[derive(Clone)]
pub struct PgTodoStore {
    pool: Pool<Postgres>,
}

impl PgTodoStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_store_error)?;

        Ok(())
    }

    async fn ensure_unique_title_index(&self) -> Result<(), StoreError> {
        sqlx::query(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {TITLE_INDEX} ON todos (title)"
        ))
        .execute(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_store_error)?;

        Ok(())
    }

    async fn find_by_title(
        &self,
        title: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM todos
            WHERE title = $1 AND ($2::uuid IS NULL OR id <> $2)
            LIMIT 1
            "#,
        )
        .bind(title)
        .bind(exclude_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_store_error)?;

        Ok(row)
    }

    async fn insert(&self, todo: &NewTodo) -> Result<Uuid, StoreError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO todos (title, description, completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_store_error)?;

        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_store_error)?;

        Ok(row)
    }

    async fn update_fields(&self, id: Uuid, fields: &TodoFields) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                completed = COALESCE($4, completed),
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(fields.title.as_deref())
        .bind(fields.description.as_deref())
        .bind(fields.completed)
        .bind(fields.updated_at)
        .execute(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_store_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_store_error)?;

        Ok(result.rows_affected())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed, created_at, updated_at
            FROM todos
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(SqlxErrorExt::into_store_error)?;

        Ok(rows)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

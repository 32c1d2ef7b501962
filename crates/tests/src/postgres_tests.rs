//! Store tests against a live Postgres. Run with
//! `DATABASE_URL=postgres://... cargo test -p tests -- --ignored`.

use chrono::{SubsecRound, Utc};
use pretty_assertions::assert_eq;
use server::repo::{PgTodoStore, StoreError, TodoFields, TodoStore};
use shared_types::NewTodo;
use sqlx::postgres::PgPoolOptions;

async fn pg_store() -> PgTodoStore {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to Postgres");
    server::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let store = PgTodoStore::new(pool);
    store.ensure_unique_title_index().await.unwrap();
    store
}

fn unique_title(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

fn new_todo(title: &str) -> NewTodo {
    NewTodo::new(title.to_string(), String::new(), false, Utc::now().trunc_subsecs(6))
}

#[tokio::test]
#[ignore]
async fn test_pg_insert_and_find() {
    let store = pg_store().await;
    let title = unique_title("pg-insert");

    let id = store.insert(&new_todo(&title)).await.unwrap();
    let found = store.find_by_id(id).await.unwrap().expect("row should exist");

    assert_eq!(found.title, title);
    assert_eq!(found.created_at, found.updated_at);
    assert_eq!(store.find_by_title(&title, None).await.unwrap().map(|t| t.id), Some(id));
    assert!(store.find_by_title(&title, Some(id)).await.unwrap().is_none());

    store.delete_by_id(id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_pg_unique_index_rejects_duplicate_insert() {
    let store = pg_store().await;
    let title = unique_title("pg-dup");

    let id = store.insert(&new_todo(&title)).await.unwrap();
    let err = store.insert(&new_todo(&title)).await.unwrap_err();

    assert!(matches!(err, StoreError::DuplicateKey(_)), "got {err:?}");
    store.delete_by_id(id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_pg_unique_index_rejects_duplicate_rename() {
    let store = pg_store().await;
    let taken = unique_title("pg-taken");
    let free = unique_title("pg-free");

    let a = store.insert(&new_todo(&taken)).await.unwrap();
    let b = store.insert(&new_todo(&free)).await.unwrap();

    let fields = TodoFields::full(taken.clone(), String::new(), false, Utc::now());
    let err = store.update_fields(b, &fields).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey(_)), "got {err:?}");

    store.delete_by_id(a).await.unwrap();
    store.delete_by_id(b).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_pg_update_and_delete_counts() {
    let store = pg_store().await;
    let id = store.insert(&new_todo(&unique_title("pg-count"))).await.unwrap();

    let matched = store
        .update_fields(id, &TodoFields::status(true, Utc::now()))
        .await
        .unwrap();
    assert_eq!(matched, 1);
    assert!(store.find_by_id(id).await.unwrap().unwrap().completed);

    assert_eq!(store.delete_by_id(id).await.unwrap(), 1);
    assert_eq!(store.delete_by_id(id).await.unwrap(), 0);
    assert_eq!(
        store
            .update_fields(id, &TodoFields::status(false, Utc::now()))
            .await
            .unwrap(),
        0
    );
}

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{self, TODOS};

#[tokio::test]
async fn test_list_todos_empty_is_array() {
    let (app, _store) = common::test_app().await;

    let (status, headers, body) = common::get_raw(&app, TODOS).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(body, b"[]".to_vec());
}

#[tokio::test]
async fn test_list_todos_returns_all_in_creation_order() {
    let (app, _store) = common::test_app().await;

    let first = common::create_todo(&app, "first").await;
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second = common::create_todo(&app, "second").await;

    let (status, response) = common::get(&app, TODOS).await;

    assert_eq!(status, StatusCode::OK);
    let items = response.as_array().expect("list should be an array");
    assert_eq!(items.len(), 2);
    let ids: Vec<&str> = items.iter().map(|t| t["id"].as_str().unwrap()).collect();
    assert!(ids.contains(&first.as_str()));
    assert!(ids.contains(&second.as_str()));
    assert_eq!(items[0]["title"], "first");
}

#[tokio::test]
async fn test_list_todos_reflects_deletes() {
    let (app, _store) = common::test_app().await;

    let id = common::create_todo(&app, "short lived").await;
    common::delete(&app, &common::todo_uri(&id)).await;

    let (status, response) = common::get(&app, TODOS).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, serde_json::json!([]));
}

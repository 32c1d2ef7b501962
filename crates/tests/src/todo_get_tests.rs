use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn test_get_todo_success() {
    let (app, _store) = common::test_app().await;
    let id = common::create_todo(&app, "Read book").await;

    let (status, response) = common::get(&app, &common::todo_uri(&id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["id"], id.as_str());
    assert_eq!(response["title"], "Read book");
}

#[tokio::test]
async fn test_get_todo_twice_is_byte_identical() {
    let (app, _store) = common::test_app().await;
    let id = common::create_todo(&app, "Stable").await;
    let uri = common::todo_uri(&id);

    let (_, _, first) = common::get_raw(&app, &uri).await;
    let (_, _, second) = common::get_raw(&app, &uri).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_todo_invalid_id() {
    let (app, _store) = common::test_app().await;

    let (status, response) = common::get(&app, &common::todo_uri("not-a-valid-id")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "INVALID_ID");
}

#[tokio::test]
async fn test_get_todo_not_found() {
    let (app, _store) = common::test_app().await;

    let missing = uuid::Uuid::new_v4().to_string();
    let (status, response) = common::get(&app, &common::todo_uri(&missing)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["code"], "NOT_FOUND");
    assert!(response["error"].is_string());
}

#[tokio::test]
async fn test_undecodable_id_is_invalid_id_json() {
    let (app, _store) = common::test_app().await;
    let uri = common::todo_uri("%FF");

    let (status, headers, body) = common::get_raw(&app, &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers["content-type"], "application/json");
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["code"], "INVALID_ID");

    let (status, body) = common::put_json(&app, &uri, r#"{"title":"x"}"#).await;
    assert_eq!((status, body["code"].clone()), (StatusCode::BAD_REQUEST, "INVALID_ID".into()));

    let (status, body) =
        common::patch_json(&app, &common::status_uri("%FF"), r#"{"completed":true}"#).await;
    assert_eq!((status, body["code"].clone()), (StatusCode::BAD_REQUEST, "INVALID_ID".into()));

    let (status, body) = common::delete(&app, &uri).await;
    assert_eq!((status, body["code"].clone()), (StatusCode::BAD_REQUEST, "INVALID_ID".into()));
}

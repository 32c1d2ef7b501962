use axum::{body::Body, http::Request, http::StatusCode};
use pretty_assertions::assert_eq;

use crate::common;

fn header<'a>(headers: &'a axum::http::HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .unwrap_or_else(|| panic!("missing header {name}"))
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_preflight_returns_ok_with_empty_body() {
    let (app, store) = common::test_app().await;

    let req = Request::builder()
        .method("OPTIONS")
        .uri(common::TODOS)
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = common::send_raw(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(header(&headers, "access-control-allow-origin"), "*");
    assert_eq!(
        header(&headers, "access-control-allow-methods"),
        "GET, POST, PUT, PATCH, DELETE, OPTIONS"
    );
    assert_eq!(
        header(&headers, "access-control-allow-headers"),
        "Content-Type, Authorization"
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_regular_responses_carry_cors_headers() {
    let (app, _store) = common::test_app().await;

    let (status, headers, _body) = common::get_raw(&app, common::TODOS).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(header(&headers, "access-control-allow-origin"), "*");
    assert!(headers.contains_key("access-control-allow-methods"));
    assert!(headers.contains_key("access-control-allow-headers"));
}

#[tokio::test]
async fn test_error_responses_carry_cors_headers() {
    let (app, _store) = common::test_app().await;

    let (status, headers, _body) = common::get_raw(&app, &common::todo_uri("bad")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header(&headers, "access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_request_id_is_assigned_and_propagated() {
    let (app, _store) = common::test_app().await;

    let (_, headers, _) = common::get_raw(&app, common::TODOS).await;
    assert!(!header(&headers, "x-request-id").is_empty());

    let req = Request::builder()
        .method("GET")
        .uri(common::TODOS)
        .header("x-request-id", "trace-me-123")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = common::send_raw(&app, req).await;
    assert_eq!(header(&headers, "x-request-id"), "trace-me-123");
}

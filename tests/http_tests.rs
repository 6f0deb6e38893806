use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use namedq::http::{ErrorResponse, ValueResponse};
use namedq::{router, QueueRegistry};
use tower::ServiceExt;

fn app() -> (Router, Arc<QueueRegistry>) {
    let registry = Arc::new(QueueRegistry::new());
    (router(registry.clone()), registry)
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn value_of(body: &[u8]) -> String {
    serde_json::from_slice::<ValueResponse>(body).unwrap().value
}

fn error_of(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorResponse>(body).unwrap().error_message
}

#[tokio::test]
async fn test_put_then_get_returns_value() {
    let (app, registry) = app();

    let (status, body) = send(&app, Method::PUT, "/name?v=Alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<String>(&body).unwrap(), "OK");
    assert_eq!(registry.get_queue("name").unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/name").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value_of(&body), "Alice");
}

#[tokio::test]
async fn test_get_preserves_fifo_order() {
    let (app, _) = app();

    for v in ["a", "b", "c"] {
        let (status, _) = send(&app, Method::PUT, &format!("/q1?v={}", v)).await;
        assert_eq!(status, StatusCode::OK);
    }

    for v in ["a", "b", "c"] {
        let (status, body) = send(&app, Method::GET, "/q1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value_of(&body), v);
    }

    let (status, body) = send(&app, Method::GET, "/q1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_of(&body), "Not Found");
}

#[tokio::test]
async fn test_put_decodes_query_value() {
    let (app, _) = app();

    send(&app, Method::PUT, "/greetings?v=hello%20world").await;

    let (_, body) = send(&app, Method::GET, "/greetings").await;
    assert_eq!(value_of(&body), "hello world");
}

#[tokio::test]
async fn test_put_without_value_is_bad_request() {
    let (app, registry) = app();

    for uri in ["/name", "/name?v=", "/name?value=Alice"] {
        let (status, body) = send(&app, Method::PUT, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(error_of(&body), "Bad Request");
    }

    assert_eq!(registry.queue_count(), 0);
}

#[tokio::test]
async fn test_repeated_query_parameters_use_first_value() {
    let (app, registry) = app();

    let (status, body) = send(&app, Method::PUT, "/q?v=a&v=b").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<String>(&body).unwrap(), "OK");
    assert_eq!(registry.get_queue("q").unwrap().len(), 1);

    let start = Instant::now();
    let (status, body) = send(&app, Method::GET, "/q?timeout=1&timeout=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value_of(&body), "a");
    assert!(start.elapsed() < Duration::from_millis(200));

    let (status, body) = send(&app, Method::GET, "/q?timeout=0&timeout=soon").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_of(&body), "Not Found");

    let (status, body) = send(&app, Method::GET, "/q?timeout=soon&timeout=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Bad Request");
}

#[tokio::test]
async fn test_any_queue_name_is_accepted() {
    let (app, registry) = app();

    for name in ["name", "color", "orders", "a.b-c_d"] {
        let (status, _) = send(&app, Method::PUT, &format!("/{}?v=x", name)).await;
        assert_eq!(status, StatusCode::OK, "queue: {}", name);
    }

    assert_eq!(registry.queue_count(), 4);
}

#[tokio::test]
async fn test_queues_are_isolated_by_name() {
    let (app, _) = app();

    send(&app, Method::PUT, "/color?v=red").await;
    send(&app, Method::PUT, "/name?v=Alice").await;

    let (_, body) = send(&app, Method::GET, "/name").await;
    assert_eq!(value_of(&body), "Alice");

    let (status, _) = send(&app, Method::GET, "/name").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/color").await;
    assert_eq!(value_of(&body), "red");
}

#[tokio::test]
async fn test_non_numeric_timeout_is_bad_request() {
    let (app, _) = app();

    for uri in ["/name?timeout=soon", "/name?timeout=-1", "/name?timeout=2.5"] {
        let (status, body) = send(&app, Method::GET, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(error_of(&body), "Bad Request");
    }
}

#[tokio::test]
async fn test_timeout_above_limit_is_bad_request_and_keeps_data() {
    let (app, _) = app();

    send(&app, Method::PUT, "/name?v=Alice").await;

    let (status, body) = send(&app, Method::GET, "/name?timeout=31").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Bad Request");

    let (status, body) = send(&app, Method::GET, "/name").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value_of(&body), "Alice");
}

#[tokio::test]
async fn test_empty_timeout_means_no_wait() {
    let (app, _) = app();

    let start = Instant::now();
    let (status, _) = send(&app, Method::GET, "/name?timeout=").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(start.elapsed() < Duration::from_millis(200));
}

#[tokio::test]
async fn test_get_with_timeout_expires_as_not_found() {
    let (app, registry) = app();

    let start = Instant::now();
    let (status, body) = send(&app, Method::GET, "/idle?timeout=1").await;
    let elapsed = start.elapsed();

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_of(&body), "Not Found");
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_millis(1500));
    assert!(registry.get_queue("idle").unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_get_with_timeout_returns_value_put_while_waiting() {
    let (app, _) = app();

    let waiter = {
        let app = app.clone();
        tokio::spawn(async move {
            let start = Instant::now();
            let (status, body) = send(&app, Method::GET, "/jobs?timeout=10").await;
            (status, body, start.elapsed())
        })
    };

    tokio::time::sleep(Duration::from_millis(300)).await;
    let (status, _) = send(&app, Method::PUT, "/jobs?v=job-1").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body, elapsed) = waiter.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value_of(&body), "job-1");
    assert!(elapsed < Duration::from_secs(2));
}

#[tokio::test]
async fn test_unsupported_method_is_rejected() {
    let (app, _) = app();

    let (status, _) = send(&app, Method::POST, "/name?v=Alice").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

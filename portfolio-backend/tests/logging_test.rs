use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::get,
    Extension, Router,
};
use portfolio_backend::extractors::USER_ID_HEADER;
use portfolio_backend::log_with_context;
use portfolio_backend::logging::{inject_request_context, logging_middleware, RequestContext};
use tower::ServiceExt;

#[tokio::test]
async fn test_structured_logging_macro() {
    // コンテキストなしのログ
    log_with_context!(tracing::Level::INFO, "Test message without context");

    let project_id = 42;
    let paths = vec!["videos/a.mp4".to_string(), "images/b.png".to_string()];

    log_with_context!(
        tracing::Level::INFO,
        "Test message with context",
        "project_id" => project_id,
        "media_paths" => &paths,
        "operation" => "test"
    );

    log_with_context!(
        tracing::Level::ERROR,
        "Error occurred during test",
        "error" => "Test error",
        "project_id" => project_id
    );

    log_with_context!(
        tracing::Level::WARN,
        "Warning during test",
        "warning_type" => "test_warning"
    );

    log_with_context!(
        tracing::Level::DEBUG,
        "Debug information",
        "debug_data" => "test_data"
    );
}

fn test_router() -> Router {
    Router::new()
        .route("/test", get(|| async { "Test response" }))
        .route(
            "/error",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
        )
        .route(
            "/context",
            get(|Extension(context): Extension<RequestContext>| async move {
                format!(
                    "{} {} {}",
                    context.method,
                    context.path,
                    context
                        .user_id
                        .map_or_else(|| "anonymous".to_string(), |id| id.to_string())
                )
            }),
        )
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(inject_request_context))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_logging_middleware_passes_status_through() {
    let app = test_router();

    let ok = app
        .clone()
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_text(ok).await, "Test response");

    let error = app
        .clone()
        .oneshot(Request::builder().uri("/error").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let missing = app
        .oneshot(
            Request::builder()
                .uri("/not-found")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_context_carries_acting_user() {
    let app = test_router();

    let with_user = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/context")
                .header(USER_ID_HEADER, "7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_text(with_user).await, "GET /context 7");

    // 不正なヘッダー値は無視される
    let invalid = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/context")
                .header(USER_ID_HEADER, "someone")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_text(invalid).await, "GET /context anonymous");

    let anonymous = app
        .oneshot(Request::builder().uri("/context").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_text(anonymous).await, "GET /context anonymous");
}

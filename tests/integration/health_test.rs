//! Health check and cross-cutting middleware.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_unavailable_database() {
    let app = TestApp::new().await;

    let resp = app.request("GET", "/api/health", None, None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["status"], "ok");
    assert_eq!(resp.body["database"], "unavailable");
    assert!(resp.body["version"].is_string());
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/documentos")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let resp = app.send(request).await;

    assert!(resp.status.is_success());
    assert_eq!(
        resp.headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

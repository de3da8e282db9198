//! Authentication guard and request validation.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use doctajus_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::new().await;

    let resp = app.request("GET", "/api/documentos", None, None).await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body["statusCode"], 401);
    assert_eq!(resp.body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let app = TestApp::new().await;

    let resp = app
        .request("GET", "/api/auth/profile", None, Some("not.a.jwt"))
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_other_secret_is_rejected() {
    let app = TestApp::new().await;
    let other = TestApp::with_config(|c| c.auth.jwt_secret = "another-secret".into()).await;
    let token = other.token_for(Uuid::new_v4(), UserRole::Admin);

    let resp = app.request("GET", "/api/users", None, Some(&token)).await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_malformed_email() {
    let app = TestApp::new().await;

    let resp = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "not-an-email", "password": "secret123" })),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body["message"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new().await;

    let resp = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "firstName": "Ana",
                "lastName": "Quispe",
                "email": "ana@example.com",
                "password": "short"
            })),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body["message"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_malformed_json_body_is_bad_request() {
    let app = TestApp::new().await;
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ not json"))
        .unwrap();

    let resp = app.send(request).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_path_id_is_bad_request() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), UserRole::Abogado);

    for uri in [
        "/api/documentos/abc",
        "/api/expedientes/123",
        "/api/tareas/not-a-uuid",
    ] {
        let resp = app.request("GET", uri, None, Some(&token)).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(resp.body["message"].as_str().unwrap().contains("Invalid UUID"));
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new().await;

    let resp = app.request("GET", "/api/nothing-here", None, None).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

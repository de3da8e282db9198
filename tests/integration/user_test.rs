//! User management access rules.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use doctajus_entity::user::UserRole;

use crate::helpers::{TestApp, assert_status};

fn new_user_body(email: &str) -> serde_json::Value {
    json!({
        "firstName": "Rosa",
        "lastName": "Huamán",
        "email": email,
        "password": "Secreto123",
        "role": "abogado"
    })
}

#[tokio::test]
async fn test_non_admin_cannot_create_users() {
    let app = TestApp::new().await;

    for role in [UserRole::Cliente, UserRole::Abogado, UserRole::Asistente] {
        let token = app.token_for(Uuid::new_v4(), role);
        let resp = app
            .request(
                "POST",
                "/api/users",
                Some(new_user_body("rosa@example.com")),
                Some(&token),
            )
            .await;
        assert_status(&resp, StatusCode::FORBIDDEN);
        assert_eq!(resp.body["message"], "Only administrators can manage users");
    }
}

#[tokio::test]
async fn test_non_admin_cannot_delete_or_edit_others() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), UserRole::Abogado);
    let uri = format!("/api/users/{}", Uuid::new_v4());

    let resp = app.request("DELETE", &uri, None, Some(&token)).await;
    assert_status(&resp, StatusCode::FORBIDDEN);

    let resp = app
        .request("PATCH", &uri, Some(json!({ "firstName": "Otro" })), Some(&token))
        .await;
    assert_status(&resp, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_client_cannot_list_users() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), UserRole::Cliente);

    let resp = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_status(&resp, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_self_update_cannot_change_role_or_status() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();
    let token = app.token_for(id, UserRole::Cliente);
    let uri = format!("/api/users/{id}");

    for body in [json!({ "role": "admin" }), json!({ "isActive": false })] {
        let resp = app.request("PATCH", &uri, Some(body), Some(&token)).await;
        assert_status(&resp, StatusCode::FORBIDDEN);
        assert_eq!(
            resp.body["message"],
            "Only administrators can change a user's role or status"
        );
    }
}

// ── Database scenarios ─────────────────────────────────────────────

#[tokio::test]
#[ignore = "requires DOCTAJUS_TEST_DATABASE_URL"]
async fn test_client_edits_own_profile_only() {
    let app = TestApp::with_database().await;
    let (token, id) = app.register("Lucia", "lucia@example.com").await;
    let (_, other_id) = app.register("Mario", "mario@example.com").await;

    let resp = app
        .request(
            "PATCH",
            &format!("/api/users/{id}"),
            Some(json!({ "firstName": "Lucía" })),
            Some(&token),
        )
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body["firstName"], "Lucía");
    assert_eq!(resp.body["role"], "cliente");

    let resp = app
        .request(
            "PATCH",
            &format!("/api/users/{id}"),
            Some(json!({ "role": "admin" })),
            Some(&token),
        )
        .await;
    assert_status(&resp, StatusCode::FORBIDDEN);

    let resp = app
        .request(
            "PATCH",
            &format!("/api/users/{other_id}"),
            Some(json!({ "firstName": "Intruso" })),
            Some(&token),
        )
        .await;
    assert_status(&resp, StatusCode::FORBIDDEN);

    let role: String = sqlx::query_scalar("SELECT role::text FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(role, "cliente");
}

#[tokio::test]
#[ignore = "requires DOCTAJUS_TEST_DATABASE_URL"]
async fn test_admin_manages_accounts() {
    let app = TestApp::with_database().await;
    let (admin, _) = app
        .register_as(UserRole::Admin, "Ana", "ana@example.com")
        .await;

    let resp = app
        .request(
            "POST",
            "/api/users",
            Some(new_user_body("rosa@example.com")),
            Some(&admin),
        )
        .await;
    assert_status(&resp, StatusCode::CREATED);
    assert_eq!(resp.body["role"], "abogado");
    assert!(resp.body.get("passwordHash").is_none());
    let uri = format!("/api/users/{}", resp.body["id"].as_str().unwrap());

    let resp = app
        .request(
            "POST",
            "/api/users",
            Some(new_user_body("rosa@example.com")),
            Some(&admin),
        )
        .await;
    assert_status(&resp, StatusCode::CONFLICT);

    let resp = app
        .request("PATCH", &uri, Some(json!({ "isActive": false })), Some(&admin))
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body["isActive"], false);

    let resp = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "rosa@example.com", "password": "Secreto123" })),
            None,
        )
        .await;
    assert_status(&resp, StatusCode::UNAUTHORIZED);

    let resp = app.request("GET", "/api/users", None, Some(&admin)).await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body.as_array().unwrap().len(), 2);

    let resp = app.request("DELETE", &uri, None, Some(&admin)).await;
    assert_status(&resp, StatusCode::NO_CONTENT);

    let resp = app.request("GET", &uri, None, Some(&admin)).await;
    assert_status(&resp, StatusCode::NOT_FOUND);
}

//! Case files and the tasks attached to them.

use axum::http::StatusCode;
use chrono::{Days, NaiveDate, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use doctajus_entity::user::UserRole;

use crate::helpers::{TestApp, assert_status};

#[tokio::test]
async fn test_due_soon_window_is_bounded() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), UserRole::Abogado);

    for dias in ["999999999", "-1"] {
        let resp = app
            .request(
                "GET",
                &format!("/api/tareas?proximasAVencer=true&dias={dias}"),
                None,
                Some(&token),
            )
            .await;
        assert_status(&resp, StatusCode::BAD_REQUEST);
        assert!(resp.body["message"].as_str().unwrap().starts_with("dias"));
    }
}

#[tokio::test]
async fn test_create_expediente_validates_body() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), UserRole::Abogado);

    let resp = app
        .request(
            "POST",
            "/api/expedientes",
            Some(json!({ "numero": "E-1", "titulo": "Caso" })),
            Some(&token),
        )
        .await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
}

// ── Database scenarios ─────────────────────────────────────────────

fn titulos(resp: &Value) -> Vec<&str> {
    resp.as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["titulo"].as_str())
        .collect()
}

async fn create_tarea(
    app: &TestApp,
    token: &str,
    titulo: &str,
    vence: NaiveDate,
    expediente_id: &str,
) -> Value {
    let resp = app
        .request(
            "POST",
            "/api/tareas",
            Some(json!({
                "titulo": titulo,
                "fechaVencimiento": vence,
                "prioridad": "alta",
                "expedienteId": expediente_id,
            })),
            Some(token),
        )
        .await;
    assert_status(&resp, StatusCode::CREATED);
    resp.body
}

#[tokio::test]
#[ignore = "requires DOCTAJUS_TEST_DATABASE_URL"]
async fn test_expediente_crud() {
    let app = TestApp::with_database().await;
    let (token, abogado_id) = app
        .register_as(UserRole::Abogado, "Luis", "luis@example.com")
        .await;
    let (_, cliente_id) = app.register("Lucia", "lucia@example.com").await;

    let resp = app
        .request(
            "POST",
            "/api/expedientes",
            Some(json!({
                "numero": "EXP-2024-001",
                "titulo": "Desalojo por ocupación precaria",
                "tipo": "civil",
                "abogadoId": abogado_id,
                "clienteId": cliente_id,
            })),
            Some(&token),
        )
        .await;
    assert_status(&resp, StatusCode::CREATED);
    assert_eq!(resp.body["estado"], "nuevo");
    let uri = format!("/api/expedientes/{}", resp.body["id"].as_str().unwrap());

    let resp = app
        .request(
            "GET",
            &format!("/api/expedientes?clienteId={cliente_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body.as_array().unwrap().len(), 1);

    let resp = app
        .request(
            "GET",
            &format!("/api/expedientes?abogadoId={}", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert!(resp.body.as_array().unwrap().is_empty());

    let resp = app
        .request(
            "PATCH",
            &uri,
            Some(json!({ "estado": "en_proceso", "tribunal": "Corte Superior de Lima" })),
            Some(&token),
        )
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body["estado"], "en_proceso");
    assert_eq!(resp.body["tribunal"], "Corte Superior de Lima");
    assert_eq!(resp.body["numero"], "EXP-2024-001");

    let resp = app.request("DELETE", &uri, None, Some(&token)).await;
    assert_status(&resp, StatusCode::NO_CONTENT);

    let resp = app.request("GET", &uri, None, Some(&token)).await;
    assert_status(&resp, StatusCode::NOT_FOUND);

    let resp = app.request("DELETE", &uri, None, Some(&token)).await;
    assert_status(&resp, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires DOCTAJUS_TEST_DATABASE_URL"]
async fn test_tarea_due_dates_and_completion() {
    let app = TestApp::with_database().await;
    let (token, _) = app
        .register_as(UserRole::Abogado, "Luis", "luis@example.com")
        .await;

    let resp = app
        .request(
            "POST",
            "/api/expedientes",
            Some(json!({ "numero": "EXP-2024-002", "titulo": "Cobro de soles" })),
            Some(&token),
        )
        .await;
    assert_status(&resp, StatusCode::CREATED);
    let expediente_id = resp.body["id"].as_str().unwrap().to_string();

    let hoy = Utc::now().date_naive();
    let ayer = hoy.checked_sub_days(Days::new(1)).unwrap();
    let vencida = create_tarea(&app, &token, "Contestar demanda", ayer, &expediente_id).await;
    create_tarea(
        &app,
        &token,
        "Audiencia de conciliación",
        hoy.checked_add_days(Days::new(3)).unwrap(),
        &expediente_id,
    )
    .await;
    create_tarea(
        &app,
        &token,
        "Alegatos finales",
        hoy.checked_add_days(Days::new(30)).unwrap(),
        &expediente_id,
    )
    .await;

    let resp = app
        .request("GET", "/api/tareas?vencidas=true", None, Some(&token))
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(titulos(&resp.body), ["Contestar demanda"]);

    let resp = app
        .request("GET", "/api/tareas?proximasAVencer=true", None, Some(&token))
        .await;
    assert_eq!(titulos(&resp.body), ["Audiencia de conciliación"]);

    let resp = app
        .request(
            "GET",
            "/api/tareas?proximasAVencer=true&dias=40",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(
        titulos(&resp.body),
        ["Audiencia de conciliación", "Alegatos finales"]
    );

    let resp = app
        .request(
            "PATCH",
            &format!("/api/tareas/{}/completar", vencida["id"].as_str().unwrap()),
            None,
            Some(&token),
        )
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body["estado"], "completada");

    let resp = app
        .request("GET", "/api/tareas?vencidas=true", None, Some(&token))
        .await;
    assert!(titulos(&resp.body).is_empty());

    let resp = app
        .request(
            "GET",
            &format!("/api/tareas?expedienteId={expediente_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(resp.body.as_array().unwrap().len(), 3);

    // Tasks go with their case.
    let resp = app
        .request(
            "DELETE",
            &format!("/api/expedientes/{expediente_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_status(&resp, StatusCode::NO_CONTENT);
    let resp = app.request("GET", "/api/tareas", None, Some(&token)).await;
    assert!(resp.body.as_array().unwrap().is_empty());
}

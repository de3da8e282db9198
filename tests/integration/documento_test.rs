//! Document endpoints.
//!
//! The first group exercises request parsing only. The scenarios marked
//! `#[ignore]` need PostgreSQL; see `main.rs`.

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use doctajus_entity::user::UserRole;

use crate::helpers::{Part, TestApp, assert_status};

const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n";

fn pdf(name: &'static str, data: &'static [u8]) -> Part<'static> {
    Part::File {
        name: "archivo",
        file_name: name,
        content_type: "application/pdf",
        data,
    }
}

#[tokio::test]
async fn test_create_without_file_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), UserRole::Abogado);

    let resp = app
        .multipart(
            "POST",
            "/api/documentos",
            &[Part::Text("nombre", "Contrato"), Part::Text("tipo", "contrato")],
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.body["message"],
        "Se requiere un archivo para crear el documento"
    );
}

#[tokio::test]
async fn test_create_with_oversized_file_is_rejected() {
    let app = TestApp::with_config(|c| c.storage.max_upload_size_bytes = 16).await;
    let token = app.token_for(Uuid::new_v4(), UserRole::Abogado);

    let resp = app
        .multipart(
            "POST",
            "/api/documentos",
            &[Part::Text("nombre", "Demanda"), pdf("demanda.pdf", PDF_BYTES)],
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(
        resp.body["message"]
            .as_str()
            .unwrap()
            .starts_with("El archivo es demasiado grande")
    );
}

#[tokio::test]
async fn test_create_with_unknown_tipo_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), UserRole::Abogado);

    let resp = app
        .multipart(
            "POST",
            "/api/documentos",
            &[
                Part::Text("nombre", "Escrito"),
                Part::Text("tipo", "memorando"),
                pdf("escrito.pdf", PDF_BYTES),
            ],
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let app = TestApp::new().await;

    let resp = app
        .multipart(
            "POST",
            "/api/documentos",
            &[Part::Text("nombre", "Contrato"), pdf("c.pdf", PDF_BYTES)],
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_rejects_unknown_estado() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), UserRole::Asistente);

    let resp = app
        .request("GET", "/api/documentos?estado=perdido", None, Some(&token))
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_rejects_bad_date() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), UserRole::Asistente);

    let resp = app
        .request("GET", "/api/documentos?fechaDesde=ayer", None, Some(&token))
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_permission_requires_usuario_id() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4(), UserRole::Abogado);
    let uri = format!("/api/documentos/{}/permissions", Uuid::new_v4());

    let resp = app
        .request("POST", &uri, Some(json!({ "tipoPermiso": "lectura" })), Some(&token))
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

// ── Database scenarios ─────────────────────────────────────────────

async fn create_documento(app: &TestApp, token: &str, nombre: &str) -> Value {
    let resp = app
        .multipart(
            "POST",
            "/api/documentos",
            &[
                Part::Text("nombre", nombre),
                Part::Text("tipo", "demanda"),
                Part::Text("etiquetas", "[\"civil\",\"urgente\"]"),
                pdf("demanda.pdf", PDF_BYTES),
            ],
            Some(token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
    resp.body
}

fn id_of(resp: &Value) -> &str {
    resp["id"].as_str().unwrap()
}

#[tokio::test]
#[ignore = "requires DOCTAJUS_TEST_DATABASE_URL"]
async fn test_shared_document_is_read_only_for_reader() {
    let app = TestApp::with_database().await;
    let (owner, _) = app.register("Lucia", "lucia@example.com").await;
    let (reader, reader_id) = app.register("Mario", "mario@example.com").await;

    let doc = create_documento(&app, &owner, "Demanda de alimentos").await;
    let uri = format!("/api/documentos/{}", id_of(&doc));

    let resp = app.request("GET", &uri, None, Some(&reader)).await;
    assert_status(&resp, StatusCode::FORBIDDEN);

    let resp = app
        .request(
            "POST",
            &format!("{uri}/permissions"),
            Some(json!({ "usuarioId": reader_id, "tipoPermiso": "lectura" })),
            Some(&owner),
        )
        .await;
    assert_status(&resp, StatusCode::CREATED);

    let resp = app.request("GET", &uri, None, Some(&reader)).await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body["nombre"], "Demanda de alimentos");

    let resp = app
        .multipart("PATCH", &uri, &[Part::Text("nombre", "Otro")], Some(&reader))
        .await;
    assert_status(&resp, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires DOCTAJUS_TEST_DATABASE_URL"]
async fn test_update_with_file_creates_new_version() {
    let app = TestApp::with_database().await;
    let (owner, _) = app.register("Lucia", "lucia@example.com").await;

    let doc = create_documento(&app, &owner, "Contrato de arrendamiento").await;
    assert_eq!(doc["versionActual"], 1);
    let uri = format!("/api/documentos/{}", id_of(&doc));

    let resp = app
        .multipart(
            "PATCH",
            &uri,
            &[
                Part::Text("descripcionCambios", "Cláusula tercera corregida"),
                pdf("contrato-v2.pdf", b"%PDF-1.4 segunda version"),
            ],
            Some(&owner),
        )
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body["versionActual"], 2);
    assert_eq!(resp.body["archivoNombre"], "contrato-v2.pdf");

    let resp = app
        .request("GET", &format!("{uri}/versions"), None, Some(&owner))
        .await;
    assert_status(&resp, StatusCode::OK);
    let versions = resp.body.as_array().unwrap();
    assert_eq!(versions.len(), 2);

    let resp = app
        .request("GET", &format!("{uri}/history"), None, Some(&owner))
        .await;
    assert_status(&resp, StatusCode::OK);
    let acciones: Vec<&str> = resp
        .body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|h| h["tipoAccion"].as_str())
        .collect();
    assert!(acciones.contains(&"creacion"));
    assert!(acciones.contains(&"nueva_version"));
}

#[tokio::test]
#[ignore = "requires DOCTAJUS_TEST_DATABASE_URL"]
async fn test_owner_permission_is_protected_and_delete_removes() {
    let app = TestApp::with_database().await;
    let (owner, owner_id) = app.register("Lucia", "lucia@example.com").await;

    let doc = create_documento(&app, &owner, "Poder especial").await;
    let uri = format!("/api/documentos/{}", id_of(&doc));

    let resp = app
        .request(
            "DELETE",
            &format!("{uri}/permissions/{owner_id}"),
            None,
            Some(&owner),
        )
        .await;
    assert_status(&resp, StatusCode::BAD_REQUEST);

    let resp = app.request("DELETE", &uri, None, Some(&owner)).await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body["eliminado"], true);

    let resp = app.request("GET", &uri, None, Some(&owner)).await;
    assert_status(&resp, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires DOCTAJUS_TEST_DATABASE_URL"]
async fn test_search_and_visibility() {
    let app = TestApp::with_database().await;
    let (owner, _) = app.register("Lucia", "lucia@example.com").await;
    let (other, _) = app.register("Mario", "mario@example.com").await;

    create_documento(&app, &owner, "Caso Civil 2024").await;
    create_documento(&app, &owner, "Recurso de apelación").await;

    let resp = app
        .request(
            "GET",
            "/api/documentos?busqueda=Caso%20Civil",
            None,
            Some(&owner),
        )
        .await;
    assert_status(&resp, StatusCode::OK);
    let found = resp.body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["nombre"], "Caso Civil 2024");

    let resp = app
        .request("GET", "/api/documentos", None, Some(&other))
        .await;
    assert_status(&resp, StatusCode::OK);
    assert!(resp.body.as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires DOCTAJUS_TEST_DATABASE_URL"]
async fn test_download_records_history() {
    let app = TestApp::with_database().await;
    let (owner, _) = app.register("Lucia", "lucia@example.com").await;

    let doc = create_documento(&app, &owner, "Contestación").await;
    let uri = format!("/api/documentos/{}", id_of(&doc));

    let resp = app
        .request("GET", &format!("{uri}/download"), None, Some(&owner))
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body["nombre"], "demanda.pdf");

    let file_url = resp.body["url"].as_str().unwrap().to_string();
    let resp = app.request("GET", &file_url, None, None).await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.bytes, PDF_BYTES);

    let resp = app
        .request("GET", &format!("{uri}/history"), None, Some(&owner))
        .await;
    let acciones: Vec<&str> = resp
        .body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|h| h["tipoAccion"].as_str())
        .collect();
    assert!(acciones.contains(&"descarga"));
}

async fn historial_count(app: &TestApp, documento_id: &str, tipo_accion: &str) -> i64 {
    let documento_id: Uuid = documento_id.parse().unwrap();
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM documento_historial \
         WHERE documento_id = $1 AND tipo_accion::text = $2",
    )
    .bind(documento_id)
    .bind(tipo_accion)
    .fetch_one(&app.db_pool)
    .await
    .unwrap()
}

#[tokio::test]
#[ignore = "requires DOCTAJUS_TEST_DATABASE_URL"]
async fn test_each_mutation_writes_one_history_row() {
    let app = TestApp::with_database().await;
    let (owner, _) = app.register("Lucia", "lucia@example.com").await;
    let (_, reader_id) = app.register("Mario", "mario@example.com").await;

    let doc = create_documento(&app, &owner, "Escrito de apelación").await;
    let id = id_of(&doc).to_string();
    let uri = format!("/api/documentos/{id}");
    assert_eq!(historial_count(&app, &id, "creacion").await, 1);

    let resp = app
        .multipart("PATCH", &uri, &[Part::Text("descripcion", "Revisado")], Some(&owner))
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(historial_count(&app, &id, "modificacion").await, 1);

    let resp = app
        .request(
            "PATCH",
            &format!("{uri}/estado"),
            Some(json!({ "estado": "finalizado" })),
            Some(&owner),
        )
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body["estado"], "finalizado");
    assert_eq!(historial_count(&app, &id, "cambio_estado").await, 1);

    let resp = app
        .request(
            "PATCH",
            &format!("{uri}/destacado"),
            Some(json!({ "destacado": true })),
            Some(&owner),
        )
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.body["destacado"], true);
    assert_eq!(historial_count(&app, &id, "modificacion").await, 2);

    let resp = app
        .request(
            "POST",
            &format!("{uri}/permissions"),
            Some(json!({ "usuarioId": reader_id, "tipoPermiso": "escritura" })),
            Some(&owner),
        )
        .await;
    assert_status(&resp, StatusCode::CREATED);
    assert_eq!(historial_count(&app, &id, "cambio_permisos").await, 1);

    let resp = app
        .request(
            "DELETE",
            &format!("{uri}/permissions/{reader_id}"),
            None,
            Some(&owner),
        )
        .await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(historial_count(&app, &id, "cambio_permisos").await, 2);

    let resp = app.request("DELETE", &uri, None, Some(&owner)).await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(historial_count(&app, &id, "eliminacion").await, 1);
    // The trail survives the document itself.
    assert_eq!(historial_count(&app, &id, "creacion").await, 1);
}

#[tokio::test]
#[ignore = "requires DOCTAJUS_TEST_DATABASE_URL"]
async fn test_owner_permission_cannot_be_downgraded() {
    let app = TestApp::with_database().await;
    let (owner, owner_id) = app.register("Lucia", "lucia@example.com").await;

    let doc = create_documento(&app, &owner, "Poder general").await;
    let uri = format!("/api/documentos/{}", id_of(&doc));

    let resp = app
        .request(
            "POST",
            &format!("{uri}/permissions"),
            Some(json!({ "usuarioId": owner_id, "tipoPermiso": "lectura" })),
            Some(&owner),
        )
        .await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.body["message"],
        "No se puede modificar el permiso del propietario del documento"
    );

    // Still able to edit.
    let resp = app
        .multipart("PATCH", &uri, &[Part::Text("nombre", "Poder general amplio")], Some(&owner))
        .await;
    assert_status(&resp, StatusCode::OK);
}

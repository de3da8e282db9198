//! Public serving of stored files.

use axum::http::{StatusCode, header};

use crate::helpers::TestApp;

fn header_str<'a>(resp: &'a crate::helpers::TestResponse, name: header::HeaderName) -> &'a str {
    resp.headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_serves_file_in_folder() {
    let app = TestApp::new().await;
    let folder = app.upload_dir.path().join("documentos");
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join("1700000000000-42.pdf"), b"%PDF-1.4 test").unwrap();

    let resp = app
        .request("GET", "/api/uploads/documentos/1700000000000-42.pdf", None, None)
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.bytes, b"%PDF-1.4 test");
    assert_eq!(header_str(&resp, header::CONTENT_TYPE), "application/pdf");
    assert_eq!(
        header_str(&resp, header::CONTENT_DISPOSITION),
        "inline; filename=\"1700000000000-42.pdf\""
    );
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "max-age=3600");
}

#[tokio::test]
async fn test_serves_file_at_root() {
    let app = TestApp::new().await;
    std::fs::write(app.upload_dir.path().join("logo.png"), [0x89, b'P', b'N', b'G']).unwrap();

    let resp = app.request("GET", "/api/uploads/logo.png", None, None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(header_str(&resp, header::CONTENT_TYPE), "image/png");
    assert_eq!(resp.bytes.len(), 4);
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let app = TestApp::new().await;

    let resp = app
        .request("GET", "/api/uploads/documentos/missing.pdf", None, None)
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["statusCode"], 404);
}

#[tokio::test]
async fn test_traversal_is_rejected() {
    let app = TestApp::new().await;

    for uri in [
        "/api/uploads/../secret.txt",
        "/api/uploads/documentos/..%2F..%2Fetc%2Fpasswd",
        "/api/uploads/%2E%2E/secret.txt",
    ] {
        let resp = app.request("GET", uri, None, None).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

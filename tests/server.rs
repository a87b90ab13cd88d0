//! # HTTP API Tests
//!
//! Requests go straight into the router; printing hits an in-memory spooler.

mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{FakeBackend, Outcome, temp_dir};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use struk::config::{Settings, SettingsStore};
use struk::server::{AppState, ServerConfig, router};
use tower::ServiceExt;

struct Harness {
    app: Router,
    backend: Arc<FakeBackend>,
    settings_path: std::path::PathBuf,
}

fn harness(printer: Option<&str>, printers: &[&str]) -> Harness {
    let settings_path = temp_dir("server").join("printer-settings.json");
    let settings = Settings {
        printer_name: printer.map(str::to_string),
        ..Default::default()
    };
    let backend = FakeBackend::new(printers, Outcome::Accept);

    let state = AppState::with_parts(
        ServerConfig {
            settings_path: settings_path.clone(),
            ..Default::default()
        },
        SettingsStore::with_settings(&settings_path, settings),
        backend.clone(),
    );

    Harness {
        app: router(Arc::new(state)),
        backend,
        settings_path,
    }
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let h = harness(Some("POS-80"), &["POS-80"]);
    let (status, body) = call(&h.app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["platform"], "fake");
    assert_eq!(body["configured_printer"], "POS-80");
    assert_eq!(body["store_configured"], true);
}

#[tokio::test]
async fn test_printer_status_marks_selection() {
    let h = harness(Some("PDF"), &["POS-80", "PDF"]);
    let (status, body) = call(&h.app, "GET", "/printer/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["printer_found"], true);
    assert_eq!(body["is_configured"], true);
    assert_eq!(
        body["available_printers"],
        json!([
            {"name": "POS-80", "available": true, "is_selected": false},
            {"name": "PDF", "available": true, "is_selected": true}
        ])
    );
}

#[tokio::test]
async fn test_print_requires_configured_printer() {
    let h = harness(None, &["POS-80"]);
    let (status, body) = call(
        &h.app,
        "POST",
        "/print",
        Some(json!({"items": [{"name": "KOPI", "qty": 1, "price": 1000}]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(h.backend.jobs().is_empty());
}

#[tokio::test]
async fn test_print_rejects_invalid_receipt() {
    let h = harness(Some("POS-80"), &["POS-80"]);
    let (status, body) = call(&h.app, "POST", "/print", Some(json!({"items": []}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Items must not be empty"]));
    assert!(h.backend.jobs().is_empty());
}

#[tokio::test]
async fn test_print_sends_receipt() {
    let h = harness(Some("POS-80"), &["POS-80"]);
    let (status, body) = call(
        &h.app,
        "POST",
        "/print",
        Some(json!({
            "items": [{"name": "KOPI", "qty": 2, "price": 10000}],
            "cashier": "Sari"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Job cetak berhasil dikirim ke POS-80");
    assert_eq!(body["data"], json!({"items_count": 1, "total": 20000.0}));

    let jobs = h.backend.jobs();
    assert_eq!(jobs.len(), 1);
    assert!(jobs[0].bytes.ends_with(&[0x1D, 0x56, 0x00]));
}

#[tokio::test]
async fn test_print_accepts_numeric_invoice_fields() {
    let h = harness(Some("POS-80"), &["POS-80"]);
    let (status, body) = call(
        &h.app,
        "POST",
        "/print",
        Some(json!({
            "items": [{"name": "KOPI", "qty": 1, "price": 1000}],
            "trx_id": 1001,
            "payment_amount": "5000"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let jobs = h.backend.jobs();
    assert_eq!(jobs.len(), 1);
    let text = String::from_utf8_lossy(&jobs[0].bytes);
    assert!(text.contains("TRX 1001\n"));
    assert!(text.contains("Kembali"));
    assert!(text.contains("4.000\n"));
}

#[tokio::test]
async fn test_print_rejects_unreadable_payment() {
    let h = harness(Some("POS-80"), &["POS-80"]);
    let (status, body) = call(
        &h.app,
        "POST",
        "/print",
        Some(json!({
            "items": [{"name": "KOPI", "qty": 1, "price": 1000}],
            "payment_amount": "lima ribu"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["payment_amount must be a number"]));
    assert!(h.backend.jobs().is_empty());
}

#[tokio::test]
async fn test_cors_preflight_for_print() {
    let h = harness(Some("POS-80"), &["POS-80"]);
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/print")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = h.app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    assert!(h.backend.jobs().is_empty());
}

#[tokio::test]
async fn test_cors_header_on_simple_request() {
    let h = harness(Some("POS-80"), &["POS-80"]);
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = h.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_print_to_vanished_printer_fails() {
    let h = harness(Some("POS-80"), &["PDF"]);
    let (status, body) = call(
        &h.app,
        "POST",
        "/print",
        Some(json!({"items": [{"name": "KOPI", "qty": 1, "price": 1000}]})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        "Printer \"POS-80\" not found. Available printers: PDF"
    );
}

#[tokio::test]
async fn test_set_printer() {
    let h = harness(None, &["POS-80", "PDF"]);

    let (status, body) = call(
        &h.app,
        "POST",
        "/printer/set",
        Some(json!({"printer_name": "EPSON"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["available_printers"], json!(["POS-80", "PDF"]));

    let (status, body) = call(&h.app, "POST", "/printer/set", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["printer_name is required"]));

    let (status, body) = call(
        &h.app,
        "POST",
        "/printer/set",
        Some(json!({"printer_name": "PDF"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["configured_printer"], "PDF");

    let (_, body) = call(&h.app, "GET", "/printer/current", None).await;
    assert_eq!(body["configured_printer"], "PDF");
    assert_eq!(body["is_configured"], true);

    let saved = SettingsStore::open(&h.settings_path).settings();
    assert_eq!(saved.printer_name.as_deref(), Some("PDF"));
}

#[tokio::test]
async fn test_test_print() {
    let h = harness(Some("POS-80"), &["POS-80"]);
    let (status, body) = call(&h.app, "POST", "/printer/test", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["printer"], "POS-80");

    let jobs = h.backend.jobs();
    assert_eq!(jobs.len(), 1);
    assert!(String::from_utf8_lossy(&jobs[0].bytes).contains("TEST PRINT PRINTER POS"));
}

#[tokio::test]
async fn test_store_settings_update() {
    let h = harness(None, &[]);

    let (status, body) = call(
        &h.app,
        "PUT",
        "/settings/store",
        Some(json!({"paper_size": "76mm"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["paper_size must be one of 80mm, 58mm"]));

    let (status, body) = call(
        &h.app,
        "PUT",
        "/settings/store",
        Some(json!({"store_name": " KEDAI ", "paper_size": "58mm"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["store_name"], "KEDAI");
    assert_eq!(body["data"]["paper_size"], "58mm");

    let (_, body) = call(&h.app, "GET", "/settings/store", None).await;
    assert_eq!(body["data"]["store_name"], "KEDAI");
}

#[tokio::test]
async fn test_backup_and_restore() {
    let h = harness(Some("POS-80"), &["POS-80"]);

    let response = h
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/settings/backup")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"printer-settings-backup-"));

    let (status, body) = call(
        &h.app,
        "POST",
        "/settings/restore",
        Some(json!({"store_name": "TOKO BARU", "printer_name": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["store_name"], "TOKO BARU");
    assert_eq!(body["data"]["printer_name"], Value::Null);

    let (status, _) = call(&h.app, "POST", "/settings/restore", Some(json!([1]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

//! HTTP handlers for the server.
//!
//! Every response body is a JSON object with `"status": "success"` or
//! `"status": "error"`.

pub mod health;
pub mod print;
pub mod printer;
pub mod settings;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};

use crate::error::ValidationError;

/// `{"status": "success", ...fields}`
fn success_response(fields: Value) -> Response {
    let mut body = Map::new();
    body.insert("status".into(), json!("success"));
    if let Value::Object(fields) = fields {
        body.extend(fields);
    }
    (StatusCode::OK, Json(Value::Object(body))).into_response()
}

/// `{"status": "error", "message": ...}`
fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "status": "error",
            "message": message.into(),
        })),
    )
        .into_response()
}

fn validation_response(message: &str, err: ValidationError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "status": "error",
            "message": message,
            "errors": err.errors,
        })),
    )
        .into_response()
}

fn printer_not_found_response(printer: &str, available: Vec<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "message": format!("Printer \"{}\" not found", printer),
            "available_printers": available,
        })),
    )
        .into_response()
}

const NO_PRINTER: &str = "No printer configured. Select a printer first.";

/// Unwrap a JSON body, answering malformed JSON with an error body.
#[allow(clippy::result_large_err)]
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, Response> {
    body.map(|Json(value)| value)
        .map_err(|rejection| error_response(rejection.status(), rejection.body_text()))
}

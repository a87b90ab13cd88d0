//! Printer selection and status handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    activity, config::SettingsPatch, receipt::TestPageComposer,
    validate::validate_printer_name,
};

use super::super::state::AppState;
use super::{
    NO_PRINTER, error_response, json_body, printer_not_found_response, success_response,
    validation_response,
};

/// Handle GET /printer/status - list printers and check the configured one.
pub async fn status(State(state): State<Arc<AppState>>) -> Response {
    let configured = state.settings.read().await.printer().map(str::to_string);

    let printers = state.discovery().describe(configured.as_deref()).await;
    let printer_found = printers.iter().any(|p| p.is_selected);

    success_response(json!({
        "platform": state.discovery().platform(),
        "configured_printer": configured,
        "printer_found": printer_found,
        "is_configured": configured.is_some(),
        "available_printers": printers,
    }))
}

/// Handle POST /printer/set - select a printer present on the system.
pub async fn set(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match json_body(body) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let name = body.get("printer_name");
    if let Err(e) = validate_printer_name(name) {
        warn!(errors = ?e.errors, "Printer selection rejected");
        return validation_response("Invalid data", e);
    }
    let name = name.and_then(Value::as_str).unwrap_or_default().to_string();

    let available = state.discovery().list().await;
    if !available.contains(&name) {
        warn!(printer = %name, "Printer not found");
        return printer_not_found_response(&name, available);
    }

    let result = state
        .settings
        .write()
        .await
        .update(SettingsPatch::printer(name.clone()))
        .await;

    match result {
        Ok(_) => {
            info!(printer = %name, "Printer selected");
            success_response(json!({
                "message": format!("Printer set to \"{}\"", name),
                "configured_printer": name,
            }))
        }
        Err(e) => {
            error!(error = %e, "Could not save printer selection");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Handle GET /printer/current - the configured printer, if any.
pub async fn current(State(state): State<Arc<AppState>>) -> Response {
    let configured = state.settings.read().await.printer().map(str::to_string);

    success_response(json!({
        "is_configured": configured.is_some(),
        "configured_printer": configured,
    }))
}

/// Handle POST /printer/test - print the diagnostic page.
pub async fn test(State(state): State<Arc<AppState>>) -> Response {
    let (printer, profile) = {
        let settings = state.settings.read().await;
        (settings.printer().map(str::to_string), settings.store_profile())
    };

    let Some(printer) = printer else {
        return error_response(StatusCode::BAD_REQUEST, NO_PRINTER);
    };

    let available = state.discovery().list().await;
    if !available.contains(&printer) {
        return printer_not_found_response(&printer, available);
    }

    let page = TestPageComposer::new(&profile).compose(&printer);

    match state.dispatcher.send(&page, &printer).await {
        Ok(_) => {
            activity::test_print(&printer);
            success_response(json!({
                "message": "Test print sent to printer",
                "printer": printer,
            }))
        }
        Err(e) => {
            error!(error = %e, printer = %printer, "Test print failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

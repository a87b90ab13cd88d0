//! Receipt printing handler.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode, response::Response};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, warn};

use crate::{activity, receipt::ReceiptComposer, receipt::ReceiptData, validate::validate_receipt};

use super::super::state::AppState;
use super::{NO_PRINTER, error_response, json_body, success_response, validation_response};

/// Handle POST /print - compose a receipt and send it to the configured printer.
pub async fn print(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let (printer, profile) = {
        let settings = state.settings.read().await;
        (settings.printer().map(str::to_string), settings.store_profile())
    };

    let Some(printer) = printer else {
        warn!("Print rejected: no printer configured");
        return error_response(StatusCode::BAD_REQUEST, NO_PRINTER);
    };

    let body = match json_body(body) {
        Ok(body) => body,
        Err(response) => return response,
    };

    if let Err(e) = validate_receipt(&body) {
        warn!(errors = ?e.errors, "Print rejected: invalid receipt");
        return validation_response("Invalid data", e);
    }

    let data: ReceiptData = match serde_json::from_value(body) {
        Ok(data) => data,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, format!("Invalid data: {}", e)),
    };

    let receipt = ReceiptComposer::new(&profile).compose(&data);

    match state.dispatcher.send(&receipt.bytes, &printer).await {
        Ok(message) => {
            activity::print_job(&printer, receipt.printed_items, receipt.total);
            success_response(json!({
                "message": message,
                "data": {
                    "items_count": receipt.printed_items,
                    "total": receipt.total,
                },
            }))
        }
        Err(e) => {
            error!(error = %e, printer = %printer, "Print failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

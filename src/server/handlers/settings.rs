//! Store settings handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    config::{Settings, SettingsPatch},
    error::StrukError,
    validate::validate_store_settings,
};

use super::super::state::AppState;
use super::{error_response, json_body, success_response, validation_response};

/// The store fields of `settings`, as returned to clients.
fn store_view(settings: &Settings) -> Value {
    json!({
        "store_name": settings.store_name,
        "store_address": settings.store_address,
        "store_phone": settings.store_phone,
        "store_footer": settings.store_footer,
        "paper_size": settings.paper_size,
    })
}

/// Handle GET /settings/store
pub async fn store(State(state): State<Arc<AppState>>) -> Response {
    let settings = state.settings.read().await.settings();
    success_response(json!({ "data": store_view(&settings) }))
}

/// Handle PUT /settings/store - validate and persist store fields.
pub async fn update_store(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match json_body(body) {
        Ok(body) => body,
        Err(response) => return response,
    };

    if let Err(e) = validate_store_settings(&body) {
        warn!(errors = ?e.errors, "Store settings rejected");
        return validation_response("Invalid data", e);
    }

    let result = state
        .settings
        .write()
        .await
        .update(SettingsPatch::store_fields(&body))
        .await;

    match result {
        Ok(settings) => {
            info!("Store settings updated");
            success_response(json!({
                "message": "Store settings updated",
                "data": store_view(&settings),
            }))
        }
        Err(e) => {
            error!(error = %e, "Could not save store settings");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Handle GET /settings/backup - full settings as a download.
pub async fn backup(State(state): State<Arc<AppState>>) -> Response {
    let settings = state.settings.read().await.settings();
    let filename = format!(
        "printer-settings-backup-{}.json",
        Local::now().format("%Y-%m-%dT%H-%M-%S")
    );
    info!("Settings backup requested");

    (
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )],
        Json(settings),
    )
        .into_response()
}

/// Handle POST /settings/restore - validate and apply a backup.
pub async fn restore(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match json_body(body) {
        Ok(body) => body,
        Err(response) => return response,
    };

    if !body.is_object() {
        return error_response(StatusCode::BAD_REQUEST, "Invalid backup data");
    }

    let result = state.settings.write().await.restore(&body).await;

    match result {
        Ok(settings) => success_response(json!({
            "message": "Settings restored",
            "data": settings,
        })),
        Err(StrukError::Validation(e)) => {
            warn!(errors = ?e.errors, "Backup rejected");
            validation_response("Invalid backup data", e)
        }
        Err(e) => {
            error!(error = %e, "Could not restore settings");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

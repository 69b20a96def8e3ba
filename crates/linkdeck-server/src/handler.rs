//! HTTP request handlers for the links API.

use crate::server::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key for the single shared collection.
pub const USER_LINKS_KEY: &str = "user_links";

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "linkdeck-server"}))
}

/// GET /api/links: return the stored collection verbatim.
pub async fn handle_get_links(State(state): State<Arc<AppState>>) -> Response {
    match state.store.get(USER_LINKS_KEY) {
        Ok(Some(data)) => {
            debug!(bytes = data.len(), "serving stored link data");
            ([(header::CONTENT_TYPE, "application/json")], data).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "No link data found. Please save some data first."})),
        )
            .into_response(),
        Err(err) => {
            warn!("Failed to read link data: {err:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
        }
    }
}

/// POST/PUT /api/links: store the body's `linkData` field as JSON text.
pub async fn handle_save_links(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Response {
    let Some(link_data) = body.get("linkData") else {
        return (StatusCode::BAD_REQUEST, "linkData is required").into_response();
    };

    match state.store.put(USER_LINKS_KEY, &link_data.to_string()) {
        Ok(()) => Json(json!({"message": "Data saved successfully."})).into_response(),
        Err(err) => {
            warn!("Failed to store link data: {err:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
        }
    }
}

//! HTTP routes for the page and JSON surfaces

use axum::{
    Json, Router,
    middleware,
    response::{IntoResponse, Redirect},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tasks::{DomainError, models::TaskId};
use tracing::error;

use crate::{
    middleware::{require_api_user, require_page_user},
    state::AppState,
};

pub mod api;
pub mod auth;
pub mod pages;
pub mod task_pages;

/// Create the router for the web service
pub fn create_router(state: AppState) -> Router {
    let pages = pages::router()
        .merge(task_pages::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_page_user,
        ));

    let api = api::protected_router().route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_api_user,
    ));

    Router::new()
        .route("/health", get(health_check))
        .merge(auth::router())
        .merge(pages)
        .nest("/api", api::public_router().merge(api))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "taskdesk"
    }))
}

/// Outcome message carried by a redirect
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Parse a task id from the path; anything unparseable is simply not found
pub(crate) fn parse_task_id(raw: &str) -> Result<TaskId, DomainError> {
    raw.parse().map_err(|_| DomainError::task_not_found())
}

/// Redirect to `path` carrying `message` in the `key` query parameter
pub(crate) fn redirect_with(path: &str, key: &str, message: &str) -> Redirect {
    let pairs: &[(&str, &str)] = &[(key, message)];
    match serde_urlencoded::to_string(pairs) {
        Ok(query) => Redirect::to(&format!("{path}?{query}")),
        Err(e) => {
            error!("Failed to encode redirect message: {}", e);
            Redirect::to(path)
        }
    }
}

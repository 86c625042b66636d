// src/handlers/health.rs
use crate::AppState;
use axum::{extract::Extension, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/status", get(api_status))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "WellPal Backend API",
        "status": "healthy"
    }))
}

async fn health_check(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.config.app_name
    }))
}

async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let generator_status = match state.composer.provider_name() {
        Some(_) => "configured",
        None => "not_configured",
    };

    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "text_generation": generator_status,
            "provider": state.composer.provider_name(),
            "model": state.config.gemini_model
        },
        "endpoints": {
            "health": "/health",
            "status": "/api/status",
            "api": state.config.api_prefix
        }
    }))
}

// lib.rs - WellPal backend: shared state, router assembly and module exports
pub mod companion;
pub mod config;
pub mod error;
pub mod gemini_client;
pub mod handlers;
pub mod middleware;
pub mod models;

use axum::{http::HeaderValue, Extension, Router};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use companion::generator::TextGenerator;
use companion::Composer;
use config::Config;
use error::AppError;
use gemini_client::GeminiClient;

// AppState holds the loaded configuration and the chat composer (which owns the text generator, if any)
pub struct AppState {
    pub config: Config,
    pub composer: Composer,
}

impl AppState {
    pub fn new(config: Config, composer: Composer) -> Self {
        Self { config, composer }
    }

    pub fn from_config(config: Config) -> Self {
        let generator: Option<Arc<dyn TextGenerator>> = match config.google_api_key.as_deref() {
            Some(api_key) => {
                tracing::info!("Initializing Gemini client ({})...", config.gemini_model);
                let client = GeminiClient::new(api_key.to_string())
                    .with_model(config.gemini_model.clone())
                    .with_base_url(config.gemini_base_url.clone())
                    .with_timeout(config.generation_timeout);
                Some(Arc::new(client))
            }
            None => {
                tracing::warn!("GOOGLE_API_KEY not found. Chat replies will use the fallback message.");
                None
            }
        };

        let composer = Composer::new(generator, config.composer_settings());
        Self::new(config, composer)
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .merge(handlers::auth::auth_routes())
        .merge(handlers::users::user_routes())
        .merge(handlers::mood::mood_routes())
        .merge(handlers::chat::chat_routes())
        .merge(handlers::support::support_routes());

    let prefix = state.config.api_prefix.trim_end_matches('/');
    let router = if prefix.is_empty() {
        Router::new().merge(api_routes)
    } else {
        Router::new().nest(prefix, api_routes)
    };

    router
        .merge(handlers::health::health_routes())
        .fallback(not_found)
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(cors_layer(&state.config.allowed_origins))
        .layer(Extension(state))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

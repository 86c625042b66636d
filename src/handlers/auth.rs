// src/handlers/auth.rs
use crate::error::{AppError, AppResult};
use crate::models::auth::{LoginRequest, RegisterRequest, TokenResponse};
use crate::models::MessageResponse;
use axum::{response::Json, routing::post, Router};

// Accounts are not backed by storage yet: every sign-in gets the same
// placeholder bearer token.
pub fn auth_routes() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
}

async fn login(Json(payload): Json<LoginRequest>) -> Json<TokenResponse> {
    tracing::debug!(has_password = !payload.password.is_empty(), "login for {}", payload.email);
    Json(TokenResponse::placeholder())
}

async fn register(Json(payload): Json<RegisterRequest>) -> AppResult<Json<TokenResponse>> {
    if payload.password != payload.confirm_password {
        return Err(AppError::BadRequest("Passwords do not match".to_string()));
    }

    tracing::debug!(name = %payload.name, "register for {}", payload.email);
    Ok(Json(TokenResponse::placeholder()))
}

async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Successfully logged out"))
}

// src/handlers/users.rs
use crate::models::user::{UserResponse, UserUpdate};
use crate::models::MessageResponse;
use axum::{
    response::Json,
    routing::get,
    Router,
};

pub fn user_routes() -> Router {
    Router::new().route(
        "/users/me",
        get(get_current_user)
            .put(update_current_user)
            .delete(delete_current_user),
    )
}

async fn get_current_user() -> Json<UserResponse> {
    Json(UserResponse::demo("Test User"))
}

async fn update_current_user(Json(update): Json<UserUpdate>) -> Json<UserResponse> {
    if update.email.is_some() {
        tracing::debug!("email changes are not applied to the demo account");
    }
    let name = update.name.unwrap_or_else(|| "Updated User".to_string());
    Json(UserResponse::demo(name))
}

async fn delete_current_user() -> Json<MessageResponse> {
    Json(MessageResponse::new("User account deleted successfully"))
}

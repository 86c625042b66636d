// src/handlers/chat.rs
use crate::models::chat::*;
use crate::models::{fixed_time, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Extension, Query},
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn chat_routes() -> Router {
    Router::new()
        .route("/chat/message", post(send_chat_message))
        .route("/chat/history", get(get_chat_history).delete(clear_chat_history))
        .route("/chat/companion-avatar", get(get_companion_avatar))
}

/// Always answers 200: provider trouble turns into the canned fallback
/// reply rather than an error status.
async fn send_chat_message(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<ChatMessageRequest>,
) -> Json<ChatMessageResponse> {
    tracing::info!(
        message_chars = payload.message.chars().count(),
        has_context = payload.context.is_some(),
        "💬 chat message received"
    );

    let exchange = state
        .composer
        .compose(&payload.message, payload.context.as_deref())
        .await;

    Json(ChatMessageResponse::from(exchange))
}

async fn get_chat_history(Query(params): Query<ChatHistoryQuery>) -> Json<ChatHistoryResponse> {
    tracing::debug!(limit = params.limit, "fetching chat history");

    let messages = vec![
        ChatHistoryMessage {
            id: 1,
            content: "How can I manage stress better?".to_string(),
            sender: Sender::User,
            // 2024-01-01T10:00:00Z
            timestamp: fixed_time(1_704_103_200),
            companion_avatar: None,
        },
        ChatHistoryMessage {
            id: 2,
            content: "Here are some effective stress management techniques...".to_string(),
            sender: Sender::Assistant,
            timestamp: fixed_time(1_704_103_205),
            companion_avatar: Some("ai-companion-1.png".to_string()),
        },
    ];

    Json(ChatHistoryResponse {
        total: messages.len(),
        messages,
    })
}

async fn clear_chat_history() -> Json<MessageResponse> {
    Json(MessageResponse::new("Chat history cleared successfully"))
}

async fn get_companion_avatar(Extension(state): Extension<Arc<AppState>>) -> Json<CompanionAvatarResponse> {
    let companion_avatar = state.composer.pick_avatar().to_string();
    Json(CompanionAvatarResponse { companion_avatar })
}

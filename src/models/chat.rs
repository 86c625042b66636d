// src/models/chat.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::companion::mood::MoodInsight;
use crate::companion::ChatExchange;

#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    pub response: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_insights: Option<MoodInsight>,
    pub companion_avatar: String,
}

impl From<ChatExchange> for ChatMessageResponse {
    fn from(exchange: ChatExchange) -> Self {
        ChatMessageResponse {
            response: exchange.reply,
            suggestions: exchange.suggestions,
            mood_insights: exchange.mood_insights,
            companion_avatar: exchange.companion_avatar.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryMessage {
    pub id: i32,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub companion_avatar: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatHistoryMessage>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChatHistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: u32,
}

fn default_history_limit() -> u32 {
    20
}

#[derive(Debug, Serialize)]
pub struct CompanionAvatarResponse {
    pub companion_avatar: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fixed_time;

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserResponse {
    /// The single hardcoded account every profile endpoint answers with.
    pub fn demo(name: impl Into<String>) -> Self {
        Self {
            id: 1,
            email: "user@example.com".to_string(),
            name: name.into(),
            is_active: true,
            // 2024-01-01T00:00:00Z
            created_at: fixed_time(1_704_067_200),
        }
    }
}

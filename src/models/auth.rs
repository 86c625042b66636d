use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_TOKEN: &str = "placeholder-token";
pub const TOKEN_EXPIRES_IN_SECS: u64 = 3600;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub confirm_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

impl TokenResponse {
    pub fn placeholder() -> Self {
        Self {
            access_token: PLACEHOLDER_TOKEN.to_string(),
            token_type: "bearer".to_string(),
            expires_in: TOKEN_EXPIRES_IN_SECS,
        }
    }
}

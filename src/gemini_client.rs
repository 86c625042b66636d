use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::companion::generator::{GenerationError, TextGenerator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 1000,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptFeedback {
    #[serde(rename = "blockReason")]
    pub block_reason: Option<String>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
            role: role.map(str::to_string),
        }
    }
}

impl GenerateContentRequest {
    pub fn chat(system_prompt: &str, user_turn: &str, generation_config: GenerationConfig) -> Self {
        Self {
            system_instruction: Some(Content::text(None, system_prompt)),
            contents: vec![Content::text(Some("user"), user_turn)],
            generation_config: Some(generation_config),
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            generation_config: GenerationConfig::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets a transport-level timeout on every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build Gemini HTTP client with timeout: {}", e);
                Client::new()
            });
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        tracing::debug!(model = %self.model, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error {}: {}", status, body);
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let result: GenerateContentResponse = response.json().await?;
        if let Some(reason) = result
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            tracing::warn!("Gemini blocked the prompt: {}", reason);
        }

        Ok(result)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, system_prompt: &str, user_turn: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest::chat(system_prompt, user_turn, self.generation_config.clone());
        let response = self.generate_content(&request).await?;
        response.first_text().ok_or(GenerationError::EmptyResponse)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves one canned HTTP response on a local port and hands back the raw
    /// request it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            let header_end = loop {
                let n = socket.read(&mut buf).await.unwrap();
                assert!(n > 0, "connection closed before headers were complete");
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let headers = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
            let content_length: usize = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|v| v.trim().parse().unwrap())
                .unwrap_or(0);
            while request.len() < header_end + content_length {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&request).into_owned()
        });

        (base_url, handle)
    }

    fn client_for(base_url: String) -> GeminiClient {
        GeminiClient::new("test-key".to_string())
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5))
    }

    #[test]
    fn test_chat_request_shape() {
        let request = GenerateContentRequest::chat("be kind", "hello", GenerationConfig::default());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "be kind");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1000);
    }

    #[test]
    fn test_first_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "It's okay "}, {"text": "to rest."}]
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(response.first_text().as_deref(), Some("It's okay to rest."));
    }

    #[test]
    fn test_blocked_or_blank_response_has_no_text() {
        let blocked: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert!(blocked.first_text().is_none());

        let blank: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "  "}]}}]
        }))
        .unwrap();
        assert!(blank.first_text().is_none());
    }

    #[test]
    fn test_endpoint_uses_configured_model() {
        let client = GeminiClient::new("key".to_string())
            .with_base_url("http://localhost:9999/v1beta/")
            .with_model("gemini-test");

        assert_eq!(client.model(), "gemini-test");
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_an_error() {
        let client = GeminiClient::new("key".to_string())
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(2));

        let result = client.generate("be kind", "hello").await;
        assert!(matches!(result, Err(GenerationError::Http(_))));
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Take it one step at a time."}]},"finishReason":"STOP"}]}"#,
        )
        .await;

        let reply = client_for(base_url).generate("be kind", "hello").await.unwrap();
        assert_eq!(reply, "Take it one step at a time.");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-2.5-flash-lite:generateContent "));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
        assert!(request.contains(r#""systemInstruction""#));
    }

    #[tokio::test]
    async fn test_non_success_status_is_provider_error() {
        let (base_url, server) = serve_once(
            "503 Service Unavailable",
            r#"{"error":{"code":503,"message":"The model is overloaded."}}"#,
        )
        .await;

        let result = client_for(base_url).generate("be kind", "hello").await;
        match result {
            Err(GenerationError::Provider { status, body }) => {
                assert_eq!(status, 503);
                assert!(body.contains("overloaded"));
            }
            other => panic!("expected provider error, got {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_is_http_error() {
        let (base_url, server) = serve_once("200 OK", r#"{"candidates": [ not json"#).await;

        let result = client_for(base_url).generate("be kind", "hello").await;
        assert!(matches!(result, Err(GenerationError::Http(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_response() {
        let (base_url, server) = serve_once("200 OK", r#"{"candidates":[]}"#).await;

        let result = client_for(base_url).generate("be kind", "hello").await;
        assert!(matches!(result, Err(GenerationError::EmptyResponse)));
        server.await.unwrap();
    }
}

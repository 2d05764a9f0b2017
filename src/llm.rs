//! Outbound chat-completion client for the Groq OpenAI-compatible API.

use crate::config::GroqConfig;
use crate::error::LlmError;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Role of a prompt turn, in wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One prompt turn sent to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }
}

/// Seam between the orchestrator and the provider.
///
/// Failures are values, not panics or HTTP errors: the orchestrator converts
/// any `Err` into its fallback reply. One attempt per call, no retries.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

/// Groq chat-completions client.
pub struct GroqClient {
    config: GroqConfig,
    client: reqwest::Client,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionBackend for GroqClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let api_key = self.config.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {api_key}"))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|error| LlmError::Request(error.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|error| LlmError::Request(format!("failed to read response body: {error}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| truncate_body(&response_text));

            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed(message),
                429 => LlmError::RateLimited,
                code => LlmError::Api { status: code, message },
            });
        }

        let response_body: Value = serde_json::from_str(&response_text).map_err(|error| {
            LlmError::UnexpectedResponse(format!(
                "response ({status}) is not valid JSON: {error}\nBody: {}",
                truncate_body(&response_text)
            ))
        })?;

        extract_reply(&response_body)
    }
}

/// Pull the assistant's reply text out of a chat-completions response.
fn extract_reply(body: &Value) -> Result<String, LlmError> {
    let content = body
        .get("choices")
        .and_then(|choices| choices.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .ok_or_else(|| LlmError::UnexpectedResponse("no message content in choices".into()))?;

    Ok(content.trim().to_string())
}

fn truncate_body(text: &str) -> String {
    const MAX: usize = 500;
    if text.len() <= MAX {
        text.to_string()
    } else {
        let mut end = MAX;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &text[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reply_from_valid_response() {
        let body = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  Bonjour, je vous écoute.  " } }
            ]
        });
        assert_eq!(extract_reply(&body).unwrap(), "Bonjour, je vous écoute.");
    }

    #[test]
    fn test_extract_reply_missing_choices() {
        let body = serde_json::json!({ "error": { "message": "boom" } });
        assert!(matches!(
            extract_reply(&body),
            Err(LlmError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_extract_reply_empty_choices() {
        let body = serde_json::json!({ "choices": [] });
        assert!(extract_reply(&body).is_err());
    }

    #[test]
    fn test_chat_message_wire_roles() {
        let json = serde_json::to_value([
            ChatMessage::system("règles"),
            ChatMessage::user("bonjour"),
            ChatMessage { role: ChatRole::Assistant, content: "salut".into() },
        ])
        .unwrap();
        assert_eq!(json[0]["role"], "system");
        assert_eq!(json[1]["role"], "user");
        assert_eq!(json[2]["role"], "assistant");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = GroqClient::new(crate::config::GroqConfig {
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".into(),
            model: "test".into(),
            max_tokens: 200,
            temperature: 0.7,
        });
        let result = client.complete(&[ChatMessage::user("bonjour")]).await;
        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let text = "é".repeat(600);
        let truncated = truncate_body(&text);
        assert!(truncated.len() < text.len());
    }
}

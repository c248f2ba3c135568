use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{check_status, Provider, Settings};
use crate::errors::GenError;
use crate::wire::Prompt;

/// OpenAI chat completions: system instructions and the description go out
/// as two messages, the reply text comes back untouched.
pub struct OpenAIProvider {
    model: String,
    api_key: String,
    temperature: f32,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(api_key: String, settings: &Settings) -> Result<Self, GenError> {
        Ok(Self {
            model: settings.model.clone(),
            api_key,
            temperature: settings.temperature,
            client: Client::builder().timeout(settings.timeout).build()?,
        })
    }
}

// Minimal structs to parse the chat response
#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}
#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

pub(crate) fn extract_text(body: &str) -> Result<String, GenError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenError::Transport(format!("Failed to parse OpenAI response: {e}")))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| GenError::Transport("openai: empty completion".into()))
}

#[async_trait]
impl Provider for OpenAIProvider {
    async fn complete(&self, prompt: &Prompt) -> Result<String, GenError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user }
            ],
            "temperature": self.temperature,
        });

        tracing::debug!(model = %self.model, "openai: POST /v1/chat/completions");

        let resp = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(%status, bytes = text.len(), "openai: raw response\n{}", text);

        check_status("OpenAI", status, &text)?;
        extract_text(&text)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_choice_content() {
        let body = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"--css--a{}--css--"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "--css--a{}--css--");
    }

    #[test]
    fn null_content_is_transport_error() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert!(matches!(extract_text(body), Err(GenError::Transport(_))));
        assert!(matches!(extract_text(r#"{"choices":[]}"#), Err(GenError::Transport(_))));
    }
}

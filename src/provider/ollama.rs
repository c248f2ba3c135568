use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, Provider, Settings};
use crate::errors::GenError;
use crate::wire::Prompt;

/// Local Ollama server; needs no credential.
pub struct Ollama {
    pub model: String,
    pub url: String,
    temperature: f32,
    client: Client,
}

impl Ollama {
    pub fn new(settings: &Settings) -> Result<Self, GenError> {
        Ok(Self {
            model: settings.model.clone(),
            url: settings.ollama_url.clone(),
            temperature: settings.temperature,
            client: Client::builder().timeout(settings.timeout).build()?,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    #[serde(default)]
    content: String,
}

fn to_messages(prompt: &Prompt) -> Vec<Msg<'_>> {
    vec![
        Msg { role: "system", content: &prompt.system },
        Msg { role: "user", content: &prompt.user },
    ]
}

pub(crate) fn extract_text(body: &str) -> Result<String, GenError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenError::Transport(format!("ollama response parse error: {e}")))?;
    if parsed.message.content.is_empty() {
        return Err(GenError::Transport("ollama: empty completion".into()));
    }
    Ok(parsed.message.content)
}

#[async_trait]
impl Provider for Ollama {
    async fn complete(&self, prompt: &Prompt) -> Result<String, GenError> {
        let url = format!("{}/api/chat", self.url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.model,
            messages: to_messages(prompt),
            stream: false,
            options: OllamaOptions { temperature: self.temperature },
        };

        tracing::debug!(%url, model = %self.model, "ollama: POST");

        let resp = self.client.post(&url).json(&body).send().await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(%status, bytes = text.len(), "ollama: raw body\n{}", text);

        check_status("ollama", status, &text)?;
        extract_text(&text)
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_message_content() {
        let body = r#"{"model":"llama3.1","message":{"role":"assistant","content":"hello"},"done":true}"#;
        assert_eq!(extract_text(body).unwrap(), "hello");
    }

    #[test]
    fn system_goes_first() {
        let prompt = Prompt { system: "rules".into(), user: "me".into() };
        let msgs = to_messages(&prompt);
        assert_eq!(msgs[0].role, "system");
        assert_eq!(msgs[1].content, "me");
    }
}

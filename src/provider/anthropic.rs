use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, Provider, Settings};
use crate::errors::GenError;
use crate::wire::Prompt;

pub struct Anthropic {
    pub model: String,
    pub api_base: String,
    pub api_version: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
    client: Client,
}

impl Anthropic {
    pub fn new(api_key: String, settings: &Settings) -> Result<Self, GenError> {
        Ok(Self {
            model: settings.model.clone(),
            api_base: "https://api.anthropic.com".into(),
            api_version: "2023-06-01".into(),
            api_key,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature.min(1.0),
            client: Client::builder().timeout(settings.timeout).build()?,
        })
    }
}

#[derive(Serialize)]
struct MsgRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Msg<'a>>,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MsgResponse {
    content: Vec<Block>,
}

#[derive(Deserialize)]
struct Block {
    #[serde(default)]
    text: String,
    #[serde(default)]
    r#type: String,
}

pub(crate) fn extract_text(body: &str) -> Result<String, GenError> {
    let parsed: MsgResponse = serde_json::from_str(body)
        .map_err(|e| GenError::Transport(format!("anthropic response parse error: {e}")))?;

    let text: String = parsed
        .content
        .into_iter()
        .filter(|b| b.r#type == "text")
        .map(|b| b.text)
        .collect();

    if text.is_empty() {
        return Err(GenError::Transport("anthropic: empty content".into()));
    }
    Ok(text)
}

#[async_trait]
impl Provider for Anthropic {
    async fn complete(&self, prompt: &Prompt) -> Result<String, GenError> {
        let url = format!("{}/v1/messages", self.api_base.trim_end_matches('/'));
        let body = MsgRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: &prompt.system,
            messages: vec![Msg { role: "user", content: &prompt.user }],
        };

        tracing::debug!(%url, model = %self.model, "anthropic: POST");

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(%status, bytes = text.len(), "anthropic: raw body\n{}", text);

        check_status("anthropic", status, &text)?;
        extract_text(&text)
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_text_blocks_only() {
        let body = r#"{"content":[
            {"type":"text","text":"--js--"},
            {"type":"tool_use","id":"x","name":"n","input":{}},
            {"type":"text","text":"go()--js--"}
        ]}"#;
        assert_eq!(extract_text(body).unwrap(), "--js--go()--js--");
    }

    #[test]
    fn no_text_is_transport_error() {
        assert!(matches!(extract_text(r#"{"content":[]}"#), Err(GenError::Transport(_))));
    }
}

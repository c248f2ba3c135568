use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{check_status, Provider, Settings};
use crate::errors::GenError;
use crate::wire::Prompt;

const API_BASE: &str = "https://generativelanguage.googleapis.com";

pub struct Gemini {
    pub model: String,
    pub api_base: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl Gemini {
    pub fn new(api_key: String, settings: &Settings) -> Result<Self, GenError> {
        Ok(Self {
            model: settings.model.clone(),
            api_base: API_BASE.into(),
            api_key,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            client: Client::builder().timeout(settings.timeout).build()?,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<PartIn<'a>>,
}

#[derive(Serialize)]
struct PartIn<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ContentOut>,
}

#[derive(Deserialize)]
struct ContentOut {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Deserialize)]
struct PartOut {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Concatenated text parts of the first candidate.
pub(crate) fn extract_text(body: &str) -> Result<String, GenError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| GenError::Transport(format!("gemini response parse error: {e}")))?;

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenError::Transport(format!("gemini blocked the prompt: {reason}")));
    }

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenError::Transport("gemini: empty completion".into()));
    }
    Ok(text)
}

#[async_trait]
impl Provider for Gemini {
    async fn complete(&self, prompt: &Prompt) -> Result<String, GenError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        );
        let body = GenerateRequest {
            system_instruction: Content { role: None, parts: vec![PartIn { text: &prompt.system }] },
            contents: vec![Content { role: Some("user"), parts: vec![PartIn { text: &prompt.user }] }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };

        tracing::debug!(%url, model = %self.model, "gemini: POST generateContent");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(%status, bytes = text.len(), "gemini: raw response\n{}", text);

        check_status("gemini", status, &text)?;
        extract_text(&text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

use async_trait::async_trait;
use std::time::Duration;

use crate::config::ProviderKind;
use crate::errors::GenError;
use crate::wire::Prompt;

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai;

/// "Given a prompt, return the completion text." Transport, auth and quota
/// failures all surface as `GenError::Transport`.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String, GenError>;

    fn name(&self) -> &'static str;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

#[derive(Debug, Clone)]
pub struct Settings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub api_key: Option<String>,
    pub ollama_url: String,
}

impl Settings {
    fn require_key(&self, provider: &str) -> Result<String, GenError> {
        self.api_key
            .clone()
            .ok_or_else(|| GenError::Config(format!("{provider} provider requires an API key")))
    }
}

pub fn make_provider(kind: ProviderKind, settings: Settings) -> Result<DynProvider, GenError> {
    match kind {
        ProviderKind::Gemini => {
            let key = settings.require_key("gemini")?;
            Ok(Box::new(gemini::Gemini::new(key, &settings)?))
        }
        ProviderKind::OpenAI => {
            let key = settings.require_key("openai")?;
            Ok(Box::new(openai::OpenAIProvider::new(key, &settings)?))
        }
        ProviderKind::Anthropic => {
            let key = settings.require_key("anthropic")?;
            Ok(Box::new(anthropic::Anthropic::new(key, &settings)?))
        }
        ProviderKind::Ollama => Ok(Box::new(ollama::Ollama::new(&settings)?)),
    }
}

/// Shared tail of every adapter: bail on non-2xx with the body attached.
pub(crate) fn check_status(provider: &str, status: reqwest::StatusCode, body: &str) -> Result<(), GenError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(GenError::Transport(format!("{provider} API error ({status}): {body}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: Option<&str>) -> Settings {
        Settings {
            model: "m".into(),
            temperature: 0.7,
            max_tokens: 1024,
            timeout: Duration::from_secs(5),
            api_key: api_key.map(str::to_string),
            ollama_url: "http://localhost:11434".into(),
        }
    }

    #[test]
    fn keyed_providers_refuse_to_build_without_key() {
        for kind in [ProviderKind::Gemini, ProviderKind::OpenAI, ProviderKind::Anthropic] {
            assert!(matches!(make_provider(kind, settings(None)), Err(GenError::Config(_))));
        }
    }

    #[test]
    fn providers_report_their_names() {
        let cases = [
            (ProviderKind::Gemini, "gemini"),
            (ProviderKind::OpenAI, "openai"),
            (ProviderKind::Anthropic, "anthropic"),
            (ProviderKind::Ollama, "ollama"),
        ];
        for (kind, name) in cases {
            let p = make_provider(kind, settings(Some("k"))).unwrap();
            assert_eq!(p.name(), name);
        }
    }

    #[test]
    fn non_success_status_is_transport_error() {
        let err = check_status("gemini", reqwest::StatusCode::UNAUTHORIZED, "bad key").unwrap_err();
        assert!(matches!(err, GenError::Transport(ref m) if m.contains("401") && m.contains("bad key")));
        assert!(check_status("gemini", reqwest::StatusCode::OK, "").is_ok());
    }
}

use clap::ValueEnum;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::errors::GenError;
use crate::provider::Settings;
use crate::wire::ArtifactNames;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "google")]
    Gemini,
    #[value(name = "openai", alias = "open-ai")]
    OpenAI,
    Anthropic,
    Ollama,
}

impl ProviderKind {
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-2.5-flash",
            ProviderKind::OpenAI => "gpt-4.1-mini",
            ProviderKind::Anthropic => "claude-3-5-sonnet-latest",
            ProviderKind::Ollama => "llama3.1",
        }
    }

    /// Environment variables holding the credential, in lookup order.
    /// Empty for providers that need none.
    pub fn key_vars(self) -> &'static [&'static str] {
        match self {
            ProviderKind::Gemini => &["GEM", "GEMINI_API_KEY", "GOOGLE_API_KEY"],
            ProviderKind::OpenAI => &["OPENAI_API_KEY"],
            ProviderKind::Anthropic => &["ANTHROPIC_API_KEY"],
            ProviderKind::Ollama => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub root: String,
    pub provider: ProviderKind,
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub ollama_url: String,
    pub archive_name: String,
    pub names: ArtifactNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: ".".into(),
            provider: ProviderKind::Gemini,
            model: None,
            temperature: 0.7,
            max_tokens: 8192,
            timeout_secs: 300,
            ollama_url: "http://localhost:11434".into(),
            archive_name: "portfolio_website.zip".into(),
            names: ArtifactNames::default(),
        }
    }
}

impl Config {
    /// Defaults, overlaid with the TOML file at `path` when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self, GenError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|e| GenError::Config(e.to_string()))?;
        Self::from_toml(&text).map_err(|e| match e {
            GenError::Config(msg) => GenError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, GenError> {
        toml::from_str(text).map_err(|e| GenError::Config(e.to_string()))
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    pub fn validate(&self) -> Result<(), GenError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(GenError::Config(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }
        if self.timeout_secs == 0 {
            return Err(GenError::Config("timeout_secs must be positive".into()));
        }
        if self.archive_name.trim().is_empty() {
            return Err(GenError::Config("archive_name must not be empty".into()));
        }

        let names = [&self.names.markup, &self.names.styling, &self.names.scripting];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(GenError::Config("artifact file names must not be empty".into()));
        }
        let unique: HashSet<&String> = names.iter().copied().collect();
        if unique.len() != names.len() {
            return Err(GenError::Config(format!(
                "artifact file names must be distinct: {:?}",
                names
            )));
        }
        Ok(())
    }

    pub fn provider_settings(&self, api_key: Option<String>) -> Settings {
        Settings {
            model: self.model(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.timeout_secs),
            api_key,
            ollama_url: self.ollama_url.clone(),
        }
    }
}

fn first_present(vars: &[&str], lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    vars.iter()
        .filter_map(|&v| lookup(v))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Read the provider credential from the environment. Called once at start-up;
/// a missing key is fatal there rather than a per-request failure.
pub fn api_key_for(kind: ProviderKind) -> Result<Option<String>, GenError> {
    resolve_key(kind, |name| std::env::var(name).ok())
}

fn resolve_key(kind: ProviderKind, lookup: impl Fn(&str) -> Option<String>) -> Result<Option<String>, GenError> {
    let vars = kind.key_vars();
    if vars.is_empty() {
        return Ok(None);
    }
    match first_present(vars, lookup) {
        Some(key) => Ok(Some(key)),
        None => Err(GenError::Config(format!(
            "API key not found; set one of {} (a .env file works too)",
            vars.join(", ")
        ))),
    }
}

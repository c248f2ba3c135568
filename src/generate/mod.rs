use crate::errors::GenError;
use crate::fix::fix_links;
use crate::parse::parse_response;
use crate::prompt;
use crate::provider::DynProvider;
use crate::wire::{ArtifactNames, ArtifactSet, Prompt, SectionKind};

/// Everything one round trip produced, kept together so the caller can show or
/// save the raw completion even when parsing it failed.
#[derive(Debug)]
pub struct Attempt {
    pub prompt: Prompt,
    /// `None` when the LLM call itself failed.
    pub raw: Option<String>,
    pub outcome: Result<ArtifactSet, GenError>,
}

pub struct Generator {
    provider: DynProvider,
    names: ArtifactNames,
}

impl Generator {
    pub fn new(provider: DynProvider, names: ArtifactNames) -> Self {
        Self { provider, names }
    }

    pub fn names(&self) -> &ArtifactNames {
        &self.names
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// One request/response round trip: prompt, complete, parse, fix.
    /// No retries, no partial results.
    pub async fn generate(&self, description: &str) -> Result<ArtifactSet, GenError> {
        self.attempt(description).await.outcome
    }

    pub async fn attempt(&self, description: &str) -> Attempt {
        let prompt = prompt::build(&self.names, description);
        tracing::info!(
            provider = self.provider.name(),
            prompt_bytes = prompt.len(),
            "requesting completion"
        );

        let raw = match self.provider.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "completion failed");
                return Attempt { prompt, raw: None, outcome: Err(e) };
            }
        };
        tracing::info!(completion_bytes = raw.len(), "completion received");

        let outcome = assemble(&raw, &self.names);
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "completion could not be used");
        }
        Attempt { prompt, raw: Some(raw), outcome }
    }
}

/// Parse a completion and repair the markup's links.
pub fn assemble(raw: &str, names: &ArtifactNames) -> Result<ArtifactSet, GenError> {
    let sections = parse_response(raw)?;

    if sections.markup.is_empty() {
        return Err(GenError::MalformedResponse { section: SectionKind::Markup });
    }

    let with_script = !sections.scripting.is_empty();
    let (markup, fixes) = fix_links(&sections.markup, names, with_script);
    tracing::debug!(
        stylesheet_inserted = fixes.stylesheet_inserted,
        script_inserted = fixes.script_inserted,
        "link repair done"
    );

    Ok(ArtifactSet {
        markup,
        styling: sections.styling,
        scripting: sections.scripting,
        fixes,
    })
}

use chrono::{DateTime, Utc};
use fs_err as fs;
use portfolio_gen::wire::Prompt;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub prompt: PathBuf,
    pub response: PathBuf,
}

#[derive(Serialize)]
struct PromptRecord<'a> {
    run_id: Uuid,
    timestamp: DateTime<Utc>,
    provider: &'a str,
    model: &'a str,
    prompt: &'a Prompt,
}

fn run_dir(root: &Path, run: Uuid) -> PathBuf {
    root.join(".portfolio").join("runs").join(run.to_string())
}

/// Keep the prompt and the raw completion of one run for later inspection.
/// Nothing reads these back.
pub fn save_run(
    root: &Path,
    run: Uuid,
    provider: &str,
    model: &str,
    prompt: &Prompt,
    raw: &str,
) -> anyhow::Result<SavedPaths> {
    let dir = run_dir(root, run);
    fs::create_dir_all(&dir)?;

    let record = PromptRecord {
        run_id: run,
        timestamp: Utc::now(),
        provider,
        model,
        prompt,
    };
    let prompt_path = dir.join("prompt.json");
    fs::write(&prompt_path, to_string_pretty(&record)?)?;

    let response_path = dir.join("response.txt");
    fs::write(&response_path, raw)?;

    tracing::debug!(dir = %dir.display(), "run saved");
    Ok(SavedPaths { dir, prompt: prompt_path, response: response_path })
}

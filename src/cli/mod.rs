use anyhow::{bail, Context, Result};
use clap::Parser;
use fs_err as fs;
use portfolio_gen::config::{Config, ProviderKind};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "portfolio_gen", version, about = "Describe yourself, get a complete portfolio website (HTML + CSS + JS) as a ZIP")]
pub struct Args {
    /// Name, role, experience, skills, projects, achievements
    #[arg(long, conflicts_with = "describe_file")]
    pub describe: Option<String>,

    /// Read the description from a file instead (stdin when neither is given)
    #[arg(long)]
    pub describe_file: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Where to write the archive (default: <root>/<archive_name>)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub root: Option<String>,

    /// Keep the prompt and raw completion under <root>/.portfolio/runs/<id>/
    #[arg(long, default_value_t = false)]
    pub save_response: bool,

    /// Overwrite an existing archive without asking
    #[arg(long, short = 'y', default_value_t = false)]
    pub yes: bool,

    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    /// Flags win over the config file.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(p) = self.provider {
            if p != cfg.provider && self.model.is_none() {
                // the file's model belongs to the file's provider
                cfg.model = None;
            }
            cfg.provider = p;
        }
        if let Some(m) = &self.model {
            cfg.model = Some(m.clone());
        }
        if let Some(t) = self.temperature {
            cfg.temperature = t;
        }
        if let Some(t) = self.timeout_secs {
            cfg.timeout_secs = t;
        }
        if let Some(r) = &self.root {
            cfg.root = r.clone();
        }
    }

    pub fn out_path(&self, cfg: &Config) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cfg.root).join(&cfg.archive_name))
    }

    pub fn read_description(&self) -> Result<String> {
        let text = if let Some(d) = &self.describe {
            d.clone()
        } else if let Some(path) = &self.describe_file {
            fs::read_to_string(path)?
        } else {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("reading description from stdin")?;
            s
        };

        if text.trim().is_empty() {
            bail!("please enter your details (name, role, experience, skills, projects, achievements)");
        }
        Ok(text)
    }
}

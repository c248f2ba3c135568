use anyhow::Context;
use clap::Parser;
use portfolio_gen::config::{self, Config};
use portfolio_gen::{archive, provider, GenError, Generator};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

mod apply;
mod cli;
mod log;
mod ux;

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let directive = if debug { "portfolio_gen=debug" } else { "portfolio_gen=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = cli::Args::parse();
    init_tracing(args.debug)?;

    let mut cfg = Config::load(args.config.as_deref())?;
    args.apply(&mut cfg);
    cfg.validate()?;

    // Credential is read once, here; without it there is nothing to do.
    let api_key = config::api_key_for(cfg.provider)?;
    let prov = provider::make_provider(cfg.provider, cfg.provider_settings(api_key))?;
    tracing::info!(provider = prov.name(), model = %cfg.model(), "provider ready");

    let description = args.read_description()?;

    let out = args.out_path(&cfg);
    if out.exists() && !args.yes && !ux::confirm(&format!("{} exists. Overwrite?", out.display())) {
        println!("Aborted by user.");
        return Ok(());
    }

    let generator = Generator::new(prov, cfg.names.clone());
    let spinner = ux::spinner(!args.no_progress, "Generating your portfolio website...");
    let attempt = generator.attempt(&description).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if args.save_response {
        if let Some(raw) = &attempt.raw {
            let saved = log::save_run(
                Path::new(&cfg.root),
                Uuid::new_v4(),
                generator.provider_name(),
                &cfg.model(),
                &attempt.prompt,
                raw,
            )?;
            ux::print_saved_paths(&saved);
        }
    }

    let set = match attempt.outcome {
        Ok(set) => set,
        Err(e) => {
            ux::print_failure(&e);
            if let (GenError::MalformedResponse { .. }, Some(raw)) = (&e, &attempt.raw) {
                ux::print_raw_response(raw);
            }
            return Err(anyhow::Error::new(e).context("failed to generate website"));
        }
    };

    let packaged = archive::package(&set, generator.names(), &cfg.archive_name)?;
    let written = apply::write_archive(&out, &packaged)
        .with_context(|| format!("writing {}", out.display()))?;
    ux::print_result(&set, generator.names(), &packaged, &written);

    Ok(())
}

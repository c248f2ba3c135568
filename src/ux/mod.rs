use colored::Colorize;
use humansize::{format_size, DECIMAL};
use indicatif::{ProgressBar, ProgressStyle};
use portfolio_gen::archive::PackagedArchive;
use portfolio_gen::wire::{ArtifactNames, ArtifactSet, SectionKind};
use portfolio_gen::GenError;
use std::io::{self, Write};
use std::time::Duration;

use crate::apply::WriteSummary;
use crate::log::SavedPaths;

/// Spinner shown while the LLM call blocks. `None` when progress is off.
pub fn spinner(enabled: bool, msg: &str) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    Some(pb)
}

pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    let _ = io::stdout().flush();
    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        let ans = s.trim().to_lowercase();
        ans == "y" || ans == "yes"
    } else {
        false
    }
}

pub fn print_failure(err: &GenError) {
    let hint = match err {
        GenError::MalformedResponse { .. } => "The model did not follow the output format; try generating again.",
        GenError::Transport(_) => "Check your API key, network and quota, then try again.",
        GenError::Archive(_) | GenError::Config(_) => "",
    };
    eprintln!("{} {}", "Failed to generate website:".red().bold(), err);
    if !hint.is_empty() {
        eprintln!("{}", hint.dimmed());
    }
}

/// Dump what the model actually said, for a malformed completion.
pub fn print_raw_response(raw: &str) {
    eprintln!("\n{}", "===== RAW MODEL OUTPUT =====".bold());
    eprintln!("{}", raw);
    eprintln!("{}\n", "============================".bold());
}

pub fn print_saved_paths(saved: &SavedPaths) {
    println!("{} {}", "run log:".dimmed(), saved.dir.display());
    println!("  prompt saved at: {}", saved.prompt.display());
    println!("  response saved at: {}", saved.response.display());
}

pub fn print_result(set: &ArtifactSet, names: &ArtifactNames, archive: &PackagedArchive, written: &WriteSummary) {
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━━ Portfolio ━━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    for kind in SectionKind::ALL {
        let content = set.content(kind);
        let label = match kind {
            SectionKind::Markup => "HTML".green().bold(),
            SectionKind::Styling => "CSS".yellow().bold(),
            SectionKind::Scripting => "JS".cyan().bold(),
        };
        println!(
            "  {:<4} {:<14} {}",
            label,
            names.for_section(kind),
            format_size(content.len() as u64, DECIMAL)
        );
    }
    if set.fixes.stylesheet_inserted {
        println!("  {} added stylesheet link to {}", "fix:".magenta(), names.markup);
    }
    if set.fixes.script_inserted {
        println!("  {} added script reference to {}", "fix:".magenta(), names.markup);
    }
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());

    println!(
        "{} {} ({}, {}{})",
        "Saved".green().bold(),
        written.path.display(),
        format_size(written.bytes, DECIMAL),
        archive.mime_type(),
        if written.replaced { ", replaced existing file" } else { "" }
    );
    println!("{}", "Portfolio website generated successfully!".green());
    println!("Unzip the files and open {} in your browser.", names.markup);
}

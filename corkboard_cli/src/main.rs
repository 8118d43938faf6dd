use anyhow::Context;
use clap::Parser;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use corkboard::Importer;
use corkboard_cli::{config::LoggingConfig, write_summary, Cli, Config, Player};
use dialogue::Dialogue;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.logging);

    let imported = Importer::new(config.import_config(cli.legacy))
        .import_file(&cli.project)
        .with_context(|| format!("failed to import {}", cli.project.display()))?;

    if !imported.warnings.is_empty() {
        tracing::info!(
            warnings = imported.warnings.len(),
            "project imported with warnings"
        );
    }

    if cli.summary {
        write_summary(&imported.graph, &mut io::stdout().lock())?;
        return Ok(());
    }

    let dialogue = Dialogue::new(&imported.graph, config.dialogue_config());
    let start = match &cli.start {
        Some(label) => dialogue
            .start_at_label(label)
            .with_context(|| format!("no node is labeled \"{}\"", label))?,
        None => dialogue.start(),
    };

    Player::new(dialogue, io::stdin().lock(), io::stdout().lock(), io::stderr())
        .with_max_auto_steps(config.dialogue.max_auto_steps)
        .session(start)
}

/// Log to stderr so narration on stdout stays readable.
fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
                .init();
        }
    }
}

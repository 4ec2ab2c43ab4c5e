use anyhow::Context;
use clap::Parser;
use tracing::debug;

use alloc_cli::cli::{Cli, Command};
use alloc_cli::config::{AppConfig, FileConfig};
use alloc_cli::{app, logging, render};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let config = AppConfig::resolve(file_config, cli.overrides())?;

    if !logging::env_filter_overrides() {
        logging::set_log_level(&config.log_level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "resolved configuration");

    let command = cli.command.unwrap_or_default();
    let session = app::run(&command, &config).await;

    let output = match command {
        Command::Show { json: true } => {
            render::render_json(&session.state).context("failed to serialize breakdown")?
        }
        _ => render::render_text(&session.state, &config.limits, session.notice.as_deref()),
    };
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}

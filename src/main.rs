//! Briefcast CLI entry point.

use anyhow::Result;
use briefcast::cli::commands::{self, AnalyzeOptions};
use briefcast::cli::{Cli, Commands};
use briefcast::config::Settings;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref().map(Settings::expand_path);
    let settings = Settings::load_from(config_path.as_ref())?;

    // -v flags override the configured level.
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("briefcast={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    std::fs::create_dir_all(settings.data_dir())?;

    match &cli.command {
        Commands::Analyze {
            input,
            title,
            max_length,
            no_external,
            no_fallback,
            json,
            save,
        } => {
            let options = AnalyzeOptions {
                title: title.clone(),
                max_length: *max_length,
                no_external: *no_external,
                no_fallback: *no_fallback,
                json: *json,
                save: save.clone(),
            };
            commands::run_analyze(input, options, settings).await?;
        }

        Commands::Chunk { input, prompt } => {
            commands::run_chunk(input, prompt.clone(), settings)?;
        }

        Commands::Status => {
            commands::run_status(settings).await?;
        }

        Commands::History { item_id } => {
            commands::run_history(item_id.as_deref(), settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path, settings)?;
        }
    }

    Ok(())
}

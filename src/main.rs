use anyhow::Context;
use clap::Parser;
use resume_rag::cli::handle_ask_command;
use resume_rag::cli::handle_config_command;
use resume_rag::cli::handle_init_command;
use resume_rag::cli::handle_serve_api;
use resume_rag::cli::handle_sync_command;
use resume_rag::cli::Cli;
use resume_rag::cli::Commands;
use resume_rag::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };

    // Initialize logging
    if cli.verbose {
        resume_rag::logging::init_logging_with_level("debug")?;
    } else {
        resume_rag::logging::init_logging_with_config(&config)?;
    }
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Serve {
            host,
            port,
            cors,
            profile_file,
        } => {
            handle_serve_api(&config, host, port, cors, profile_file.as_deref()).await?;
        }
        Commands::Init { force } => {
            handle_init_command(&config, force).await?;
        }
        Commands::Sync { profile_file } => {
            handle_sync_command(&config, profile_file.as_deref()).await?;
        }
        Commands::Ask {
            query,
            profile_file,
        } => {
            handle_ask_command(&config, &query, profile_file.as_deref()).await?;
        }
        Commands::Config => {
            handle_config_command(&config)?;
        }
    }

    Ok(())
}

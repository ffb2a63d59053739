//! kbchat - Terminal chat console for a managed knowledge base
//!
//! Main entry point for the kbchat application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kbchat::cli::{Cli, Commands};
use kbchat::commands;
use kbchat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat {
            environment,
            code_bucket,
        } => {
            tracing::info!("Starting interactive chat for environment: {}", environment);
            commands::chat::run_chat(config, environment, code_bucket).await?;
            Ok(())
        }
        Commands::Ask {
            environment,
            question,
        } => {
            tracing::info!("Asking one-shot question in environment: {}", environment);
            commands::ask::run_ask(config, environment, question).await?;
            Ok(())
        }
        Commands::Files { environment } => {
            tracing::info!("Listing indexed files for environment: {}", environment);
            commands::files::run_files(config, environment).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "kbchat=debug" } else { "kbchat=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

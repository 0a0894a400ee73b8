//! LATAM Agent
//!
//! Question answering scoped to Latin America and the Caribbean, grounded
//! in a local knowledge base. Serves the HTTP API or answers one question
//! from the command line.

mod chat;
mod commands;
mod models;
mod sanitize;
mod server;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ServeCommand, SourcesCommand};
use latam_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// LATAM Agent - evidence-grounded answers about Latin America and the Caribbean
#[derive(Parser, Debug)]
#[command(name = "latam-agent")]
#[command(about = "Evidence-grounded answers about Latin America and the Caribbean", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "LATAM_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the knowledge base JSON file
    #[arg(long, global = true)]
    kb: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// LLM provider (openai, ollama)
    #[arg(short, long, global = true)]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeCommand),

    /// Ask a single question
    Ask(AskCommand),

    /// List the knowledge base's data sources
    Sources(SourcesCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Defaults, config file, then environment
    let config = AppConfig::load(cli.config)?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.kb,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;
    config.validate()?;

    tracing::info!("LATAM Agent starting");
    tracing::debug!("Knowledge base: {:?}", config.kb_path);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    let command_name = match &cli.command {
        Commands::Serve(_) => "serve",
        Commands::Ask(_) => "ask",
        Commands::Sources(_) => "sources",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Serve(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Sources(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

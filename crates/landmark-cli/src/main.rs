mod commands;
mod points;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use landmark_core::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "landmark", about = "Control-point image registration client")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend root URL, overrides the configuration file
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one image to the registration backend
    Upload(commands::upload::UploadArgs),
    /// Register two images from a file of point pairs
    Register(commands::register::RegisterArgs),
    /// Print or save the effective configuration
    Config(commands::config::ConfigArgs),
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match cli.config {
        Some(ref path) => AppConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(ref server) = cli.server {
        config.server.base_url = server.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Upload(args) => commands::upload::run(args, &config),
        Commands::Register(args) => commands::register::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}

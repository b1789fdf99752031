use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use landmark_core::config::AppConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the effective configuration (defaults plus overrides) as TOML.
pub fn run(args: &ConfigArgs, config: &AppConfig) -> Result<()> {
    let toml_str = config.to_toml()?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}

mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod worker;

use std::path::PathBuf;

use anyhow::Context;
use landmark_core::config::AppConfig;

/// Config file read when no path is given on the command line.
const DEFAULT_CONFIG_FILE: &str = "landmark.toml";

fn load_config() -> anyhow::Result<AppConfig> {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let path = explicit
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    if explicit.is_none() && !path.exists() {
        return Ok(AppConfig::default());
    }
    AppConfig::load(&path).with_context(|| format!("Failed to read config {}", path.display()))
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config().unwrap_or_else(|e| {
        tracing::error!("{e:#}; using defaults");
        AppConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([900.0, 500.0])
            .with_title("Landmark"),
        ..Default::default()
    };

    eframe::run_native(
        "Landmark",
        options,
        Box::new(|cc| Ok(Box::new(app::LandmarkApp::new(&cc.egui_ctx, config)))),
    )
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use landmark_core::config::AppConfig;
use landmark_core::http::HttpBackend;
use landmark_core::io::image_io::load_file;
use landmark_core::landmark::Side;

#[derive(Args)]
pub struct UploadArgs {
    /// Which slot the image fills: left or right
    #[arg(short, long)]
    pub side: Side,

    /// Image file to upload
    pub image: PathBuf,
}

pub fn run(args: &UploadArgs, config: &AppConfig) -> Result<()> {
    let backend = HttpBackend::new(&config.server)?;
    let image = load_file(&backend, args.side, &args.image)
        .with_context(|| format!("Failed to upload {}", args.image.display()))?;

    println!("Side:        {}", args.side);
    println!("File:        {}", args.image.display());
    println!("Dimensions:  {}x{}", image.width(), image.height());
    println!("Server:      {}", config.server.upload_url());

    Ok(())
}

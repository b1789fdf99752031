use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use landmark_core::config::AppConfig;
use landmark_core::http::HttpBackend;
use landmark_core::io::image_io::save_encoded;
use landmark_core::landmark::Side;
use landmark_core::presentation::BlendedImage;
use landmark_core::render::DrawList;
use landmark_core::session::Session;
use landmark_core::transform::Size;
use tracing::{info, warn};

use crate::points::PointsFile;
use crate::summary::print_registration_summary;

#[derive(Args)]
pub struct RegisterArgs {
    /// TOML file with `left` and `right` point lists in image coordinates
    pub points: PathBuf,

    /// Upload this image as the left side before registering
    #[arg(long)]
    pub left_image: Option<PathBuf>,

    /// Upload this image as the right side before registering
    #[arg(long)]
    pub right_image: Option<PathBuf>,

    /// Save the blended preview to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &RegisterArgs, config: &AppConfig) -> Result<()> {
    let points = PointsFile::load(&args.points)?;
    let backend = HttpBackend::new(&config.server)?;

    let mut session = Session::new(
        DrawList::new(Size::default()),
        DrawList::new(Size::default()),
        &config.viewer,
    );

    for (side, path) in [(Side::Left, &args.left_image), (Side::Right, &args.right_image)] {
        if let Some(path) = path {
            upload(&mut session, &backend, side, path)?;
        }
    }

    // Loading clears points, so they go in after any upload.
    for side in Side::BOTH {
        let viewport = session.viewport_mut(side);
        for p in points.side(side) {
            viewport.add_point(p);
        }
    }

    let mut preview: Option<BlendedImage> = None;
    let outcome = session
        .register(&backend, &mut preview)
        .context("Registration failed")?;

    print_registration_summary(&outcome, &points);

    if let Some(ref path) = args.output {
        let Some(ref blended) = outcome.blended else {
            warn!("backend returned no preview; nothing saved");
            return Ok(());
        };
        let bytes = blended.decode()?;
        save_encoded(&bytes, path)
            .with_context(|| format!("Failed to save preview to {}", path.display()))?;
        info!(path = %path.display(), "blended preview saved");
        println!("Blended preview saved to {}", path.display());
    }

    Ok(())
}

fn upload(
    session: &mut Session,
    backend: &HttpBackend,
    side: Side,
    path: &Path,
) -> Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    session
        .load_image(side, backend, &name, &bytes)
        .with_context(|| format!("Failed to upload {} image {}", side, path.display()))?;
    Ok(())
}

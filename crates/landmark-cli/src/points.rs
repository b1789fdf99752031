use std::path::Path;

use anyhow::{bail, Context, Result};
use landmark_core::landmark::Side;
use landmark_core::transform::Point;
use serde::{Deserialize, Serialize};

/// Point pairs read from disk, in image pixel coordinates.
///
/// ```toml
/// left = [[120.0, 88.5], [410.0, 92.0], ...]
/// right = [[131.0, 80.0], [418.5, 85.0], ...]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointsFile {
    #[serde(default)]
    pub left: Vec<[f64; 2]>,
    #[serde(default)]
    pub right: Vec<[f64; 2]>,
}

impl PointsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read points file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid points file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: Self = toml::from_str(content)?;
        if let Some([x, y]) = file
            .left
            .iter()
            .chain(&file.right)
            .find(|[x, y]| !x.is_finite() || !y.is_finite())
        {
            bail!("point [{x}, {y}] is not finite");
        }
        Ok(file)
    }

    pub fn side(&self, side: Side) -> impl Iterator<Item = Point> + '_ {
        let list = match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };
        list.iter().map(|&[x, y]| Point::new(x, y))
    }
}

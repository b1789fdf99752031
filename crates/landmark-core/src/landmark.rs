use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transform::Point;

/// Which of the two images a viewport shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Tag sent as the upload `position` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(format!("unknown side '{other}', expected 'left' or 'right'")),
        }
    }
}

/// A user-placed correspondence marker in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
    /// Set once a registration round trip has succeeded for this point set.
    pub matched: bool,
}

impl LandmarkPoint {
    pub fn new(position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            matched: false,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Wire form: `[x, y]`.
    pub fn to_pair(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

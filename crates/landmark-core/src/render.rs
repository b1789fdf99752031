use crate::io::image_io::DecodedImage;
use crate::transform::{Point, Size};

/// 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Marker fill for points not yet confirmed by a registration.
    pub const UNMATCHED: Self = Self::rgb(255, 0, 0);
    /// Marker fill after a successful registration.
    pub const MATCHED: Self = Self::rgb(0, 128, 0);
    /// Index label drawn over each marker.
    pub const LABEL: Self = Self::rgb(255, 255, 255);

    pub fn for_marker(matched: bool) -> Self {
        if matched {
            Self::MATCHED
        } else {
            Self::UNMATCHED
        }
    }
}

/// A 2D drawing target owned by one viewport.
///
/// All positions are in screen space (canvas pixels, origin top-left).
pub trait Surface {
    /// Resize the backing canvas. Contents are discarded.
    fn resize(&mut self, size: Size);

    fn size(&self) -> Size;

    fn clear(&mut self);

    /// Draw `image` with its top-left corner at `origin`, scaled uniformly.
    fn draw_image(&mut self, image: &DecodedImage, origin: Point, scale: f64);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Draw `text` centered on `center`.
    fn fill_text(&mut self, center: Point, text: &str, size: f64, color: Color);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Image {
        origin: Point,
        scale: f64,
        width: u32,
        height: u32,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
    Text {
        center: Point,
        text: String,
        size: f64,
        color: Color,
    },
}

/// Retained surface: records the commands of the most recent frame.
///
/// `clear` drops everything recorded so far, so after a render the list holds
/// exactly one frame. Front ends replay it onto their own painter.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    size: Size,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl DrawList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
            frames: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of `clear` calls so far; front ends use it to detect a new frame.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn marker_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_image(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Image { .. }))
    }
}

impl Surface for DrawList {
    fn resize(&mut self, size: Size) {
        self.size = size;
        self.commands.clear();
    }

    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    fn draw_image(&mut self, image: &DecodedImage, origin: Point, scale: f64) {
        self.commands.push(DrawCommand::Image {
            origin,
            scale,
            width: image.width(),
            height: image.height(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, center: Point, text: &str, size: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            center,
            text: text.to_string(),
            size,
            color,
        });
    }
}

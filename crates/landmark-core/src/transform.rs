use std::ops::{Add, AddAssign, Div, Mul, Sub};

use tracing::debug;

/// A 2D position or displacement. Used for both image space and screen space;
/// which one is meant is always stated by the function taking it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when used as a displacement.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

impl Mul<f64> for Size {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.width * rhs, self.height * rhs)
    }
}

/// Uniform scale followed by translation, mapping image space to screen space.
///
/// `screen = image * scale + offset`. `scale` is kept strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    offset: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
        }
    }
}

impl ViewTransform {
    /// Returns `None` unless `scale` is finite and positive.
    pub fn new(scale: f64, offset: Point) -> Option<Self> {
        (scale.is_finite() && scale > 0.0).then_some(Self { scale, offset })
    }

    /// Largest scale that fits `image` entirely inside `canvas`, centered.
    ///
    /// Falls back to the identity transform when either size is empty, since
    /// no positive scale can fit an image into nothing.
    pub fn fit(canvas: Size, image: Size) -> Self {
        if canvas.is_empty() || image.is_empty() {
            return Self::default();
        }
        let scale = (canvas.width / image.width).min(canvas.height / image.height);
        let scaled = image * scale;
        let offset = Point::new(
            (canvas.width - scaled.width) / 2.0,
            (canvas.height - scaled.height) / 2.0,
        );
        Self { scale, offset }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn to_screen(&self, image_pos: Point) -> Point {
        image_pos * self.scale + self.offset
    }

    pub fn to_image(&self, screen_pos: Point) -> Point {
        (screen_pos - self.offset) / self.scale
    }

    /// Translate by a screen-space delta. Not clamped.
    pub fn pan(&mut self, delta: Point) {
        self.offset += delta;
    }

    /// Multiply the scale by `factor` while keeping the image point under
    /// `center` (a screen position) fixed on screen.
    ///
    /// Non-finite or non-positive factors are ignored and reported as `false`.
    pub fn zoom_about(&mut self, center: Point, factor: f64) -> bool {
        let new_scale = self.scale * factor;
        if !(factor.is_finite() && factor > 0.0 && new_scale.is_finite() && new_scale > 0.0) {
            debug!(factor, scale = self.scale, "ignoring zoom that would leave scale non-positive");
            return false;
        }
        let image_center = self.to_image(center);
        self.scale = new_scale;
        self.offset = center - image_center * new_scale;
        true
    }
}

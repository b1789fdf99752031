use landmark_core::io::image_io::DecodedImage;
use landmark_core::render::Color;
use landmark_core::transform::Point;

/// Convert a decoded RGBA bitmap to an egui ColorImage.
pub fn decoded_to_color_image(image: &DecodedImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.pixels().as_raw())
}

pub fn color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Canvas-relative position of a screen point inside `rect`.
pub fn to_canvas(pos: egui::Pos2, rect: egui::Rect) -> Point {
    let rel = pos - rect.min;
    Point::new(rel.x as f64, rel.y as f64)
}

/// Inverse of [`to_canvas`].
pub fn to_screen(p: Point, rect: egui::Rect) -> egui::Pos2 {
    rect.min + egui::vec2(p.x as f32, p.y as f32)
}

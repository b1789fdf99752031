use landmark_core::landmark::Side;
use landmark_core::render::DrawCommand;
use landmark_core::transform::Size;
use landmark_core::viewport::PointerButton;

use crate::app::LandmarkApp;
use crate::convert::{color32, decoded_to_color_image, to_canvas, to_screen};

const GAP: f32 = 8.0;

pub fn show(ctx: &egui::Context, app: &mut LandmarkApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let full = ui.available_rect_before_wrap();
        let half = ((full.width() - GAP) / 2.0).max(1.0);
        let rects = [
            (
                Side::Left,
                egui::Rect::from_min_size(full.min, egui::vec2(half, full.height())),
            ),
            (
                Side::Right,
                egui::Rect::from_min_size(
                    egui::pos2(full.min.x + half + GAP, full.min.y),
                    egui::vec2(half, full.height()),
                ),
            ),
        ];

        let mut hovered = None;
        for (side, rect) in rects {
            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
            if response.hovered() {
                hovered = Some(side);
            }
            sync_container(app, side, rect);
            handle_zoom(ui, &response, app, side);
        }

        handle_pointer(ui, app, &rects, hovered);

        for (side, rect) in rects {
            paint_background(ui, rect);
            if app.session.viewport(side).has_image() {
                ensure_texture(ctx, app, side);
                replay(ui, app, side, rect);
            } else {
                show_placeholder(ui, app, side, rect);
            }
        }
    });
}

/// Track the canvas container. Without an image the canvas follows it right
/// away; with one, the view is kept until the next load or Fit.
fn sync_container(app: &mut LandmarkApp, side: Side, rect: egui::Rect) {
    let size = Size::new(rect.width() as f64, rect.height() as f64);
    let viewport = app.session.viewport_mut(side);
    if viewport.container_size() == size {
        return;
    }
    viewport.set_container_size(size);
    if !viewport.has_image() {
        viewport.fit_to_container();
    }
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut LandmarkApp, side: Side) {
    let scroll = ui.input(|i| i.raw_scroll_delta.y);
    if scroll == 0.0 || !response.hovered() {
        return;
    }
    app.zoom(side, scroll > 0.0);
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Feed raw pointer events to the viewports as press/move/release/click.
///
/// Moves and the release go to the viewport that took the press, even when
/// the pointer has left it. A click follows a primary release over the same
/// viewport, as in a browser.
fn handle_pointer(
    ui: &egui::Ui,
    app: &mut LandmarkApp,
    rects: &[(Side, egui::Rect); 2],
    hovered: Option<Side>,
) {
    let rect_of = |side: Side| {
        rects
            .iter()
            .find(|(s, _)| *s == side)
            .map(|(_, r)| *r)
            .unwrap_or(egui::Rect::NOTHING)
    };

    let events = ui.input(|i| i.events.clone());
    for event in events {
        match event {
            egui::Event::PointerButton {
                pos,
                button,
                pressed: true,
                ..
            } => {
                let (Some(side), Some(button)) = (hovered, map_button(button)) else {
                    continue;
                };
                let rect = rect_of(side);
                if !rect.contains(pos) {
                    continue;
                }
                app.session
                    .viewport_mut(side)
                    .pointer_down(to_canvas(pos, rect), button);
                if button == PointerButton::Primary {
                    app.press_side = Some(side);
                }
            }
            egui::Event::PointerMoved(pos) => {
                if let Some(side) = app.press_side {
                    let rect = rect_of(side);
                    app.session
                        .viewport_mut(side)
                        .pointer_move(to_canvas(pos, rect));
                }
            }
            egui::Event::PointerButton {
                pos,
                button,
                pressed: false,
                ..
            } => {
                let Some(side) = app.press_side.take() else {
                    continue;
                };
                let rect = rect_of(side);
                let Some(button) = map_button(button) else {
                    continue;
                };
                let viewport = app.session.viewport_mut(side);
                viewport.pointer_up(to_canvas(pos, rect), button);
                if button == PointerButton::Primary && rect.contains(pos) {
                    if let Some(index) = viewport.click(to_canvas(pos, rect)) {
                        let p = viewport.points()[index];
                        app.ui_state.add_log(format!(
                            "{side} point #{} at ({:.1}, {:.1})",
                            index + 1,
                            p.x,
                            p.y
                        ));
                    }
                }
            }
            egui::Event::PointerGone => {
                if let Some(side) = app.press_side.take() {
                    let rect = rect_of(side);
                    app.session
                        .viewport_mut(side)
                        .pointer_up(to_canvas(rect.center(), rect), PointerButton::Primary);
                }
            }
            _ => {}
        }
    }
}

fn ensure_texture(ctx: &egui::Context, app: &mut LandmarkApp, side: Side) {
    if app.ui_state.side(side).texture.is_some() {
        return;
    }
    let Some(image) = app.session.viewport(side).image() else {
        return;
    };
    let texture = ctx.load_texture(
        format!("viewport-{}", side.as_str()),
        decoded_to_color_image(image),
        egui::TextureOptions::LINEAR,
    );
    app.ui_state.side_mut(side).texture = Some(texture);
}

/// Paint the viewport's last rendered frame.
fn replay(ui: &egui::Ui, app: &LandmarkApp, side: Side, rect: egui::Rect) {
    let painter = ui.painter_at(rect);
    let texture = app.ui_state.side(side).texture.as_ref();

    for command in app.session.viewport(side).surface().commands() {
        match command {
            DrawCommand::Image {
                origin,
                scale,
                width,
                height,
            } => {
                let Some(texture) = texture else {
                    continue;
                };
                let size = egui::vec2(
                    (*width as f64 * scale) as f32,
                    (*height as f64 * scale) as f32,
                );
                painter.image(
                    texture.id(),
                    egui::Rect::from_min_size(to_screen(*origin, rect), size),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(to_screen(*center, rect), *radius as f32, color32(*color));
            }
            DrawCommand::Text {
                center,
                text,
                size,
                color,
            } => {
                painter.text(
                    to_screen(*center, rect),
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(*size as f32),
                    color32(*color),
                );
            }
        }
    }
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn show_placeholder(ui: &egui::Ui, app: &LandmarkApp, side: Side, rect: egui::Rect) {
    let text = if app.ui_state.side(side).is_loading() {
        format!("Uploading {side} image...")
    } else {
        format!("Open the {side} image to begin")
    };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}

use landmark_core::landmark::Side;

use crate::app::LandmarkApp;
use crate::panels::{pick_image, section_header};

const LEFT_PANEL_WIDTH: f32 = 240.0;

pub fn show(ctx: &egui::Context, app: &mut LandmarkApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                image_section(ui, app, Side::Left);
                ui.separator();
                image_section(ui, app, Side::Right);
                ui.separator();
                points_section(ui, app);
                ui.separator();
                register_section(ui, app);
            });
        });
}

fn image_section(ui: &mut egui::Ui, app: &mut LandmarkApp, side: Side) {
    let state = app.ui_state.side(side);
    let status = if state.is_loading() {
        Some("uploading...")
    } else {
        None
    };
    section_header(ui, &format!("{side} Image"), status);
    ui.add_space(4.0);

    if ui.button("Open...").clicked() {
        pick_image(ui.ctx(), app, side);
    }

    let viewport = app.session.viewport(side);
    if let Some(name) = app.ui_state.side(side).file_name() {
        ui.label(name);
    }
    if let Some(image) = viewport.image() {
        ui.small(format!("{}x{}", image.width(), image.height()));
    }

    ui.add_space(4.0);
    let has_image = viewport.has_image();
    ui.horizontal(|ui| {
        ui.add_enabled_ui(has_image, |ui| {
            if ui.button("Zoom +").clicked() {
                app.zoom(side, true);
            }
            if ui.button("Zoom \u{2212}").clicked() {
                app.zoom(side, false);
            }
            if ui.button("Fit").clicked() {
                app.session.viewport_mut(side).fit_to_container();
            }
        });
    });
}

fn points_section(ui: &mut egui::Ui, app: &mut LandmarkApp) {
    section_header(ui, "Points", None);
    ui.add_space(4.0);

    for side in Side::BOTH {
        let points = app.session.viewport(side).points();
        let matched = points.iter().filter(|p| p.matched).count();
        ui.label(format!("{side}: {} ({matched} matched)", points.len()));
    }

    ui.add_space(4.0);
    if ui.button("Reset Points").clicked() {
        app.reset_points();
    }
}

fn register_section(ui: &mut egui::Ui, app: &mut LandmarkApp) {
    let status = if app.ui_state.registering {
        Some("running...")
    } else if app.ui_state.last_outcome.is_some() {
        Some("done")
    } else {
        None
    };
    section_header(ui, "Registration", status);
    ui.add_space(4.0);

    let enabled = app.session.both_loaded() && !app.ui_state.registering;
    if ui
        .add_enabled(enabled, egui::Button::new("Register"))
        .clicked()
    {
        app.request_registration();
    }

    if let Some(ref outcome) = app.ui_state.last_outcome {
        ui.add_space(4.0);
        ui.small(format!("Pairs: {}", outcome.pairs));
        if let Some(n) = outcome.inliers {
            ui.small(format!("Inliers: {n}/{}", outcome.pairs));
        }
        if let Some(h) = outcome.homography {
            ui.small("Homography:");
            for row in h.0 {
                ui.monospace(format!("{:>9.4} {:>9.4} {:>9.4}", row[0], row[1], row[2]));
            }
        }
    }

    if app.preview.blended.is_some() && !app.preview.open && ui.button("Show Preview").clicked() {
        app.preview.open = true;
    }
}

use landmark_core::landmark::Side;

use crate::app::LandmarkApp;

pub fn show(ctx: &egui::Context, app: &mut LandmarkApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            for side in Side::BOTH {
                let viewport = app.session.viewport(side);
                if viewport.has_image() {
                    ui.label(format!(
                        "{side}: {} pts, zoom {:.0}%",
                        viewport.points().len(),
                        viewport.scale() * 100.0
                    ));
                } else {
                    ui.label(format!("{side}: no image"));
                }
                ui.separator();
            }
            ui.label(format!("Server: {}", app.config.server.base_url));
        });

        ui.add_space(2.0);
    });
}

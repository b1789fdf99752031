use crate::app::LandmarkApp;
use crate::panels::save_preview;

const MAX_PREVIEW_WIDTH: f32 = 900.0;

pub fn show(ctx: &egui::Context, app: &mut LandmarkApp) {
    if app.preview.blended.is_none() || !app.preview.open {
        return;
    }

    let mut open = app.preview.open;
    let mut save = false;
    egui::Window::new("Blended Preview")
        .open(&mut open)
        .resizable(true)
        .default_width(MAX_PREVIEW_WIDTH)
        .show(ctx, |ui| {
            match app.preview.texture(ctx) {
                Ok(texture) => {
                    let size = texture.size_vec2();
                    let scale = (ui.available_width().min(MAX_PREVIEW_WIDTH) / size.x).min(1.0);
                    ui.image((texture.id(), size * scale));
                }
                Err(message) => {
                    ui.colored_label(egui::Color32::YELLOW, message);
                }
            }
            ui.add_space(4.0);
            if ui.button("Save...").clicked() {
                save = true;
            }
        });
    app.preview.open = open;

    if save {
        save_preview(app);
    }
}

pub mod controls;
pub mod menu_bar;
pub mod preview;
pub mod status;
pub mod viewport;

use std::path::PathBuf;
use std::sync::mpsc;

use landmark_core::landmark::Side;

use crate::app::LandmarkApp;
use crate::messages::{WorkerCommand, WorkerResult};

pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}

/// Ask for an image for `side`. The pick comes back as `FilePicked`.
pub(crate) fn pick_image(ctx: &egui::Context, app: &LandmarkApp, side: Side) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .set_title(format!("Open {side} image"))
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp", "gif"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            deliver_pick(&result_tx, &ctx, side, path);
        }
    });
}

/// Queue a picked file and wake the UI so the upload starts without further input.
fn deliver_pick(
    result_tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    side: Side,
    path: PathBuf,
) {
    let _ = result_tx.send(WorkerResult::FilePicked { side, path });
    ctx.request_repaint();
}

/// Ask where to save the blended preview and hand the job to the worker.
pub(crate) fn save_preview(app: &LandmarkApp) {
    let Some(preview) = app.preview.blended.clone() else {
        return;
    };
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("TIFF", &["tiff", "tif"])
            .set_file_name("blended.png")
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::SavePreview { preview, path });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picked_file_wakes_ui() {
        let (tx, rx) = mpsc::channel();
        let ctx = egui::Context::default();
        deliver_pick(&tx, &ctx, Side::Right, PathBuf::from("right.png"));

        assert!(ctx.has_requested_repaint());
        match rx.try_recv().unwrap() {
            WorkerResult::FilePicked { side, path } => {
                assert_eq!(side, Side::Right);
                assert_eq!(path, PathBuf::from("right.png"));
            }
            _ => panic!("expected FilePicked"),
        }
    }
}

use std::sync::mpsc;

use landmark_core::config::AppConfig;
use landmark_core::landmark::Side;
use landmark_core::render::DrawList;
use landmark_core::session::Session;
use landmark_core::transform::Size;

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{PreviewState, UIState};
use crate::worker;

/// Initial canvas size before the first layout pass reports the real one.
const INITIAL_CANVAS: Size = Size::new(640.0, 480.0);

pub struct LandmarkApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub config: AppConfig,
    pub session: Session,
    pub ui_state: UIState,
    pub preview: PreviewState,
    /// Side that received the primary press now being tracked.
    pub press_side: Option<Side>,
}

impl LandmarkApp {
    pub fn new(ctx: &egui::Context, config: AppConfig) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(config.server.clone(), result_tx.clone(), ctx.clone());

        let session = Session::new(
            DrawList::new(INITIAL_CANVAS),
            DrawList::new(INITIAL_CANVAS),
            &config.viewer,
        );

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            config,
            session,
            ui_state: UIState::default(),
            preview: PreviewState::default(),
            press_side: None,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::FilePicked { side, path } => {
                    let ticket = self.session.viewport_mut(side).begin_load();
                    self.ui_state.side_mut(side).pending_load = Some(ticket);
                    self.send_command(WorkerCommand::LoadImage { ticket, path });
                }
                WorkerResult::ImageLoaded {
                    ticket,
                    path,
                    image,
                } => {
                    let side = ticket.side();
                    let (w, h) = (image.width(), image.height());
                    let state = self.ui_state.side_mut(side);
                    if state.pending_load == Some(ticket) {
                        state.pending_load = None;
                    }
                    if self.session.viewport_mut(side).complete_load(ticket, image) {
                        let state = self.ui_state.side_mut(side);
                        state.texture = None;
                        state.file_path = Some(path);
                        let name = state.file_name().unwrap_or_default();
                        self.ui_state
                            .add_log(format!("{side} image loaded: {name} ({w}x{h})"));
                    }
                }
                WorkerResult::LoadFailed { ticket, message } => {
                    let state = self.ui_state.side_mut(ticket.side());
                    if state.pending_load == Some(ticket) {
                        state.pending_load = None;
                        self.ui_state
                            .notify(format!("Error uploading {} image: {message}", ticket.side()));
                    }
                }
                WorkerResult::RegistrationReply { pending, response } => {
                    self.ui_state.registering = false;
                    match self
                        .session
                        .apply_registration(&pending, response, &mut self.preview)
                    {
                        Ok(outcome) => {
                            let inliers = outcome
                                .inliers
                                .map(|n| format!(", {n} inliers"))
                                .unwrap_or_default();
                            self.ui_state.add_log(format!(
                                "Registration succeeded: {} pairs{inliers}",
                                outcome.pairs
                            ));
                            if outcome.blended.is_none() {
                                self.ui_state.add_log("Backend returned no preview".into());
                            }
                            self.ui_state.last_outcome = Some(outcome);
                        }
                        Err(e) => self.ui_state.notify(e.to_string()),
                    }
                }
                WorkerResult::RegistrationFailed { message } => {
                    self.ui_state.registering = false;
                    self.ui_state.notify(message);
                }
                WorkerResult::PreviewSaved { path } => {
                    self.ui_state
                        .add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// Validate the current points and hand the request to the worker.
    pub fn request_registration(&mut self) {
        if self.ui_state.registering {
            return;
        }
        match self.session.prepare_registration() {
            Ok(pending) => {
                self.ui_state.registering = true;
                self.send_command(WorkerCommand::Register { pending });
            }
            Err(e) => self.ui_state.notify(e.to_string()),
        }
    }

    pub fn reset_points(&mut self) {
        self.session.reset_points(&mut self.preview);
        self.ui_state.last_outcome = None;
        self.ui_state.add_log("Points cleared".into());
    }

    pub fn zoom(&mut self, side: Side, zoom_in: bool) {
        let step = self.config.viewer.zoom_step;
        let factor = if zoom_in { step } else { 1.0 / step };
        self.session.zoom(side, factor);
    }
}

impl eframe::App for LandmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);
        panels::preview::show(ctx, self);

        if let Some(message) = self.ui_state.alert.clone() {
            egui::Window::new("Landmark")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(message);
                        ui.add_space(8.0);
                        if ui.button("OK").clicked() {
                            self.ui_state.alert = None;
                        }
                    });
                });
        }

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About Landmark")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Landmark");
                        ui.label("Control-point image registration");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}

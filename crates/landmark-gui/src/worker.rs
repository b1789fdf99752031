use std::path::Path;
use std::sync::mpsc;

use landmark_core::config::ServerConfig;
use landmark_core::endpoint::RegistrationEndpoint;
use landmark_core::http::HttpBackend;
use landmark_core::io::image_io::{load_file, save_encoded};
use landmark_core::presentation::BlendedImage;
use landmark_core::registration::PendingRegistration;
use landmark_core::viewport::LoadTicket;
use tracing::{error, info};

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the worker thread. Returns the command sender.
///
/// All network traffic runs here so the UI thread never blocks on it.
pub fn spawn_worker(
    server: ServerConfig,
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("landmark-worker".into())
        .spawn(move || {
            worker_loop(&server, cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_log(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Log { message: msg.into() });
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    server: &ServerConfig,
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    let backend = match HttpBackend::new(server) {
        Ok(b) => {
            info!(url = %server.base_url, "backend ready");
            Ok(b)
        }
        Err(e) => {
            error!("failed to create HTTP client: {e}");
            send_error(&tx, &ctx, format!("HTTP client unavailable: {e}"));
            Err(e.to_string())
        }
    };

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadImage { ticket, path } => match backend {
                Ok(ref b) => handle_load_image(b, ticket, &path, &tx, &ctx),
                Err(ref message) => send(
                    &tx,
                    &ctx,
                    WorkerResult::LoadFailed {
                        ticket,
                        message: message.clone(),
                    },
                ),
            },
            WorkerCommand::Register { pending } => match backend {
                Ok(ref b) => handle_register(b, pending, &tx, &ctx),
                Err(ref message) => send(
                    &tx,
                    &ctx,
                    WorkerResult::RegistrationFailed {
                        message: message.clone(),
                    },
                ),
            },
            WorkerCommand::SavePreview { preview, path } => {
                handle_save_preview(&preview, &path, &tx, &ctx);
            }
        }
    }
}

fn handle_load_image(
    backend: &HttpBackend,
    ticket: LoadTicket,
    path: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    send_log(
        tx,
        ctx,
        format!("Uploading {} image {}...", ticket.side(), path.display()),
    );
    match load_file(backend, ticket.side(), path) {
        Ok(image) => send(
            tx,
            ctx,
            WorkerResult::ImageLoaded {
                ticket,
                path: path.to_path_buf(),
                image,
            },
        ),
        Err(e) => send(
            tx,
            ctx,
            WorkerResult::LoadFailed {
                ticket,
                message: e.to_string(),
            },
        ),
    }
}

fn handle_register(
    backend: &HttpBackend,
    pending: PendingRegistration,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    send_log(
        tx,
        ctx,
        format!("Registering {} point pairs...", pending.request.pair_count()),
    );
    match backend.register(&pending.request) {
        Ok(response) => send(tx, ctx, WorkerResult::RegistrationReply { pending, response }),
        Err(e) => send(
            tx,
            ctx,
            WorkerResult::RegistrationFailed {
                message: e.to_string(),
            },
        ),
    }
}

fn handle_save_preview(
    preview: &BlendedImage,
    path: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let result = preview
        .decode()
        .and_then(|bytes| save_encoded(&bytes, path));
    match result {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::PreviewSaved {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to save preview: {e}")),
    }
}

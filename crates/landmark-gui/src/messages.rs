use std::path::PathBuf;

use landmark_core::io::image_io::DecodedImage;
use landmark_core::landmark::Side;
use landmark_core::presentation::BlendedImage;
use landmark_core::registration::{PendingRegistration, RegistrationResponse};
use landmark_core::viewport::LoadTicket;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Read, upload and decode an image for the ticket's side.
    LoadImage { ticket: LoadTicket, path: PathBuf },

    /// Submit a validated set of point pairs.
    Register { pending: PendingRegistration },

    /// Decode the blended preview and write it to disk.
    SavePreview { preview: BlendedImage, path: PathBuf },
}

/// Results sent from worker (and file dialog) threads back to UI thread.
pub enum WorkerResult {
    /// The user picked a file for one side; the UI issues the load ticket.
    FilePicked { side: Side, path: PathBuf },

    ImageLoaded {
        ticket: LoadTicket,
        path: PathBuf,
        image: DecodedImage,
    },

    LoadFailed { ticket: LoadTicket, message: String },

    /// The backend answered; the UI applies it against the current points.
    RegistrationReply {
        pending: PendingRegistration,
        response: RegistrationResponse,
    },

    /// The request never produced a parseable reply.
    RegistrationFailed { message: String },

    PreviewSaved { path: PathBuf },

    Error { message: String },

    Log { message: String },
}

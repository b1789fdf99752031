use std::path::PathBuf;

use landmark_core::landmark::Side;
use landmark_core::registration::RegistrationOutcome;
use landmark_core::viewport::LoadTicket;

/// Per-side bookkeeping the viewport itself does not carry.
#[derive(Default)]
pub struct SideState {
    pub file_path: Option<PathBuf>,
    /// The load the UI is waiting on, if any.
    pub pending_load: Option<LoadTicket>,
    pub texture: Option<egui::TextureHandle>,
}

impl SideState {
    pub fn file_name(&self) -> Option<String> {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub left: SideState,
    pub right: SideState,

    pub registering: bool,
    pub last_outcome: Option<RegistrationOutcome>,

    /// Message shown in a modal until dismissed.
    pub alert: Option<String>,
    pub show_about: bool,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// Log and pop up a message for the user.
    pub fn notify(&mut self, msg: String) {
        self.add_log(format!("ERROR: {msg}"));
        self.alert = Some(msg);
    }
}

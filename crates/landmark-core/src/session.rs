use crate::config::ViewerConfig;
use crate::endpoint::{RegistrationEndpoint, UploadEndpoint};
use crate::error::Result;
use crate::landmark::Side;
use crate::presentation::Presenter;
use crate::registration::{self, PendingRegistration, RegistrationOutcome, RegistrationResponse};
use crate::render::{DrawList, Surface};
use crate::viewport::Viewport;

/// The two viewports of one alignment session.
pub struct Session<S: Surface = DrawList> {
    left: Viewport<S>,
    right: Viewport<S>,
}

impl<S: Surface> Session<S> {
    pub fn new(left_surface: S, right_surface: S, config: &ViewerConfig) -> Self {
        Self {
            left: Viewport::new(Side::Left, left_surface, config),
            right: Viewport::new(Side::Right, right_surface, config),
        }
    }

    pub fn viewport(&self, side: Side) -> &Viewport<S> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn viewport_mut(&mut self, side: Side) -> &mut Viewport<S> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn both_loaded(&self) -> bool {
        self.left.has_image() && self.right.has_image()
    }

    pub fn load_image(
        &mut self,
        side: Side,
        uploader: &dyn UploadEndpoint,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<()> {
        self.viewport_mut(side).load_image(uploader, file_name, bytes)
    }

    pub fn zoom(&mut self, side: Side, factor: f64) {
        self.viewport_mut(side).zoom(factor);
    }

    /// Clear both point lists and hide the blended preview.
    pub fn reset_points(&mut self, presenter: &mut dyn Presenter) {
        self.left.reset_points();
        self.right.reset_points();
        presenter.hide_blended();
    }

    pub fn prepare_registration(&self) -> Result<PendingRegistration> {
        registration::prepare(&self.left, &self.right)
    }

    pub fn apply_registration(
        &mut self,
        pending: &PendingRegistration,
        response: RegistrationResponse,
        presenter: &mut dyn Presenter,
    ) -> Result<RegistrationOutcome> {
        registration::apply(&mut self.left, &mut self.right, pending, response, presenter)
    }

    pub fn register(
        &mut self,
        endpoint: &dyn RegistrationEndpoint,
        presenter: &mut dyn Presenter,
    ) -> Result<RegistrationOutcome> {
        registration::register_images(&mut self.left, &mut self.right, endpoint, presenter)
    }
}

//! One image's display state: bitmap, view transform, landmark points, and
//! the pointer state machine that turns raw input into pans and point adds.

pub mod input;

use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::endpoint::UploadEndpoint;
use crate::error::Result;
use crate::io::image_io::{upload_and_decode, DecodedImage};
use crate::landmark::{LandmarkPoint, Side};
use crate::render::{Color, DrawList, Surface};
use crate::transform::{Point, Size, ViewTransform};

pub use input::{PointerButton, PointerState, PointerTracker};

/// Identifies one `begin_load` call. Only the newest ticket may complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    side: Side,
    generation: u64,
}

impl LoadTicket {
    pub fn side(&self) -> Side {
        self.side
    }
}

pub struct Viewport<S: Surface = DrawList> {
    side: Side,
    surface: S,
    /// Size of the hosting container; the canvas is resized to it on fit.
    container: Size,
    image: Option<DecodedImage>,
    transform: ViewTransform,
    points: Vec<LandmarkPoint>,
    pointer: PointerTracker,
    marker_radius: f64,
    label_size: f64,
    load_generation: u64,
    /// Bumped whenever the point list is replaced, grown or cleared.
    revision: u64,
}

impl<S: Surface> Viewport<S> {
    pub fn new(side: Side, surface: S, config: &ViewerConfig) -> Self {
        let container = surface.size();
        Self {
            side,
            surface,
            container,
            image: None,
            transform: ViewTransform::default(),
            points: Vec::new(),
            pointer: PointerTracker::new(config.drag_threshold),
            marker_radius: config.marker_radius,
            label_size: config.label_size,
            load_generation: 0,
            revision: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    pub fn offset(&self) -> Point {
        self.transform.offset()
    }

    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Generation of the newest load request (0 before any load).
    pub fn load_generation(&self) -> u64 {
        self.load_generation
    }

    pub fn pointer_state(&self) -> PointerState {
        self.pointer.state()
    }

    pub fn canvas_size(&self) -> Size {
        self.surface.size()
    }

    pub fn container_size(&self) -> Size {
        self.container
    }

    pub fn to_screen(&self, image_pos: Point) -> Point {
        self.transform.to_screen(image_pos)
    }

    pub fn to_image(&self, screen_pos: Point) -> Point {
        self.transform.to_image(screen_pos)
    }

    /// Record the hosting container's current content size. Takes effect on
    /// the next `fit_to_container`.
    pub fn set_container_size(&mut self, size: Size) {
        self.container = size;
    }

    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    /// Start a load. Any earlier outstanding ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket {
            side: self.side,
            generation: self.load_generation,
        }
    }

    /// Install a decoded image if `ticket` is still the newest load.
    ///
    /// Clears the points, refits and re-renders. Returns `false` (and changes
    /// nothing) for a stale or foreign ticket.
    pub fn complete_load(&mut self, ticket: LoadTicket, image: DecodedImage) -> bool {
        if ticket.side != self.side || ticket.generation != self.load_generation {
            warn!(
                side = self.side.as_str(),
                ticket = ticket.generation,
                current = self.load_generation,
                "dropping stale image load"
            );
            return false;
        }
        info!(
            side = self.side.as_str(),
            width = image.width(),
            height = image.height(),
            "image loaded"
        );
        self.image = Some(image);
        self.points.clear();
        self.revision += 1;
        self.pointer.reset();
        self.fit_to_container();
        true
    }

    /// Upload, decode and install in one blocking call.
    ///
    /// On any error the previous image, transform and points are untouched.
    pub fn load_image(
        &mut self,
        uploader: &dyn UploadEndpoint,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<()> {
        let ticket = self.begin_load();
        let image = upload_and_decode(uploader, self.side, file_name, bytes)?;
        self.complete_load(ticket, image);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // View
    // ---------------------------------------------------------------------

    /// Resize the canvas to the container and fit the image inside it,
    /// centered, aspect ratio preserved.
    pub fn fit_to_container(&mut self) {
        self.surface.resize(self.container);
        if let Some(ref image) = self.image {
            self.transform = ViewTransform::fit(self.container, image.size());
            debug!(
                side = self.side.as_str(),
                scale = self.transform.scale(),
                "fit to container"
            );
        }
        self.render();
    }

    /// Zoom about the canvas center. No-op without an image.
    pub fn zoom(&mut self, factor: f64) {
        if self.image.is_none() {
            return;
        }
        let center = self.surface.size().center();
        if self.transform.zoom_about(center, factor) {
            debug!(side = self.side.as_str(), factor, scale = self.transform.scale(), "zoom");
            self.render();
        }
    }

    pub fn render(&mut self) {
        self.surface.clear();

        if let Some(ref image) = self.image {
            self.surface
                .draw_image(image, self.transform.offset(), self.transform.scale());
        }

        for (index, point) in self.points.iter().enumerate() {
            let center = self.transform.to_screen(point.position());
            self.surface
                .fill_circle(center, self.marker_radius, Color::for_marker(point.matched));
            self.surface.fill_text(
                center,
                &(index + 1).to_string(),
                self.label_size,
                Color::LABEL,
            );
        }
    }

    // ---------------------------------------------------------------------
    // Points
    // ---------------------------------------------------------------------

    /// Append an unmatched landmark at an image-space position. Returns its index.
    pub fn add_point(&mut self, image_pos: Point) -> usize {
        self.points.push(LandmarkPoint::new(image_pos));
        self.revision += 1;
        debug!(
            side = self.side.as_str(),
            index = self.points.len(),
            x = image_pos.x,
            y = image_pos.y,
            "landmark added"
        );
        self.render();
        self.points.len() - 1
    }

    /// Out-of-range indices are ignored.
    pub fn set_point_matched(&mut self, index: usize, matched: bool) {
        if let Some(point) = self.points.get_mut(index) {
            point.matched = matched;
            self.render();
        }
    }

    pub fn reset_points(&mut self) {
        self.points.clear();
        self.revision += 1;
        self.render();
    }

    // ---------------------------------------------------------------------
    // Pointer input (canvas-relative screen positions)
    // ---------------------------------------------------------------------

    pub fn pointer_down(&mut self, pos: Point, button: PointerButton) {
        self.pointer.press(pos, button);
    }

    pub fn pointer_move(&mut self, pos: Point) {
        if let Some(delta) = self.pointer.motion(pos) {
            self.transform.pan(delta);
            self.render();
        }
    }

    pub fn pointer_up(&mut self, _pos: Point, _button: PointerButton) {
        self.pointer.release();
    }

    /// Returns the index of the landmark the click placed, if any.
    pub fn click(&mut self, pos: Point) -> Option<usize> {
        if !self.pointer.click() || self.image.is_none() {
            return None;
        }
        Some(self.add_point(self.transform.to_image(pos)))
    }
}

impl Viewport<DrawList> {
    /// Viewport backed by a retained [`DrawList`] sized to `canvas`.
    pub fn with_canvas(side: Side, canvas: Size, config: &ViewerConfig) -> Self {
        Self::new(side, DrawList::new(canvas), config)
    }
}

use crate::transform::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerState {
    Idle,
    Dragging {
        /// Where the primary button went down.
        press: Point,
        /// Last position seen; pan deltas are measured from here.
        last: Point,
        /// Pointer has left the threshold circle around `press` at least once.
        moved: bool,
    },
}

/// Press/move/release/click tracking for one viewport.
///
/// Hosts deliver a click after every release, the way browsers do. A release
/// that ends a real drag arms `suppress_click`, which swallows exactly that
/// click, so panning never drops a landmark.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    state: PointerState,
    suppress_click: bool,
    threshold: f64,
}

impl PointerTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: PointerState::Idle,
            suppress_click: false,
            threshold: threshold.max(0.0),
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PointerState::Dragging { .. })
    }

    /// Returns `true` if the press started a drag.
    pub fn press(&mut self, pos: Point, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        self.state = PointerState::Dragging {
            press: pos,
            last: pos,
            moved: false,
        };
        self.suppress_click = false;
        true
    }

    /// Returns the pan delta since the last recorded position, if dragging.
    pub fn motion(&mut self, pos: Point) -> Option<Point> {
        match &mut self.state {
            PointerState::Idle => None,
            PointerState::Dragging { press, last, moved } => {
                let delta = pos - *last;
                *last = pos;
                if pos.distance(*press) > self.threshold {
                    *moved = true;
                }
                Some(delta)
            }
        }
    }

    /// Any button release ends the drag.
    pub fn release(&mut self) {
        if let PointerState::Dragging { moved: true, .. } = self.state {
            self.suppress_click = true;
        }
        self.state = PointerState::Idle;
    }

    /// Consume a click. `true` means the click should place a landmark.
    pub fn click(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        if self.suppress_click {
            self.suppress_click = false;
            return false;
        }
        true
    }

    pub fn reset(&mut self) {
        self.state = PointerState::Idle;
        self.suppress_click = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secondary_press_does_not_drag() {
        let mut t = PointerTracker::new(3.0);
        assert!(!t.press(Point::new(1.0, 1.0), PointerButton::Secondary));
        assert!(t.motion(Point::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn test_small_jitter_still_clicks() {
        let mut t = PointerTracker::new(3.0);
        t.press(Point::new(10.0, 10.0), PointerButton::Primary);
        t.motion(Point::new(11.0, 11.0));
        t.release();
        assert!(t.click());
    }

    #[test]
    fn test_suppression_is_one_shot() {
        let mut t = PointerTracker::new(3.0);
        t.press(Point::new(0.0, 0.0), PointerButton::Primary);
        t.motion(Point::new(20.0, 0.0));
        t.release();
        assert!(!t.click());
        assert!(t.click());
    }

    #[test]
    fn test_drag_back_to_start_is_still_a_drag() {
        let mut t = PointerTracker::new(3.0);
        t.press(Point::new(0.0, 0.0), PointerButton::Primary);
        t.motion(Point::new(30.0, 0.0));
        t.motion(Point::new(0.0, 0.0));
        t.release();
        assert!(!t.click());
    }
}

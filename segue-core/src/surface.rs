//! Display surface: maps pointer positions to timeline fractions and exposes
//! scroll metrics. The core never draws; it only reads geometry and sets the
//! scroll offset during edge autoscroll.

use segue_types::{Orientation, PointerEvent};

/// Visible extent of the scroll container along the timeline axis, in client
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub start: f64,
    pub end: f64,
}

impl ViewportRect {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }
}

pub trait Surface {
    /// Timeline fraction in `[0, 1]` under the pointer, including scroll.
    fn position_to_fraction(&self, event: &PointerEvent) -> f64;

    fn scroll_offset(&self) -> f64;

    fn set_scroll_offset(&mut self, offset: f64);

    /// Full scrollable extent in pixels.
    fn scroll_width(&self) -> f64;

    /// Visible extent in pixels.
    fn viewport_width(&self) -> f64;

    fn viewport_rect(&self) -> ViewportRect;

    fn orientation(&self) -> Orientation;

    /// Horizontal zoom, used to convert grabbed time offsets to pixels.
    fn px_per_sec(&self) -> f64;

    /// Whether the host lets the timeline scroll at all.
    fn scroll_enabled(&self) -> bool {
        true
    }

    /// Drawable width used for pixel geometry of rendered intervals.
    fn drawable_width(&self) -> f64 {
        self.scroll_width()
    }

    fn max_scroll(&self) -> f64 {
        (self.scroll_width() - self.viewport_width()).max(0.0)
    }

    /// Content overflows the viewport.
    fn is_scrollable(&self) -> bool {
        self.viewport_width() < self.scroll_width()
    }
}

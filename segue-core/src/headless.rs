//! In-memory collaborators for tests, replay and the CLI.

use segue_types::{Orientation, PointerEvent};

use crate::surface::{Surface, ViewportRect};
use crate::transport::Transport;

/// Transport with settable time and duration that records every play call.
#[derive(Debug, Clone, Default)]
pub struct ManualTransport {
    pub time: f64,
    pub duration: f64,
    pub plays: Vec<(f64, Option<f64>)>,
}

impl ManualTransport {
    pub fn new(duration: f64) -> Self {
        Self {
            time: 0.0,
            duration,
            plays: Vec::new(),
        }
    }

    pub fn last_play(&self) -> Option<(f64, Option<f64>)> {
        self.plays.last().copied()
    }
}

impl Transport for ManualTransport {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn play(&mut self, start: f64, end: Option<f64>) {
        self.plays.push((start, end));
        self.time = start;
    }
}

/// Linear surface: content `scroll_width` px wide shown through a viewport of
/// `viewport_width` px whose leading edge sits at `left` in client space.
#[derive(Debug, Clone)]
pub struct StaticSurface {
    pub left: f64,
    pub viewport_width: f64,
    pub scroll_width: f64,
    pub scroll: f64,
    pub orientation: Orientation,
    pub px_per_sec: f64,
    pub scroll_enabled: bool,
}

impl StaticSurface {
    /// Non-scrolling surface where one second spans `px_per_sec` pixels.
    pub fn fit(duration: f64, px_per_sec: f64) -> Self {
        let width = duration * px_per_sec;
        Self {
            left: 0.0,
            viewport_width: width,
            scroll_width: width,
            scroll: 0.0,
            orientation: Orientation::Horizontal,
            px_per_sec,
            scroll_enabled: true,
        }
    }

    /// Scrollable surface: content of `duration * px_per_sec` pixels shown
    /// through `viewport_width` pixels.
    pub fn scrolling(duration: f64, px_per_sec: f64, viewport_width: f64) -> Self {
        Self {
            viewport_width,
            ..Self::fit(duration, px_per_sec)
        }
    }

    /// Client coordinate along the axis that lands on `fraction` given the
    /// current scroll offset.
    pub fn client_for_fraction(&self, fraction: f64) -> f64 {
        self.left + fraction * self.scroll_width - self.scroll
    }
}

impl Surface for StaticSurface {
    fn position_to_fraction(&self, event: &PointerEvent) -> f64 {
        if self.scroll_width <= 0.0 {
            return 0.0;
        }
        let along = event.along(self.orientation);
        ((along - self.left + self.scroll) / self.scroll_width).clamp(0.0, 1.0)
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll = offset.clamp(0.0, self.max_scroll());
    }

    fn scroll_width(&self) -> f64 {
        self.scroll_width
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn viewport_rect(&self) -> ViewportRect {
        ViewportRect::new(self.left, self.left + self.viewport_width)
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn px_per_sec(&self) -> f64 {
        self.px_per_sec
    }

    fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }
}

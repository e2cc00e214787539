//! Edge autoscroll.
//!
//! While a gesture holds the pointer near a viewport edge the surface scrolls a
//! fixed amount per animation frame. The host drives frames by calling
//! `Timeline::on_frame` for as long as `Timeline::wants_frame` reports true;
//! each frame replays the pointer event that armed the task. A task never
//! outlives its gesture: the owner passes the gesture's liveness to
//! [`Autoscroll::next_frame`], and a dead gesture drops the task.

use segue_types::PointerEvent;

use crate::surface::ViewportRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Towards the timeline start.
    Backward,
    /// Towards the timeline end.
    Forward,
}

impl ScrollDirection {
    pub fn sign(self) -> f64 {
        match self {
            ScrollDirection::Backward => -1.0,
            ScrollDirection::Forward => 1.0,
        }
    }
}

/// Direction to scroll when `pos` lies strictly inside a band of `band`
/// pixels at either end of `viewport`.
pub fn edge_direction(pos: f64, viewport: ViewportRect, band: f64) -> Option<ScrollDirection> {
    if pos < viewport.start + band {
        Some(ScrollDirection::Backward)
    } else if pos > viewport.end - band {
        Some(ScrollDirection::Forward)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeScroll {
    direction: ScrollDirection,
    event: PointerEvent,
    frames: u64,
}

impl EdgeScroll {
    pub fn new(direction: ScrollDirection, event: PointerEvent) -> Self {
        Self {
            direction,
            event,
            frames: 0,
        }
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn event(&self) -> &PointerEvent {
        &self.event
    }

    /// Frames this task has run for, not counting the step taken when armed.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Holds at most one pending edge-scroll task for a gesture.
#[derive(Debug, Default)]
pub struct Autoscroll {
    task: Option<EdgeScroll>,
}

impl Autoscroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` for the next frame, replacing any pending one.
    pub fn arm(&mut self, task: EdgeScroll) {
        self.task = Some(task);
    }

    pub fn cancel(&mut self) {
        if self.task.take().is_some() {
            log::trace!(target: "interaction", "edge scroll cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.task.as_ref().map(|t| t.direction)
    }

    /// Take the pending task for this frame. Returns `None` when nothing is
    /// pending or when the owning gesture has ended, in which case the task
    /// is dropped. The caller re-arms the task if its step wants to continue.
    pub fn next_frame(&mut self, live: bool) -> Option<EdgeScroll> {
        let mut task = self.task.take()?;
        if !live {
            log::trace!(target: "interaction", "edge scroll dropped: gesture ended");
            return None;
        }
        task.frames += 1;
        Some(task)
    }
}

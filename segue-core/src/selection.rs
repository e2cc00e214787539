//! Drag-to-select: create an interval by dragging across empty timeline.

use serde::{Deserialize, Serialize};

use segue_types::{IntervalId, IntervalParams, IntervalPatch, PointerEvent, PointerPhase, Span};

use crate::autoscroll::{Autoscroll, EdgeScroll, ScrollDirection};
use crate::interaction::{InteractionContext, Response};
use crate::surface::ViewportRect;

pub const DEFAULT_SLOP: u32 = 2;
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 10.0;

/// Options for drag-to-select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionOptions {
    /// Template for the interval a selection creates.
    pub params: IntervalParams,
    /// Pointer moves ignored after pointer-down before a selection starts.
    pub slop: u32,
    pub scroll: bool,
    /// Pixels scrolled per frame while the pointer sits in the edge band.
    pub scroll_speed: f64,
    /// Width in pixels of the edge band that triggers autoscroll.
    pub scroll_threshold: f64,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            params: IntervalParams::default(),
            slop: DEFAULT_SLOP,
            scroll: true,
            scroll_speed: 1.0,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    /// Pointer is down; no interval exists yet.
    Armed,
    /// The selection interval has been created and follows the pointer.
    Creating(IntervalId),
}

#[derive(Debug)]
pub struct SelectionController {
    options: SelectionOptions,
    state: SelectionState,
    /// Timeline fraction at pointer-down.
    anchor: f64,
    duration: f64,
    touch_id: Option<u32>,
    moves: u32,
    max_scroll: f64,
    viewport: ViewportRect,
    autoscroll: Autoscroll,
}

impl SelectionController {
    pub fn new(options: SelectionOptions) -> Self {
        Self {
            options,
            state: SelectionState::Idle,
            anchor: 0.0,
            duration: 0.0,
            touch_id: None,
            moves: 0,
            max_scroll: 0.0,
            viewport: ViewportRect::new(0.0, 0.0),
            autoscroll: Autoscroll::new(),
        }
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn wants_frame(&self) -> bool {
        self.autoscroll.is_active()
    }

    pub fn handle(&mut self, event: &PointerEvent, ctx: &mut InteractionContext<'_>) -> Response {
        match event.phase {
            PointerPhase::Down => {
                self.pointer_down(event, ctx);
                Response::default()
            }
            PointerPhase::Move => {
                self.pointer_move(event, ctx);
                Response::default()
            }
            PointerPhase::Up | PointerPhase::Leave => self.pointer_up(event, ctx),
            _ => Response::default(),
        }
    }

    pub fn on_frame(&mut self, ctx: &mut InteractionContext<'_>) {
        let live = match &self.state {
            SelectionState::Creating(id) => ctx.store.contains(id),
            _ => false,
        };
        if let Some(task) = self.autoscroll.next_frame(live) {
            if self.edge_step(&task, ctx) {
                self.autoscroll.arm(task);
            }
        }
    }

    fn pointer_down(&mut self, event: &PointerEvent, ctx: &mut InteractionContext<'_>) {
        if event.is_multi_touch() {
            return;
        }
        self.duration = ctx.duration();
        self.touch_id = event.touch_id;
        self.max_scroll = ctx.surface.max_scroll();
        self.viewport = ctx.surface.viewport_rect();
        self.anchor = ctx.fraction_at(event);
        self.moves = 0;
        self.state = SelectionState::Armed;
        self.autoscroll.cancel();
    }

    fn pointer_move(&mut self, event: &PointerEvent, ctx: &mut InteractionContext<'_>) {
        if self.state == SelectionState::Idle {
            return;
        }
        if event.is_multi_touch() || event.foreign_touch(self.touch_id) {
            return;
        }
        self.moves += 1;
        if self.moves <= self.options.slop {
            return;
        }

        if self.state == SelectionState::Armed {
            let marker = ctx.marker_span();
            let Some(interval) = ctx.store.add(self.options.params.clone(), self.duration, marker)
            else {
                // At capacity: keep trying on later moves.
                return;
            };
            log::debug!(target: "selection", "selection created interval {}", interval.id());
            self.state = SelectionState::Creating(interval.id().clone());
        }

        let fraction = ctx.fraction_at(event);
        if !self.track(fraction, ctx) {
            return;
        }

        if self.options.scroll && ctx.surface.scroll_enabled() && ctx.surface.is_scrollable() {
            let pos = event.along(ctx.surface.orientation()) - self.viewport.start;
            let threshold = self.options.scroll_threshold;
            let direction = if pos <= threshold {
                Some(ScrollDirection::Backward)
            } else if pos >= self.viewport.len() - threshold {
                Some(ScrollDirection::Forward)
            } else {
                None
            };
            match direction {
                Some(direction) => {
                    let task = EdgeScroll::new(direction, event.clone());
                    if self.edge_step(&task, ctx) {
                        self.autoscroll.arm(task);
                    } else {
                        self.autoscroll.cancel();
                    }
                }
                None => self.autoscroll.cancel(),
            }
        }
    }

    fn pointer_up(&mut self, event: &PointerEvent, ctx: &mut InteractionContext<'_>) -> Response {
        if event.is_multi_touch() {
            return Response::default();
        }
        let finished = std::mem::take(&mut self.state);
        self.moves = 0;
        self.autoscroll.cancel();

        let mut response = Response::default();
        if let SelectionState::Creating(id) = finished {
            response.suppress_click = true;
            if let Some(interval) = ctx.store.get_mut(&id) {
                interval.finish_gesture(Some(event.clone()));
            }
            log::debug!(target: "selection", "selection {} finished", id);
        }
        response
    }

    /// Stretch the selection between the anchor and `fraction`. Returns false
    /// when the selection interval no longer exists.
    fn track(&mut self, fraction: f64, ctx: &mut InteractionContext<'_>) -> bool {
        let SelectionState::Creating(id) = &self.state else {
            return false;
        };
        let Some(interval) = ctx.store.get_mut(id) else {
            log::debug!(target: "selection", "selection interval {} removed mid-drag", id);
            self.state = SelectionState::Idle;
            self.autoscroll.cancel();
            return false;
        };
        let snap = interval.snap();
        let a = snap.quantize(self.anchor * self.duration);
        let b = snap.quantize(fraction * self.duration);
        let span = Span::ordered(a, b);
        interval.update(IntervalPatch::span(span.start, span.end), None, self.duration);
        true
    }

    /// One autoscroll step. Continues while there is room left to scroll.
    fn edge_step(&mut self, task: &EdgeScroll, ctx: &mut InteractionContext<'_>) -> bool {
        let current = ctx.surface.scroll_offset();
        let target = (current + self.options.scroll_speed * task.direction().sign())
            .max(0.0)
            .min(self.max_scroll);
        ctx.surface.set_scroll_offset(target);
        log::trace!(target: "selection", "edge scroll to {:.1}px", target);

        let fraction = ctx.fraction_at(task.event());
        if !self.track(fraction, ctx) {
            return false;
        }
        target < self.max_scroll && target > 0.0
    }
}

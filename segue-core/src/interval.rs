//! A single time-bounded annotation on the timeline.
//!
//! An [`Interval`] is created and owned by the
//! [`IntervalStore`](crate::store::IntervalStore). Every mutation goes through
//! [`Interval::update`], which merges a partial patch and then re-clamps the
//! geometry so that `0 <= start <= end <= duration` holds afterwards.

use std::collections::BTreeMap;

use segue_types::{
    finite_or_zero, EventParams, HostEvent, IntervalId, IntervalParams, IntervalPatch,
    IntervalSignal, PointerEvent, PointerPhase, SnapGrid, Span,
};

use crate::emitter::{Emitter, EventBus};
use crate::render::{format_span, pixel_extent, PixelExtent, TimeFormat};
use crate::transport::Transport;

pub const DEFAULT_COLOR: &str = "rgba(0, 0, 0, 0.1)";
pub const DEFAULT_SCROLL_SPEED: f64 = 1.0;
pub const DEFAULT_LINE1: &str = "Lyric line 1";
pub const DEFAULT_LINE2: &str = "Lyric line 2";

pub struct Interval {
    id: IntervalId,
    start: f64,
    end: f64,
    min_length: Option<f64>,
    max_length: Option<f64>,
    looping: bool,
    drag: bool,
    resize: bool,
    color: String,
    attributes: BTreeMap<String, String>,
    data: serde_json::Value,
    snap: SnapGrid,
    scroll: bool,
    scroll_speed: f64,
    edge_scroll_width: f64,
    line1: String,
    line2: String,
    show_tooltip: bool,
    prevent_context_menu: bool,
    time_format: Option<TimeFormat>,

    // Reflect the controller's gesture for `interval-updated` listeners.
    is_dragging: bool,
    is_resizing: bool,

    // Last playback-link state.
    fired_in: bool,
    fired_out: bool,
    linked: bool,

    attached: bool,
    signals: Emitter<IntervalSignal>,
    bus: EventBus,
}

impl std::fmt::Debug for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interval")
            .field("id", &self.id)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("looping", &self.looping)
            .field("attached", &self.attached)
            .finish()
    }
}

impl Interval {
    /// Build an interval from fully resolved parameters.
    ///
    /// `marker_span` is the length given to an interval created without an
    /// explicit `end`.
    pub(crate) fn new(
        id: IntervalId,
        params: IntervalParams,
        duration: f64,
        marker_span: f64,
        bus: EventBus,
    ) -> Self {
        let start = finite_or_zero(params.start);
        let end = match params.end {
            Some(end) => finite_or_zero(end),
            None => start + finite_or_zero(marker_span),
        };
        let mut interval = Self {
            id,
            start,
            end,
            min_length: params.min_length.map(finite_or_zero),
            max_length: params.max_length.map(finite_or_zero),
            looping: params.looping,
            drag: params.drag,
            resize: params.resize,
            color: params.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            attributes: params.attributes,
            data: params.data,
            snap: params.snap.unwrap_or_default(),
            scroll: params.scroll.unwrap_or(true),
            scroll_speed: params.scroll_speed.unwrap_or(DEFAULT_SCROLL_SPEED),
            edge_scroll_width: params.edge_scroll_width.unwrap_or(0.0),
            line1: params.line1.unwrap_or_else(|| DEFAULT_LINE1.to_string()),
            line2: params.line2.unwrap_or_else(|| DEFAULT_LINE2.to_string()),
            show_tooltip: params.show_tooltip.unwrap_or(true),
            prevent_context_menu: params.prevent_context_menu,
            time_format: None,
            is_dragging: false,
            is_resizing: false,
            fired_in: false,
            fired_out: false,
            linked: true,
            attached: true,
            signals: Emitter::new(),
            bus,
        };
        interval.constrain(duration);
        interval
    }

    pub fn id(&self) -> &IntervalId {
        &self.id
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn min_length(&self) -> Option<f64> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<f64> {
        self.max_length
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn drag_enabled(&self) -> bool {
        self.drag
    }

    pub fn resize_enabled(&self) -> bool {
        self.resize
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    pub fn snap(&self) -> SnapGrid {
        self.snap
    }

    pub fn scroll(&self) -> bool {
        self.scroll
    }

    pub fn scroll_speed(&self) -> f64 {
        self.scroll_speed
    }

    /// Distance from the viewport edge, in pixels, at which a gesture on this
    /// interval starts autoscrolling.
    pub fn edge_scroll_width(&self) -> f64 {
        self.edge_scroll_width
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_resizing(&self) -> bool {
        self.is_resizing
    }

    pub fn fired_in(&self) -> bool {
        self.fired_in
    }

    pub fn fired_out(&self) -> bool {
        self.fired_out
    }

    /// Still registered with the playback linker.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// False once [`remove`](Self::remove) has run.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Per-interval notifications (render, update, remove, in/out, play).
    pub fn signals(&self) -> &Emitter<IntervalSignal> {
        &self.signals
    }

    pub fn pixel_extent(&self, duration: f64, width: f64) -> PixelExtent {
        pixel_extent(self.span(), duration, width)
    }

    pub fn line1(&self) -> &str {
        &self.line1
    }

    pub fn line2(&self) -> &str {
        &self.line2
    }

    pub fn show_tooltip(&self) -> bool {
        self.show_tooltip
    }

    pub fn set_show_tooltip(&mut self, show: bool) {
        self.show_tooltip = show;
    }

    pub fn prevent_context_menu(&self) -> bool {
        self.prevent_context_menu
    }

    pub fn time_format(&self) -> Option<&TimeFormat> {
        self.time_format.as_ref()
    }

    pub fn set_time_format(&mut self, format: Option<TimeFormat>) {
        self.time_format = format;
    }

    /// Hover text for the current span, or `None` when tooltips are off.
    pub fn tooltip(&self) -> Option<String> {
        if !self.show_tooltip {
            return None;
        }
        Some(match &self.time_format {
            Some(format) => format.format(self.start, self.end),
            None => format_span(self.start, self.end),
        })
    }

    /// Report a discrete pointer event aimed at this interval to the host.
    ///
    /// Returns whether the host should suppress the platform default for the
    /// event. Gesture phases are ignored.
    pub fn pointer_event(&self, event: &PointerEvent) -> bool {
        if !self.attached {
            return false;
        }
        let id = self.id.clone();
        let input = event.clone();
        let (host_event, prevent_default) = match event.phase {
            PointerPhase::Click => (HostEvent::Click { id, input }, true),
            PointerPhase::DoubleClick => (HostEvent::DoubleClick { id, input }, true),
            PointerPhase::ContextMenu => (
                HostEvent::ContextMenu { id, input },
                self.prevent_context_menu,
            ),
            PointerPhase::Enter => (HostEvent::MouseEnter { id, input }, false),
            PointerPhase::Exit => (HostEvent::MouseLeave { id, input }, false),
            PointerPhase::Down | PointerPhase::Move | PointerPhase::Up | PointerPhase::Leave => {
                return false
            }
        };
        self.bus.emit(host_event);
        prevent_default
    }

    /// Merge the supplied fields, re-clamp and notify.
    ///
    /// Fields left as `None` in the patch are untouched. Returns false if the
    /// interval has already been removed.
    pub fn update(
        &mut self,
        patch: IntervalPatch,
        params: Option<EventParams>,
        duration: f64,
    ) -> bool {
        if !self.attached {
            return false;
        }
        if let Some(start) = patch.start {
            self.start = finite_or_zero(start);
        }
        if let Some(end) = patch.end {
            self.end = finite_or_zero(end);
        }
        if let Some(looping) = patch.looping {
            self.looping = looping;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(data) = patch.data {
            self.data = data;
        }
        if let Some(resize) = patch.resize {
            self.resize = resize;
        }
        if let Some(drag) = patch.drag {
            self.drag = drag;
        }
        if let Some(max_length) = patch.max_length {
            self.max_length = Some(finite_or_zero(max_length));
        }
        if let Some(min_length) = patch.min_length {
            self.min_length = Some(finite_or_zero(min_length));
        }
        if let Some(attributes) = patch.attributes {
            self.attributes = attributes;
        }
        if let Some(line1) = patch.line1 {
            self.line1 = line1;
        }
        if let Some(line2) = patch.line2 {
            self.line2 = line2;
        }

        self.constrain(duration);
        self.signals.emit(&IntervalSignal::Render(self.span()));
        self.signals.emit(&IntervalSignal::Update);
        self.bus.emit(HostEvent::Updated {
            id: self.id.clone(),
            span: self.span(),
            params,
        });
        true
    }

    /// Re-clamp against the current duration and re-emit the render
    /// notification, without an `update` event.
    pub fn refresh(&mut self, duration: f64) {
        if !self.attached {
            return;
        }
        self.constrain(duration);
        self.signals.emit(&IntervalSignal::Render(self.span()));
    }

    /// Detach the interval. Safe to call repeatedly; only the first call
    /// notifies.
    pub fn remove(&mut self) -> bool {
        if !self.attached {
            return false;
        }
        self.attached = false;
        self.linked = false;
        self.is_dragging = false;
        self.is_resizing = false;
        self.signals.emit(&IntervalSignal::Remove);
        self.bus.emit(HostEvent::Removed {
            id: self.id.clone(),
        });
        true
    }

    /// Play `[start, end]`, or `[offset, end]` when an offset is given.
    pub fn play(&self, offset: Option<f64>, transport: &mut dyn Transport) {
        if !self.attached {
            return;
        }
        let from = offset.map(finite_or_zero).unwrap_or(self.start);
        transport.play(from, Some(self.end));
        self.signals.emit(&IntervalSignal::Play);
        self.bus.emit(HostEvent::Play {
            id: self.id.clone(),
        });
    }

    pub fn play_loop(&mut self, offset: Option<f64>, transport: &mut dyn Transport) {
        self.looping = true;
        self.play(offset, transport);
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub(crate) fn set_gesture(&mut self, dragging: bool, resizing: bool) {
        self.is_dragging = dragging;
        self.is_resizing = resizing;
    }

    pub(crate) fn finish_gesture(&mut self, input: Option<PointerEvent>) {
        self.signals.emit(&IntervalSignal::UpdateEnd);
        self.bus.emit(HostEvent::UpdateEnd {
            id: self.id.clone(),
            input,
        });
    }

    pub(crate) fn enter(&mut self) {
        self.fired_in = true;
        self.fired_out = false;
        self.signals.emit(&IntervalSignal::In);
        self.bus.emit(HostEvent::In {
            id: self.id.clone(),
        });
    }

    pub(crate) fn exit(&mut self) {
        self.fired_out = true;
        self.fired_in = false;
        self.signals.emit(&IntervalSignal::Out);
        self.bus.emit(HostEvent::Out {
            id: self.id.clone(),
        });
    }

    pub(crate) fn reset_link(&mut self) {
        self.fired_in = false;
        self.fired_out = false;
    }

    /// Apply the geometry constraints in order: bounds ordering, shift into
    /// `[0, duration]` preserving length, extend `end` for `min_length`, then
    /// shrink `end` for `max_length`.
    ///
    /// A non-positive duration means the media is not loaded yet; the upper
    /// bound is skipped until it is.
    fn constrain(&mut self, duration: f64) {
        if self.start > self.end {
            std::mem::swap(&mut self.start, &mut self.end);
        }
        if self.start < 0.0 {
            self.end -= self.start;
            self.start = 0.0;
        }
        let bounded = duration.is_finite() && duration > 0.0;
        if bounded && self.end > duration {
            self.start -= self.end - duration;
            self.end = duration;
            if self.start < 0.0 {
                self.start = 0.0;
            }
        }
        if let Some(min) = self.min_length {
            if self.end - self.start < min {
                self.end = self.start + min;
                if bounded && self.end > duration {
                    // Extending ran off the timeline: keep the floor by
                    // pulling start back; a timeline shorter than the floor
                    // leaves the whole timeline selected.
                    self.end = duration;
                    self.start = (duration - min).max(0.0);
                }
            }
        }
        if let Some(max) = self.max_length {
            let max = max.max(0.0);
            if self.end - self.start > max {
                self.end = self.start + max;
            }
        }
    }
}

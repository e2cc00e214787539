//! Drag and resize of existing intervals.
//!
//! One [`PointerInteractionController`] exists per interval. Pointer-down is
//! routed only to the controller of the interval under the pointer; move and
//! up events are broadcast to every controller and only the one with a live
//! gesture acts on them.

use segue_types::{
    EventParams, IntervalId, IntervalPart, IntervalPatch, PointerEvent, PointerPhase,
    PointerTarget, Side,
};

use crate::autoscroll::{edge_direction, Autoscroll, EdgeScroll};
use crate::interval::Interval;
use crate::store::IntervalStore;
use crate::surface::{Surface, ViewportRect};
use crate::transport::Transport;

/// Borrowed view of a timeline handed to controllers for one event or frame.
pub struct InteractionContext<'a> {
    pub store: &'a mut IntervalStore,
    pub transport: &'a dyn Transport,
    pub surface: &'a mut dyn Surface,
    pub marker_width_px: f64,
}

impl<'a> InteractionContext<'a> {
    pub fn new(
        store: &'a mut IntervalStore,
        transport: &'a dyn Transport,
        surface: &'a mut dyn Surface,
        marker_width_px: f64,
    ) -> Self {
        Self {
            store,
            transport,
            surface,
            marker_width_px,
        }
    }

    pub fn duration(&self) -> f64 {
        self.transport.duration()
    }

    pub fn fraction_at(&self, event: &PointerEvent) -> f64 {
        self.surface.position_to_fraction(event)
    }

    /// Timeline seconds under the pointer, before snapping.
    pub fn time_at(&self, event: &PointerEvent) -> f64 {
        self.fraction_at(event) * self.duration()
    }

    pub fn marker_span(&self) -> f64 {
        marker_span(
            self.marker_width_px,
            self.surface.scroll_width(),
            self.duration(),
        )
    }
}

/// Seconds covered by `width_px` pixels on a drawable `scroll_width` pixels
/// wide. Used as the length of intervals created without an end.
pub fn marker_span(width_px: f64, scroll_width: f64, duration: f64) -> f64 {
    if scroll_width > 0.0 && duration.is_finite() {
        width_px / scroll_width * duration
    } else {
        0.0
    }
}

/// What a controller did with a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Response {
    /// The event started a gesture and must not reach drag-to-select.
    pub consumed: bool,
    /// A gesture that changed geometry just ended; swallow the next click.
    pub suppress_click: bool,
    /// A click arrived right after such a gesture and was dropped.
    pub click_dropped: bool,
    /// The host should cancel the platform default for this event.
    pub prevent_default: bool,
}

impl Response {
    pub fn merge(self, other: Response) -> Response {
        Response {
            consumed: self.consumed || other.consumed,
            suppress_click: self.suppress_click || other.suppress_click,
            click_dropped: self.click_dropped || other.click_dropped,
            prevent_default: self.prevent_default || other.prevent_default,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging,
    Resizing(Side),
}

#[derive(Debug, Clone, Copy)]
struct Session {
    /// Snapped pointer time at the last applied step.
    anchor: f64,
    /// Distance from the grabbed point to `start` and to `end` at pointer-down.
    left_half: f64,
    right_half: f64,
    touch_id: Option<u32>,
    max_scroll: f64,
    viewport: ViewportRect,
}

fn bounded(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// Shift `interval` by `delta` seconds, clamped so the whole interval stays
/// inside `[0, duration]`. Length is preserved.
pub fn drag_by(interval: &mut Interval, delta: f64, duration: f64) -> bool {
    let mut delta = delta;
    if bounded(duration) && interval.end() + delta > duration {
        delta = duration - interval.end();
    }
    if interval.start() + delta < 0.0 {
        delta = -interval.start();
    }
    interval.update(
        IntervalPatch::span(interval.start() + delta, interval.end() + delta),
        Some(EventParams::drag(delta)),
        duration,
    )
}

/// Move one edge of `interval` by `delta` seconds, honouring the length
/// limits and the timeline bounds.
///
/// Returns the side the pointer now holds: dragging a handle past the
/// opposite one swaps the bounds, and the grabbed handle becomes the other
/// side.
pub fn resize_by(interval: &mut Interval, delta: f64, side: Side, duration: f64) -> Side {
    let (start, end) = (interval.start(), interval.end());
    let mut delta = delta;
    let moved = match side {
        Side::Start => {
            if let Some(min) = interval.min_length() {
                if delta > 0.0 && end - (start + delta) < min {
                    delta = end - min - start;
                }
            }
            if let Some(max) = interval.max_length() {
                if delta < 0.0 && end - (start + delta) > max {
                    delta = end - start - max;
                }
            }
            if delta < 0.0 && start + delta < 0.0 {
                delta = -start;
            }
            start + delta
        }
        Side::End => {
            if let Some(min) = interval.min_length() {
                if delta < 0.0 && end + delta - start < min {
                    delta = start + min - end;
                }
            }
            if let Some(max) = interval.max_length() {
                if delta > 0.0 && end + delta - start > max {
                    delta = max - (end - start);
                }
            }
            if delta > 0.0 && bounded(duration) && end + delta > duration {
                delta = duration - end;
            }
            end + delta
        }
    };
    let fixed = match side {
        Side::Start => end,
        Side::End => start,
    };
    interval.update(
        IntervalPatch::span(moved.min(fixed), moved.max(fixed)),
        Some(EventParams::resize(side)),
        duration,
    );
    let flipped = match side {
        Side::Start => moved > fixed,
        Side::End => moved < fixed,
    };
    if flipped {
        side.opposite()
    } else {
        side
    }
}

/// Gesture state machine for a single interval.
#[derive(Debug)]
pub struct PointerInteractionController {
    id: IntervalId,
    gesture: Gesture,
    session: Option<Session>,
    updated: bool,
    autoscroll: Autoscroll,
}

impl PointerInteractionController {
    pub fn new(id: IntervalId) -> Self {
        Self {
            id,
            gesture: Gesture::Idle,
            session: None,
            updated: false,
            autoscroll: Autoscroll::new(),
        }
    }

    pub fn id(&self) -> &IntervalId {
        &self.id
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    pub fn wants_frame(&self) -> bool {
        self.autoscroll.is_active()
    }

    pub fn handle(&mut self, event: &PointerEvent, ctx: &mut InteractionContext<'_>) -> Response {
        match event.phase {
            PointerPhase::Down => match &event.target {
                PointerTarget::Interval { id, part } if *id == self.id => {
                    self.pointer_down(event, *part, ctx)
                }
                _ => Response::default(),
            },
            PointerPhase::Move => self.pointer_move(event, ctx),
            PointerPhase::Up => self.pointer_up(event, ctx),
            _ => Response::default(),
        }
    }

    /// Run one pending edge-scroll step, if any.
    pub fn on_frame(&mut self, ctx: &mut InteractionContext<'_>) {
        let live = self.is_active() && ctx.store.contains(&self.id);
        if let Some(task) = self.autoscroll.next_frame(live) {
            if self.edge_step(&task, ctx) {
                self.autoscroll.arm(task);
            }
        }
    }

    /// Abandon any gesture without emitting `update-end`.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.session = None;
        self.updated = false;
        self.autoscroll.cancel();
    }

    fn pointer_down(
        &mut self,
        event: &PointerEvent,
        part: IntervalPart,
        ctx: &mut InteractionContext<'_>,
    ) -> Response {
        if event.is_multi_touch() {
            return Response::default();
        }
        let raw = ctx.time_at(event);
        let max_scroll = ctx.surface.max_scroll();
        let viewport = ctx.surface.viewport_rect();
        let Some(interval) = ctx.store.get_mut(&self.id) else {
            return Response::default();
        };
        if !interval.drag_enabled() && !interval.resize_enabled() {
            return Response::default();
        }

        let anchor = interval.snap().quantize(raw);
        self.session = Some(Session {
            anchor,
            left_half: anchor - interval.start(),
            right_half: interval.end() - anchor,
            touch_id: event.touch_id,
            max_scroll,
            viewport,
        });
        self.gesture = match part {
            IntervalPart::Handle(side) => Gesture::Resizing(side),
            IntervalPart::Body => Gesture::Dragging,
        };
        interval.set_gesture(
            self.gesture == Gesture::Dragging,
            matches!(self.gesture, Gesture::Resizing(_)),
        );
        self.autoscroll.cancel();
        log::debug!(target: "interaction", "interval {} {:?} from {:.3}s", self.id, self.gesture, anchor);
        Response {
            consumed: true,
            ..Response::default()
        }
    }

    fn pointer_move(&mut self, event: &PointerEvent, ctx: &mut InteractionContext<'_>) -> Response {
        if event.is_multi_touch() || !self.is_active() {
            return Response::default();
        }
        let Some(session) = self.session else {
            return Response::default();
        };
        if event.foreign_touch(session.touch_id) {
            return Response::default();
        }

        let duration = ctx.duration();
        let raw = ctx.time_at(event);
        let Some(interval) = ctx.store.get_mut(&self.id) else {
            log::debug!(target: "interaction", "interval {} vanished mid-gesture", self.id);
            self.reset();
            return Response::default();
        };
        let (time, _) = clamp_time(
            self.gesture,
            interval.snap().quantize(raw),
            interval,
            &session,
            duration,
        );
        let delta = time - session.anchor;
        self.set_anchor(time);
        self.commit(interval, delta, duration);
        let scroll = interval.scroll();
        let edge_width = interval.edge_scroll_width();

        if scroll && ctx.surface.scroll_enabled() && ctx.surface.is_scrollable() {
            let along = event.along(ctx.surface.orientation());
            match edge_direction(along, session.viewport, edge_width) {
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
        Response::default()
    }

    fn pointer_up(&mut self, event: &PointerEvent, ctx: &mut InteractionContext<'_>) -> Response {
        if event.is_multi_touch() {
            return Response::default();
        }
        let mut response = Response::default();
        if self.is_active() {
            self.gesture = Gesture::Idle;
            self.session = None;
            self.autoscroll.cancel();
            if let Some(interval) = ctx.store.get_mut(&self.id) {
                interval.set_gesture(false, false);
            }
        }
        if self.updated {
            self.updated = false;
            response.suppress_click = true;
            if let Some(interval) = ctx.store.get_mut(&self.id) {
                interval.finish_gesture(Some(event.clone()));
            }
            log::debug!(target: "interaction", "interval {} gesture committed", self.id);
        }
        response
    }

    /// One autoscroll step. Returns whether another frame should follow.
    ///
    /// The scroll target is bounded so that the grabbed point of a dragged
    /// interval never passes the viewport edge, which would make the interval
    /// jump when scrolling stops.
    fn edge_step(&mut self, task: &EdgeScroll, ctx: &mut InteractionContext<'_>) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        if !self.is_active() {
            return false;
        }
        let duration = ctx.duration();
        let raw = ctx.time_at(task.event());
        let along = task.event().along(ctx.surface.orientation());
        let scroll = ctx.surface.scroll_offset();
        let px_per_sec = ctx.surface.px_per_sec();
        let Some(interval) = ctx.store.get_mut(&self.id) else {
            return false;
        };

        let speed = interval.scroll_speed();
        let sign = task.direction().sign();
        let (time, at_floor) = clamp_time(
            self.gesture,
            interval.snap().quantize(raw),
            interval,
            &session,
            duration,
        );
        let (grab_px, edge_dist, adjustment) = match self.gesture {
            Gesture::Dragging if sign < 0.0 => (
                session.left_half * px_per_sec,
                along - session.viewport.start,
                0.0,
            ),
            Gesture::Dragging => (
                session.right_half * px_per_sec,
                session.viewport.end - along,
                0.0,
            ),
            // A resize pinned at its minimum length stops the scroll.
            _ if at_floor => (0.0, 0.0, speed * sign),
            _ => (0.0, 0.0, 0.0),
        };

        let max_scroll = session.max_scroll;
        if sign < 0.0 {
            if scroll.round() == 0.0 || (scroll - grab_px + edge_dist).round() <= 0.0 {
                return false;
            }
        } else if scroll.round() == max_scroll.round()
            || (scroll + grab_px - edge_dist).round() >= max_scroll
        {
            return false;
        }

        let target = scroll - adjustment + speed * sign;
        let target = if sign < 0.0 {
            (grab_px - edge_dist).max(target)
        } else {
            (max_scroll - grab_px + edge_dist).min(target)
        };
        ctx.surface.set_scroll_offset(target);
        let scrolled = ctx.surface.scroll_offset() != scroll;

        let delta = time - session.anchor;
        self.set_anchor(time);
        self.commit(interval, delta, duration);
        log::trace!(target: "interaction", "interval {} edge scroll to {:.1}px", self.id, target);
        scrolled
    }

    fn set_anchor(&mut self, time: f64) {
        if let Some(session) = self.session.as_mut() {
            session.anchor = time;
        }
    }

    fn commit(&mut self, interval: &mut Interval, delta: f64, duration: f64) {
        match self.gesture {
            Gesture::Dragging if interval.drag_enabled() => {
                self.updated = self.updated || delta != 0.0;
                drag_by(interval, delta, duration);
            }
            Gesture::Resizing(side) if interval.resize_enabled() => {
                self.updated = self.updated || delta != 0.0;
                let held = resize_by(interval, delta, side, duration);
                if held != side {
                    log::debug!(target: "interaction", "interval {} handles crossed", self.id);
                    self.gesture = Gesture::Resizing(held);
                }
            }
            _ => {}
        }
    }
}

/// Clamp a snapped pointer time for the active gesture.
///
/// Dragging keeps the grabbed point at its original distance from both
/// bounds. Resizing keeps the moving edge inside the timeline and, when the
/// interval has a length floor, on its side of that floor; without a floor a
/// handle may cross the opposite one. The flag reports that the floor was hit.
fn clamp_time(
    gesture: Gesture,
    time: f64,
    interval: &Interval,
    session: &Session,
    duration: f64,
) -> (f64, bool) {
    let mut time = time;
    let mut at_floor = false;
    match gesture {
        Gesture::Idle => {}
        Gesture::Dragging => {
            if bounded(duration) && time > duration - session.right_half {
                time = duration - session.right_half;
            }
            if time - session.left_half < 0.0 {
                time = session.left_half;
            }
        }
        Gesture::Resizing(Side::Start) => {
            if let Some(min) = interval.min_length() {
                if time > interval.end() - min {
                    time = interval.end() - min;
                    at_floor = true;
                }
            }
            if time < 0.0 {
                time = 0.0;
            }
        }
        Gesture::Resizing(Side::End) => {
            if let Some(min) = interval.min_length() {
                if time < interval.start() + min {
                    time = interval.start() + min;
                    at_floor = true;
                }
            }
            if bounded(duration) && time > duration {
                time = duration;
            }
        }
    }
    (time, at_floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::EventBus;
    use crate::headless::{ManualTransport, StaticSurface};
    use segue_types::{Direction, HostEvent, HostEventKind, InteractionAction, IntervalParams};
    use std::cell::RefCell;
    use std::rc::Rc;

    const DURATION: f64 = 10.0;

    struct Rig {
        store: IntervalStore,
        transport: ManualTransport,
        surface: StaticSurface,
        events: Rc<RefCell<Vec<HostEvent>>>,
    }

    impl Rig {
        /// 100 px per second, so x = 100 * t.
        fn new() -> Self {
            let bus = EventBus::new();
            let events = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&events);
            bus.on(move |e| sink.borrow_mut().push(e.clone()));
            Self {
                store: IntervalStore::new(bus),
                transport: ManualTransport::new(DURATION),
                surface: StaticSurface::fit(DURATION, 100.0),
                events,
            }
        }

        fn add(&mut self, params: IntervalParams) {
            self.store.add(params, DURATION, 0.0).unwrap();
        }

        fn send(&mut self, c: &mut PointerInteractionController, event: PointerEvent) -> Response {
            let mut ctx =
                InteractionContext::new(&mut self.store, &self.transport, &mut self.surface, 4.0);
            c.handle(&event, &mut ctx)
        }

        fn frame(&mut self, c: &mut PointerInteractionController) {
            let mut ctx =
                InteractionContext::new(&mut self.store, &self.transport, &mut self.surface, 4.0);
            c.on_frame(&mut ctx);
        }

        fn span(&self, id: &str) -> (f64, f64) {
            let iv = self.store.get(&IntervalId::new(id)).unwrap();
            (iv.start(), iv.end())
        }

        fn count(&self, kind: HostEventKind) -> usize {
            self.events.borrow().iter().filter(|e| e.kind() == kind).count()
        }
    }

    fn down(x: f64, part: IntervalPart) -> PointerEvent {
        PointerEvent::mouse(PointerPhase::Down, x, 0.0).on("a", part)
    }

    fn mv(x: f64) -> PointerEvent {
        PointerEvent::mouse(PointerPhase::Move, x, 0.0)
    }

    fn up(x: f64) -> PointerEvent {
        PointerEvent::mouse(PointerPhase::Up, x, 0.0)
    }

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn make(params: IntervalParams) -> Interval {
        Interval::new(IntervalId::new("t"), params, DURATION, 0.0, EventBus::new())
    }

    #[test]
    fn drag_by_clamps_to_duration() {
        let mut iv = make(IntervalParams::span(2.0, 8.0));
        drag_by(&mut iv, 5.0, DURATION);
        assert_close((iv.start(), iv.end()), (4.0, 10.0));
    }

    #[test]
    fn drag_by_clamps_to_zero() {
        let mut iv = make(IntervalParams::span(2.0, 8.0));
        drag_by(&mut iv, -5.0, DURATION);
        assert_close((iv.start(), iv.end()), (0.0, 6.0));
    }

    #[test]
    fn drag_direction_follows_delta_sign() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        bus.on(move |e| {
            if let HostEvent::Updated { params, .. } = e {
                s.borrow_mut().push(*params);
            }
        });
        let mut iv = Interval::new(
            IntervalId::new("t"),
            IntervalParams::span(2.0, 4.0),
            DURATION,
            0.0,
            bus,
        );
        drag_by(&mut iv, 1.0, DURATION);
        drag_by(&mut iv, -1.0, DURATION);
        drag_by(&mut iv, 0.0, DURATION);
        let seen = seen.borrow();
        assert_eq!(seen[0].unwrap().direction, Some(Direction::Right));
        assert_eq!(seen[1].unwrap().direction, Some(Direction::Left));
        assert_eq!(seen[2].unwrap().direction, None);
        assert_eq!(seen[2].unwrap().action, InteractionAction::Drag);
    }

    #[test]
    fn resize_start_respects_min_length() {
        let mut iv = make(IntervalParams {
            min_length: Some(3.0),
            ..IntervalParams::span(2.0, 8.0)
        });
        let side = resize_by(&mut iv, 5.0, Side::Start, DURATION);
        assert_eq!(side, Side::Start);
        assert_close((iv.start(), iv.end()), (5.0, 8.0));
    }

    #[test]
    fn resize_end_respects_max_length() {
        let mut iv = make(IntervalParams {
            max_length: Some(3.0),
            ..IntervalParams::span(2.0, 4.0)
        });
        resize_by(&mut iv, 5.0, Side::End, DURATION);
        assert_close((iv.start(), iv.end()), (2.0, 5.0));
    }

    #[test]
    fn resize_start_stops_at_zero() {
        let mut iv = make(IntervalParams::span(2.0, 8.0));
        resize_by(&mut iv, -5.0, Side::Start, DURATION);
        assert_close((iv.start(), iv.end()), (0.0, 8.0));
    }

    #[test]
    fn resize_end_stops_at_duration() {
        let mut iv = make(IntervalParams::span(2.0, 8.0));
        resize_by(&mut iv, 5.0, Side::End, DURATION);
        assert_close((iv.start(), iv.end()), (2.0, 10.0));
    }

    #[test]
    fn resize_past_opposite_handle_flips() {
        let mut iv = make(IntervalParams::span(2.0, 8.0));
        let side = resize_by(&mut iv, 8.0, Side::Start, 20.0);
        assert_eq!(side, Side::End);
        assert_close((iv.start(), iv.end()), (8.0, 10.0));
    }

    #[test]
    fn drag_session_keeps_grab_point_and_clamps() {
        let mut rig = Rig::new();
        rig.add(IntervalParams::editable(2.0, 8.0).with_id("a"));
        let mut c = PointerInteractionController::new(IntervalId::new("a"));

        let r = rig.send(&mut c, down(300.0, IntervalPart::Body));
        assert!(r.consumed);
        assert_eq!(c.gesture(), Gesture::Dragging);
        assert!(rig.store.get(&IntervalId::new("a")).unwrap().is_dragging());

        // Pointer at 8s would put end at 13s; the grab point stops at 5s.
        rig.send(&mut c, mv(800.0));
        assert_close(rig.span("a"), (4.0, 10.0));

        let r = rig.send(&mut c, up(800.0));
        assert!(r.suppress_click);
        assert_eq!(c.gesture(), Gesture::Idle);
        assert_eq!(rig.count(HostEventKind::UpdateEnd), 1);
        assert!(!rig.store.get(&IntervalId::new("a")).unwrap().is_dragging());
    }

    #[test]
    fn resize_session_truncates_to_min_length() {
        let mut rig = Rig::new();
        rig.add(IntervalParams {
            min_length: Some(3.0),
            ..IntervalParams::editable(2.0, 8.0).with_id("a")
        });
        let mut c = PointerInteractionController::new(IntervalId::new("a"));
        rig.send(&mut c, down(200.0, IntervalPart::Handle(Side::Start)));
        rig.send(&mut c, mv(700.0));
        assert_close(rig.span("a"), (5.0, 8.0));
    }

    #[test]
    fn click_without_movement_commits_nothing() {
        let mut rig = Rig::new();
        rig.add(IntervalParams::editable(2.0, 8.0).with_id("a"));
        let mut c = PointerInteractionController::new(IntervalId::new("a"));
        rig.send(&mut c, down(300.0, IntervalPart::Body));
        let r = rig.send(&mut c, up(300.0));
        assert!(!r.suppress_click);
        assert_eq!(rig.count(HostEventKind::UpdateEnd), 0);
    }

    #[test]
    fn locked_interval_is_not_consumed() {
        let mut rig = Rig::new();
        rig.add(IntervalParams::span(2.0, 8.0).with_id("a"));
        let mut c = PointerInteractionController::new(IntervalId::new("a"));
        let r = rig.send(&mut c, down(300.0, IntervalPart::Body));
        assert!(!r.consumed);
        assert_eq!(c.gesture(), Gesture::Idle);
    }

    #[test]
    fn down_on_other_interval_is_ignored() {
        let mut rig = Rig::new();
        rig.add(IntervalParams::editable(2.0, 8.0).with_id("a"));
        let mut c = PointerInteractionController::new(IntervalId::new("a"));
        let ev = PointerEvent::mouse(PointerPhase::Down, 300.0, 0.0).on("b", IntervalPart::Body);
        assert!(!rig.send(&mut c, ev).consumed);
    }

    #[test]
    fn foreign_touch_and_multi_touch_are_ignored() {
        let mut rig = Rig::new();
        rig.add(IntervalParams::editable(2.0, 8.0).with_id("a"));
        let mut c = PointerInteractionController::new(IntervalId::new("a"));
        let start = PointerEvent::touch(PointerPhase::Down, 300.0, 0.0, 1).on("a", IntervalPart::Body);
        rig.send(&mut c, start);
        rig.send(&mut c, PointerEvent::touch(PointerPhase::Move, 500.0, 0.0, 2));
        rig.send(
            &mut c,
            PointerEvent::touch(PointerPhase::Move, 500.0, 0.0, 1).with_contacts(2),
        );
        assert_close(rig.span("a"), (2.0, 8.0));
        rig.send(&mut c, PointerEvent::touch(PointerPhase::Move, 400.0, 0.0, 1));
        assert_close(rig.span("a"), (3.0, 9.0));
    }

    #[test]
    fn removal_mid_gesture_ends_session() {
        let mut rig = Rig::new();
        rig.add(IntervalParams::editable(2.0, 8.0).with_id("a"));
        let mut c = PointerInteractionController::new(IntervalId::new("a"));
        rig.send(&mut c, down(300.0, IntervalPart::Body));
        rig.store.remove(&IntervalId::new("a"));
        rig.send(&mut c, mv(400.0));
        assert!(!c.is_active());
        rig.send(&mut c, up(400.0));
        assert_eq!(rig.count(HostEventKind::UpdateEnd), 0);
    }

    #[test]
    fn drag_near_edge_autoscrolls_until_released() {
        let mut rig = Rig::new();
        // 100 s of content at 10 px/s, 200 px viewport.
        rig.transport = ManualTransport::new(100.0);
        rig.surface = StaticSurface::scrolling(100.0, 10.0, 200.0);
        rig.store
            .add(
                IntervalParams {
                    edge_scroll_width: Some(20.0),
                    ..IntervalParams::editable(5.0, 10.0).with_id("a")
                },
                100.0,
                0.0,
            )
            .unwrap();
        let mut c = PointerInteractionController::new(IntervalId::new("a"));
        rig.send(&mut c, down(50.0, IntervalPart::Body));
        rig.send(&mut c, mv(190.0));
        assert!(c.wants_frame());
        let scrolled = rig.surface.scroll;
        assert!(scrolled > 0.0);

        for _ in 0..10 {
            rig.frame(&mut c);
        }
        assert!(rig.surface.scroll > scrolled);
        let (start, end) = rig.span("a");
        assert!((end - start - 5.0).abs() < 1e-9);

        rig.send(&mut c, up(190.0));
        assert!(!c.wants_frame());
        let parked = rig.surface.scroll;
        rig.frame(&mut c);
        assert_eq!(rig.surface.scroll, parked);
        assert_eq!(rig.count(HostEventKind::UpdateEnd), 1);
    }

    #[test]
    fn leaving_the_band_stops_autoscroll() {
        let mut rig = Rig::new();
        rig.transport = ManualTransport::new(100.0);
        rig.surface = StaticSurface::scrolling(100.0, 10.0, 200.0);
        rig.store
            .add(
                IntervalParams {
                    edge_scroll_width: Some(20.0),
                    ..IntervalParams::editable(5.0, 10.0).with_id("a")
                },
                100.0,
                0.0,
            )
            .unwrap();
        let mut c = PointerInteractionController::new(IntervalId::new("a"));
        rig.send(&mut c, down(50.0, IntervalPart::Body));
        rig.send(&mut c, mv(190.0));
        assert!(c.wants_frame());
        rig.send(&mut c, mv(100.0));
        assert!(!c.wants_frame());
    }

    #[test]
    fn marker_span_scales_with_width() {
        assert!((marker_span(4.0, 1000.0, 10.0) - 0.04).abs() < 1e-12);
        assert_eq!(marker_span(4.0, 0.0, 10.0), 0.0);
    }
}

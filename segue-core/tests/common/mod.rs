#![allow(dead_code)]
//! Test harness utilities for segue-core integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use segue_core::headless::{ManualTransport, StaticSurface};
use segue_core::timeline::{Timeline, TimelineOptions};
use segue_types::{
    HostEvent, HostEventKind, IntervalId, IntervalPart, PointerEvent, PointerPhase,
};

pub type TestTimeline = Timeline<ManualTransport, StaticSurface>;

/// 10 s of media at 100 px/s with no scrolling, so `x = 100 * t`.
pub fn fit_timeline(options: TimelineOptions) -> TestTimeline {
    Timeline::new(
        ManualTransport::new(10.0),
        StaticSurface::fit(10.0, 100.0),
        options,
    )
}

/// 100 s of media at 10 px/s behind a 200 px viewport (800 px of scroll).
pub fn scrolling_timeline(options: TimelineOptions) -> TestTimeline {
    Timeline::new(
        ManualTransport::new(100.0),
        StaticSurface::scrolling(100.0, 10.0, 200.0),
        options,
    )
}

/// Collects every host event emitted by a timeline.
pub struct Recorder {
    events: Rc<RefCell<Vec<HostEvent>>>,
}

impl Recorder {
    pub fn attach(timeline: &TestTimeline) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        timeline.on(move |e| sink.borrow_mut().push(e.clone()));
        Self { events }
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<HostEventKind> {
        self.events.borrow().iter().map(|e| e.kind()).collect()
    }

    pub fn count(&self, kind: HostEventKind) -> usize {
        self.events.borrow().iter().filter(|e| e.kind() == kind).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

pub fn down(x: f64) -> PointerEvent {
    PointerEvent::mouse(PointerPhase::Down, x, 0.0)
}

pub fn down_on(x: f64, id: &str, part: IntervalPart) -> PointerEvent {
    down(x).on(id, part)
}

pub fn mv(x: f64) -> PointerEvent {
    PointerEvent::mouse(PointerPhase::Move, x, 0.0)
}

pub fn up(x: f64) -> PointerEvent {
    PointerEvent::mouse(PointerPhase::Up, x, 0.0)
}

pub fn leave(x: f64) -> PointerEvent {
    PointerEvent::mouse(PointerPhase::Leave, x, 0.0)
}

/// Run animation frames until the timeline stops asking, at most `max`.
/// Returns the number of frames run.
pub fn run_frames(timeline: &mut TestTimeline, max: usize) -> usize {
    let mut frames = 0;
    while timeline.wants_frame() && frames < max {
        timeline.on_frame();
        frames += 1;
    }
    frames
}

pub fn span_of(timeline: &TestTimeline, id: &str) -> (f64, f64) {
    let interval = timeline
        .get(&IntervalId::new(id))
        .unwrap_or_else(|| panic!("no interval {}", id));
    (interval.start(), interval.end())
}

pub fn assert_span(timeline: &TestTimeline, id: &str, start: f64, end: f64) {
    let (s, e) = span_of(timeline, id);
    assert!(
        (s - start).abs() < 1e-9 && (e - end).abs() < 1e-9,
        "{}: expected [{}, {}], got [{}, {}]",
        id,
        start,
        end,
        s,
        e
    );
}

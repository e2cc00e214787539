mod common;

use common::*;
use segue_core::timeline::TimelineOptions;
use segue_types::{
    Direction, HostEvent, HostEventKind, IntervalId, IntervalParams, IntervalPart,
    InteractionAction, PointerEvent, PointerPhase, Side, SnapGrid,
};

fn editable(id: &str, start: f64, end: f64) -> IntervalParams {
    IntervalParams::editable(start, end).with_id(id)
}

#[test]
fn test_drag_stops_at_timeline_end() {
    let mut tl = fit_timeline(TimelineOptions::default());
    tl.add(editable("a", 2.0, 8.0));

    tl.handle_pointer(&down_on(500.0, "a", IntervalPart::Body));
    tl.handle_pointer(&mv(1000.0));
    tl.handle_pointer(&up(1000.0));

    // The grabbed point keeps its distance to both bounds, so length survives.
    assert_span(&tl, "a", 4.0, 10.0);
}

#[test]
fn test_drag_stops_at_timeline_start() {
    let mut tl = fit_timeline(TimelineOptions::default());
    tl.add(editable("a", 2.0, 8.0));

    tl.handle_pointer(&down_on(300.0, "a", IntervalPart::Body));
    tl.handle_pointer(&mv(0.0));
    tl.handle_pointer(&up(0.0));

    assert_span(&tl, "a", 0.0, 6.0);
}

#[test]
fn test_resize_start_stops_at_min_length() {
    let mut tl = fit_timeline(TimelineOptions::default());
    let mut params = editable("a", 2.0, 8.0);
    params.min_length = Some(3.0);
    tl.add(params);

    tl.handle_pointer(&down_on(200.0, "a", IntervalPart::Handle(Side::Start)));
    tl.handle_pointer(&mv(700.0));
    tl.handle_pointer(&up(700.0));

    assert_span(&tl, "a", 5.0, 8.0);
}

#[test]
fn test_resize_end_stops_at_duration() {
    let mut tl = fit_timeline(TimelineOptions::default());
    tl.add(editable("a", 2.0, 8.0));

    tl.handle_pointer(&down_on(800.0, "a", IntervalPart::Handle(Side::End)));
    tl.handle_pointer(&mv(1000.0));
    tl.handle_pointer(&up(1000.0));

    assert_span(&tl, "a", 2.0, 10.0);
}

#[test]
fn test_resize_handle_crosses_opposite_handle() {
    let mut tl = fit_timeline(TimelineOptions::default());
    tl.add(editable("a", 2.0, 8.0));
    let rec = Recorder::attach(&tl);

    tl.handle_pointer(&down_on(200.0, "a", IntervalPart::Handle(Side::Start)));
    tl.handle_pointer(&mv(900.0));
    assert_span(&tl, "a", 8.0, 9.0);

    // The start handle became the end handle when it crossed.
    tl.handle_pointer(&mv(950.0));
    assert_span(&tl, "a", 8.0, 9.5);

    tl.handle_pointer(&mv(100.0));
    assert_span(&tl, "a", 1.0, 8.0);

    tl.handle_pointer(&up(100.0));
    assert_eq!(rec.count(HostEventKind::UpdateEnd), 1);
}

#[test]
fn test_many_moves_emit_one_update_end() {
    let mut tl = fit_timeline(TimelineOptions::default());
    tl.add(editable("a", 2.0, 4.0));
    let rec = Recorder::attach(&tl);

    tl.handle_pointer(&down_on(300.0, "a", IntervalPart::Body));
    for step in 1..=20 {
        tl.handle_pointer(&mv(300.0 + 10.0 * step as f64));
    }
    tl.handle_pointer(&up(500.0));

    assert_eq!(rec.count(HostEventKind::UpdateEnd), 1);
    assert!(rec.count(HostEventKind::Updated) >= 20);
    assert_span(&tl, "a", 4.0, 6.0);

    // update-end carries the pointer-up that finished the gesture.
    let end = rec
        .events()
        .into_iter()
        .find(|e| e.kind() == HostEventKind::UpdateEnd);
    match end {
        Some(HostEvent::UpdateEnd { id, input }) => {
            assert_eq!(id, IntervalId::new("a"));
            assert_eq!(input.map(|e| e.phase), Some(PointerPhase::Up));
        }
        other => panic!("expected update-end, got {:?}", other),
    }
}

#[test]
fn test_drag_updates_report_direction() {
    let mut tl = fit_timeline(TimelineOptions::default());
    tl.add(editable("a", 2.0, 4.0));
    let rec = Recorder::attach(&tl);

    tl.handle_pointer(&down_on(300.0, "a", IntervalPart::Body));
    tl.handle_pointer(&mv(250.0));
    tl.handle_pointer(&up(250.0));

    let params = rec.events().into_iter().find_map(|e| match e {
        HostEvent::Updated { params, .. } => params,
        _ => None,
    });
    let params = params.unwrap();
    assert_eq!(params.action, InteractionAction::Drag);
    assert_eq!(params.direction, Some(Direction::Left));
}

#[test]
fn test_finished_drag_swallows_one_click() {
    let mut tl = fit_timeline(TimelineOptions::default());
    tl.add(editable("a", 2.0, 4.0));

    tl.handle_pointer(&down_on(300.0, "a", IntervalPart::Body));
    tl.handle_pointer(&mv(400.0));
    tl.handle_pointer(&up(400.0));

    assert!(!tl.accept_click());
    assert!(tl.accept_click());
}

#[test]
fn test_click_without_movement_is_not_swallowed() {
    let mut tl = fit_timeline(TimelineOptions::default());
    tl.add(editable("a", 2.0, 4.0));
    let rec = Recorder::attach(&tl);

    tl.handle_pointer(&down_on(300.0, "a", IntervalPart::Body));
    tl.handle_pointer(&up(300.0));

    assert!(tl.accept_click());
    assert_eq!(rec.count(HostEventKind::UpdateEnd), 0);
}

#[test]
fn test_locked_interval_ignores_gestures() {
    let mut tl = fit_timeline(TimelineOptions::default());
    tl.add(IntervalParams::span(2.0, 4.0).with_id("a"));

    let response = tl.handle_pointer(&down_on(300.0, "a", IntervalPart::Body));
    assert!(!response.consumed);
    tl.handle_pointer(&mv(600.0));
    tl.handle_pointer(&up(600.0));

    assert_span(&tl, "a", 2.0, 4.0);
}

#[test]
fn test_drag_follows_snap_grid() {
    let mut tl = fit_timeline(TimelineOptions::default());
    let mut params = editable("a", 2.0, 4.0);
    params.snap = Some(SnapGrid::new(0.5, 0.0));
    tl.add(params);

    tl.handle_pointer(&down_on(200.0, "a", IntervalPart::Body));
    tl.handle_pointer(&mv(330.0));
    tl.handle_pointer(&up(330.0));

    assert_span(&tl, "a", 3.5, 5.5);
}

#[test]
fn test_foreign_touch_does_not_move_interval() {
    let mut tl = fit_timeline(TimelineOptions::default());
    tl.add(editable("a", 2.0, 4.0));

    tl.handle_pointer(
        &PointerEvent::touch(PointerPhase::Down, 300.0, 0.0, 1).on("a", IntervalPart::Body),
    );
    tl.handle_pointer(&PointerEvent::touch(PointerPhase::Move, 600.0, 0.0, 2));
    assert_span(&tl, "a", 2.0, 4.0);

    tl.handle_pointer(&PointerEvent::touch(PointerPhase::Move, 400.0, 0.0, 1));
    assert_span(&tl, "a", 3.0, 5.0);
}

#[test]
fn test_multi_touch_is_ignored() {
    let mut tl = fit_timeline(TimelineOptions::default());
    tl.add(editable("a", 2.0, 4.0));

    let response = tl.handle_pointer(&down_on(300.0, "a", IntervalPart::Body).with_contacts(2));
    assert!(!response.consumed);
    tl.handle_pointer(&mv(600.0));
    assert_span(&tl, "a", 2.0, 4.0);
}

#[test]
fn test_drag_autoscrolls_near_viewport_edge() {
    // Default edge band: 5% of the 200 px viewport.
    let mut tl = scrolling_timeline(TimelineOptions::default());
    tl.add(editable("a", 5.0, 10.0));
    let rec = Recorder::attach(&tl);

    tl.handle_pointer(&down_on(75.0, "a", IntervalPart::Body));
    tl.handle_pointer(&mv(195.0));
    assert!(tl.wants_frame());
    assert!(tl.surface().scroll > 0.0);

    let frames = run_frames(&mut tl, 10_000);
    assert!(frames > 0 && frames < 10_000);
    assert!(!tl.wants_frame());

    let (start, end) = span_of(&tl, "a");
    assert!(tl.surface().scroll > 700.0);
    assert!(tl.surface().scroll <= 800.0);
    assert!((end - start - 5.0).abs() < 1e-6);
    assert!(end <= 100.0);

    tl.handle_pointer(&up(195.0));
    assert_eq!(rec.count(HostEventKind::UpdateEnd), 1);
}

#[test]
fn test_leaving_edge_band_stops_autoscroll() {
    let mut tl = scrolling_timeline(TimelineOptions::default());
    tl.add(editable("a", 5.0, 10.0));

    tl.handle_pointer(&down_on(75.0, "a", IntervalPart::Body));
    tl.handle_pointer(&mv(195.0));
    assert!(tl.wants_frame());
    tl.handle_pointer(&mv(100.0));
    assert!(!tl.wants_frame());
}

#[test]
fn test_removal_mid_gesture_stops_frames() {
    let mut tl = scrolling_timeline(TimelineOptions::default());
    tl.add(editable("a", 5.0, 10.0));

    tl.handle_pointer(&down_on(75.0, "a", IntervalPart::Body));
    tl.handle_pointer(&mv(195.0));
    assert!(tl.wants_frame());

    assert!(tl.remove(&IntervalId::new("a")));
    assert!(!tl.wants_frame());
    assert!(!tl.on_frame());
    tl.handle_pointer(&mv(150.0));
    tl.handle_pointer(&up(150.0));
    assert!(tl.get(&IntervalId::new("a")).is_none());
}

#[test]
fn test_scroll_disabled_interval_does_not_autoscroll() {
    let mut tl = scrolling_timeline(TimelineOptions::default());
    let mut params = editable("a", 5.0, 10.0);
    params.scroll = Some(false);
    tl.add(params);

    tl.handle_pointer(&down_on(75.0, "a", IntervalPart::Body));
    tl.handle_pointer(&mv(195.0));
    assert!(!tl.wants_frame());
    assert_eq!(tl.surface().scroll, 0.0);
}

#[test]
fn test_drag_autoscroll_stops_with_grab_point_at_edge() {
    let mut tl = scrolling_timeline(TimelineOptions::default());
    tl.add(editable("a", 5.0, 10.0));

    // Grabbed 2.5 s (25 px) from each bound, released 5 px from the edge.
    tl.handle_pointer(&down_on(75.0, "a", IntervalPart::Body));
    tl.handle_pointer(&mv(195.0));
    run_frames(&mut tl, 10_000);
    assert!(!tl.wants_frame());

    let (grab_px, edge_dist, max_scroll) = (25.0, 5.0, 800.0);
    let expected = max_scroll - grab_px + edge_dist;
    assert!((tl.surface().scroll - expected).abs() < 1e-9, "scroll {}", tl.surface().scroll);

    tl.handle_pointer(&mv(195.0));
    assert_span(&tl, "a", 95.0, 100.0);
}

#[test]
fn test_drag_autoscroll_backward_stops_with_grab_point_at_edge() {
    let mut tl = scrolling_timeline(TimelineOptions::default());
    tl.surface_mut().scroll = 400.0;
    tl.add(editable("a", 45.0, 50.0));

    tl.handle_pointer(&down_on(75.0, "a", IntervalPart::Body));
    tl.handle_pointer(&mv(5.0));
    assert!(tl.wants_frame());
    run_frames(&mut tl, 10_000);
    assert!(!tl.wants_frame());

    let (grab_px, edge_dist) = (25.0, 5.0);
    let expected = grab_px - edge_dist;
    assert!((tl.surface().scroll - expected).abs() < 1e-9, "scroll {}", tl.surface().scroll);

    tl.handle_pointer(&mv(5.0));
    assert_span(&tl, "a", 0.0, 5.0);
}

#[test]
fn test_resize_autoscroll_runs_to_the_end() {
    let mut tl = scrolling_timeline(TimelineOptions::default());
    tl.add(editable("a", 5.0, 10.0));
    let rec = Recorder::attach(&tl);

    tl.handle_pointer(&down_on(100.0, "a", IntervalPart::Handle(Side::End)));
    tl.handle_pointer(&mv(195.0));
    assert!(tl.wants_frame());

    let frames = run_frames(&mut tl, 10_000);
    assert!(frames > 0 && frames < 10_000);
    assert!(!tl.wants_frame());
    assert_eq!(tl.surface().scroll, 800.0);

    let (start, end) = span_of(&tl, "a");
    assert!((start - 5.0).abs() < 1e-9);
    assert!((end - 99.4).abs() < 1e-6, "end {}", end);

    tl.handle_pointer(&mv(195.0));
    assert_span(&tl, "a", 5.0, 99.5);
    tl.handle_pointer(&up(195.0));
    assert_eq!(rec.count(HostEventKind::UpdateEnd), 1);
}

#[test]
fn test_resize_pinned_at_min_length_does_not_autoscroll() {
    let mut tl = scrolling_timeline(TimelineOptions::default());
    let mut params = editable("a", 5.0, 10.0);
    params.min_length = Some(3.0);
    tl.add(params);

    tl.handle_pointer(&down_on(50.0, "a", IntervalPart::Handle(Side::Start)));
    tl.handle_pointer(&mv(195.0));

    assert_span(&tl, "a", 7.0, 10.0);
    assert!(!tl.wants_frame());
    assert_eq!(tl.surface().scroll, 0.0);
}

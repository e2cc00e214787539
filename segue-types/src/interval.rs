//! Interval parameters, partial patches and interaction descriptors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::snap::SnapGrid;
use crate::IntervalId;

/// A `[start, end]` pair in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Build a span from two unordered points.
    pub fn ordered(a: f64, b: f64) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Inclusive on both ends.
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Which handle of an interval is being resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Start,
    End,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Start => Side::End,
            Side::End => Side::Start,
        }
    }

    /// Resizing the start handle reads as leftward feedback, the end as rightward.
    pub fn direction(self) -> Direction {
        match self {
            Side::Start => Direction::Left,
            Side::End => Direction::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Negative deltas move left, positive move right, zero has no direction.
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta < 0.0 {
            Some(Direction::Left)
        } else if delta > 0.0 {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionAction {
    Drag,
    Resize,
}

/// Describes the gesture that produced an update, for directional feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParams {
    pub action: InteractionAction,
    pub direction: Option<Direction>,
}

impl EventParams {
    pub fn drag(delta: f64) -> Self {
        Self {
            action: InteractionAction::Drag,
            direction: Direction::from_delta(delta),
        }
    }

    pub fn resize(side: Side) -> Self {
        Self {
            action: InteractionAction::Resize,
            direction: Some(side.direction()),
        }
    }
}

/// Parameters for creating an interval.
///
/// Every field is optional on the wire; the store fills in its own defaults
/// for snapping, minimum length and edge-scroll width when they are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalParams {
    pub id: Option<IntervalId>,
    #[serde(deserialize_with = "lenient::seconds")]
    pub start: f64,
    /// `None` produces a marker-sized interval at `start`.
    #[serde(deserialize_with = "lenient::opt_seconds")]
    pub end: Option<f64>,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub drag: bool,
    pub resize: bool,
    pub color: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub data: serde_json::Value,
    #[serde(deserialize_with = "lenient::opt_seconds")]
    pub min_length: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_seconds")]
    pub max_length: Option<f64>,
    pub snap: Option<SnapGrid>,
    /// Disable edge autoscroll for this interval's gestures when `Some(false)`.
    pub scroll: Option<bool>,
    pub scroll_speed: Option<f64>,
    pub edge_scroll_width: Option<f64>,
    /// Lyric text shown on the interval's first and second row.
    pub line1: Option<String>,
    pub line2: Option<String>,
    /// Show the start/end tooltip on hover. Defaults to true.
    pub show_tooltip: Option<bool>,
    /// Ask the host to suppress its native context menu on this interval.
    pub prevent_context_menu: bool,
}

impl IntervalParams {
    pub fn span(start: f64, end: f64) -> Self {
        Self {
            start,
            end: Some(end),
            ..Self::default()
        }
    }

    /// Interactive interval: both drag and resize enabled.
    pub fn editable(start: f64, end: f64) -> Self {
        Self {
            drag: true,
            resize: true,
            ..Self::span(start, end)
        }
    }

    pub fn with_id(mut self, id: impl Into<IntervalId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A partial update: only the supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalPatch {
    #[serde(deserialize_with = "lenient::opt_seconds")]
    pub start: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_seconds")]
    pub end: Option<f64>,
    #[serde(rename = "loop")]
    pub looping: Option<bool>,
    pub drag: Option<bool>,
    pub resize: Option<bool>,
    pub color: Option<String>,
    pub attributes: Option<BTreeMap<String, String>>,
    pub data: Option<serde_json::Value>,
    #[serde(deserialize_with = "lenient::opt_seconds")]
    pub min_length: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_seconds")]
    pub max_length: Option<f64>,
    pub line1: Option<String>,
    pub line2: Option<String>,
}

impl IntervalPatch {
    pub fn span(start: f64, end: f64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn lyric(line1: impl Into<String>, line2: impl Into<String>) -> Self {
        Self {
            line1: Some(line1.into()),
            line2: Some(line2.into()),
            ..Self::default()
        }
    }

    /// True when the patch touches `start` or `end`.
    pub fn moves_bounds(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_delta_sign() {
        assert_eq!(Direction::from_delta(-0.5), Some(Direction::Left));
        assert_eq!(Direction::from_delta(0.5), Some(Direction::Right));
        assert_eq!(Direction::from_delta(0.0), None);
    }

    #[test]
    fn span_ordered_swaps() {
        let s = Span::ordered(8.0, 2.0);
        assert_eq!(s, Span::new(2.0, 8.0));
        assert_eq!(s.length(), 6.0);
        assert!(s.contains(2.0) && s.contains(8.0) && !s.contains(8.01));
    }

    #[test]
    fn params_accept_loose_numbers() {
        let p: IntervalParams =
            serde_json::from_str(r#"{"start":"2.5","end":"abc","loop":true}"#).unwrap();
        assert_eq!(p.start, 2.5);
        assert_eq!(p.end, Some(0.0));
        assert!(p.looping);
    }

    #[test]
    fn params_null_end_means_marker() {
        let p: IntervalParams = serde_json::from_str(r#"{"start":1,"end":null}"#).unwrap();
        assert_eq!(p.start, 1.0);
        assert_eq!(p.end, None);
    }

    #[test]
    fn params_garbage_start_is_zero() {
        let p: IntervalParams = serde_json::from_str(r#"{"start":{"x":1},"end":[1,2]}"#).unwrap();
        assert_eq!(p.start, 0.0);
        assert_eq!(p.end, Some(0.0));
    }

    #[test]
    fn patch_only_sets_supplied_fields() {
        let p: IntervalPatch = serde_json::from_str(r#"{"color":"red"}"#).unwrap();
        assert_eq!(p.color.as_deref(), Some("red"));
        assert!(!p.moves_bounds());
        assert!(p.looping.is_none());
    }

    #[test]
    fn lyric_and_tooltip_fields_deserialize() {
        let p: IntervalParams = serde_json::from_str(
            r#"{"start":1,"line1":"hello","show_tooltip":false,"prevent_context_menu":true}"#,
        )
        .unwrap();
        assert_eq!(p.line1.as_deref(), Some("hello"));
        assert_eq!(p.line2, None);
        assert_eq!(p.show_tooltip, Some(false));
        assert!(p.prevent_context_menu);
    }

    #[test]
    fn resize_params_follow_side() {
        assert_eq!(EventParams::resize(Side::Start).direction, Some(Direction::Left));
        assert_eq!(EventParams::resize(Side::End).direction, Some(Direction::Right));
        assert_eq!(EventParams::drag(0.0).direction, None);
    }
}

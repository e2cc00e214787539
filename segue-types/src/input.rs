use serde::{Deserialize, Serialize};

use crate::interval::Side;
use crate::IntervalId;

/// Phase of a pointer (mouse or touch) event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Pointer left the timeline surface.
    Leave,
    /// Discrete events aimed at the interval named by the target.
    Click,
    #[serde(rename = "dblclick")]
    DoubleClick,
    ContextMenu,
    /// Pointer moved onto an interval.
    Enter,
    /// Pointer moved off an interval.
    Exit,
}

impl PointerPhase {
    /// Phases that belong to a drag gesture rather than to a single interval.
    pub fn is_gesture(self) -> bool {
        matches!(
            self,
            PointerPhase::Down | PointerPhase::Move | PointerPhase::Up | PointerPhase::Leave
        )
    }
}

/// Which part of an interval was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalPart {
    Body,
    Handle(Side),
}

/// What the pointer was over when the event fired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerTarget {
    /// Empty timeline, or anywhere outside an interval.
    #[default]
    Background,
    Interval { id: IntervalId, part: IntervalPart },
}

/// Layout axis of the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Pointer event in client coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
    /// Simultaneous touch contacts; 0 for a mouse.
    #[serde(default)]
    pub contacts: u8,
    /// Identity of the first changed touch, if any.
    #[serde(default)]
    pub touch_id: Option<u32>,
    #[serde(default)]
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            x,
            y,
            contacts: 0,
            touch_id: None,
            target: PointerTarget::Background,
        }
    }

    pub fn touch(phase: PointerPhase, x: f64, y: f64, touch_id: u32) -> Self {
        Self {
            phase,
            x,
            y,
            contacts: 1,
            touch_id: Some(touch_id),
            target: PointerTarget::Background,
        }
    }

    pub fn on(mut self, id: impl Into<IntervalId>, part: IntervalPart) -> Self {
        self.target = PointerTarget::Interval {
            id: id.into(),
            part,
        };
        self
    }

    pub fn with_contacts(mut self, contacts: u8) -> Self {
        self.contacts = contacts;
        self
    }

    /// More than one finger on the surface.
    pub fn is_multi_touch(&self) -> bool {
        self.contacts > 1
    }

    /// Coordinate along the timeline axis.
    pub fn along(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// True when this event comes from a different touch than `touch_id`.
    /// Mouse events never mismatch.
    pub fn foreign_touch(&self, touch_id: Option<u32>) -> bool {
        matches!((self.touch_id, touch_id), (Some(a), Some(b)) if a != b)
    }
}

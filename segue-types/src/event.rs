//! Notifications produced by the interval core.
//!
//! [`HostEvent`] goes to the application-wide bus; [`IntervalSignal`] is the
//! per-interval channel (rendering collaborators and the owning store listen
//! there).

use serde::{Deserialize, Serialize};

use crate::input::PointerEvent;
use crate::interval::{EventParams, Span};
use crate::IntervalId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum HostEvent {
    #[serde(rename = "interval-created")]
    Created { id: IntervalId, span: Span },
    #[serde(rename = "interval-updated")]
    Updated {
        id: IntervalId,
        span: Span,
        params: Option<EventParams>,
    },
    #[serde(rename = "interval-removed")]
    Removed { id: IntervalId },
    /// One per finished drag, resize or drag-to-select session.
    #[serde(rename = "interval-update-end")]
    UpdateEnd {
        id: IntervalId,
        input: Option<PointerEvent>,
    },
    #[serde(rename = "interval-in")]
    In { id: IntervalId },
    #[serde(rename = "interval-out")]
    Out { id: IntervalId },
    #[serde(rename = "interval-play")]
    Play { id: IntervalId },
    #[serde(rename = "interval-click")]
    Click { id: IntervalId, input: PointerEvent },
    #[serde(rename = "interval-dblclick")]
    DoubleClick { id: IntervalId, input: PointerEvent },
    #[serde(rename = "interval-contextmenu")]
    ContextMenu { id: IntervalId, input: PointerEvent },
    #[serde(rename = "interval-mouseenter")]
    MouseEnter { id: IntervalId, input: PointerEvent },
    #[serde(rename = "interval-mouseleave")]
    MouseLeave { id: IntervalId, input: PointerEvent },
}

/// Discriminant of [`HostEvent`], used to mute event kinds on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostEventKind {
    Created,
    Updated,
    Removed,
    UpdateEnd,
    In,
    Out,
    Play,
    Click,
    DoubleClick,
    ContextMenu,
    MouseEnter,
    MouseLeave,
}

impl HostEvent {
    pub fn kind(&self) -> HostEventKind {
        match self {
            HostEvent::Created { .. } => HostEventKind::Created,
            HostEvent::Updated { .. } => HostEventKind::Updated,
            HostEvent::Removed { .. } => HostEventKind::Removed,
            HostEvent::UpdateEnd { .. } => HostEventKind::UpdateEnd,
            HostEvent::In { .. } => HostEventKind::In,
            HostEvent::Out { .. } => HostEventKind::Out,
            HostEvent::Play { .. } => HostEventKind::Play,
            HostEvent::Click { .. } => HostEventKind::Click,
            HostEvent::DoubleClick { .. } => HostEventKind::DoubleClick,
            HostEvent::ContextMenu { .. } => HostEventKind::ContextMenu,
            HostEvent::MouseEnter { .. } => HostEventKind::MouseEnter,
            HostEvent::MouseLeave { .. } => HostEventKind::MouseLeave,
        }
    }

    pub fn id(&self) -> &IntervalId {
        match self {
            HostEvent::Created { id, .. }
            | HostEvent::Updated { id, .. }
            | HostEvent::Removed { id }
            | HostEvent::UpdateEnd { id, .. }
            | HostEvent::In { id }
            | HostEvent::Out { id }
            | HostEvent::Play { id }
            | HostEvent::Click { id, .. }
            | HostEvent::DoubleClick { id, .. }
            | HostEvent::ContextMenu { id, .. }
            | HostEvent::MouseEnter { id, .. }
            | HostEvent::MouseLeave { id, .. } => id,
        }
    }
}

/// Per-interval notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IntervalSignal {
    /// Clamped geometry to draw.
    Render(Span),
    Update,
    UpdateEnd,
    Remove,
    In,
    Out,
    Play,
}

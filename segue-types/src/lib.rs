//! # segue-types
//!
//! Shared type definitions for the Segue interval overlay.
//! This crate contains the plain data exchanged between segue-core, the host
//! application and the replay tooling: interval parameters and patches, host
//! events, pointer input and the snap grid.
//!
//! Nothing in here owns behaviour beyond small pure helpers; the state
//! machines live in segue-core.

pub mod event;
pub mod input;
pub mod interval;
mod lenient;
pub mod snap;

pub use event::{HostEvent, HostEventKind, IntervalSignal};
pub use input::{IntervalPart, Orientation, PointerEvent, PointerPhase, PointerTarget};
pub use interval::{
    Direction, EventParams, InteractionAction, IntervalParams, IntervalPatch, Side, Span,
};
pub use lenient::finite_or_zero;
pub use snap::{quantize, SnapGrid};

/// Unique identifier for an interval within its store.
///
/// Hosts may choose their own ids; when none is given the store assigns one.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct IntervalId(String);

impl IntervalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IntervalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for IntervalId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for IntervalId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

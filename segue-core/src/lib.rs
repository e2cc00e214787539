//! # segue-core
//!
//! Interval overlay for a media timeline: time-bounded annotations that can be
//! created by dragging, moved, resized, snapped to a grid and linked to
//! playback. The core never draws and never owns a clock; it talks to the
//! host through the [`Transport`](transport::Transport) and
//! [`Surface`](surface::Surface) traits and reports through an event bus.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use segue_core::config::Config;
//! use segue_core::headless::{ManualTransport, StaticSurface};
//! use segue_core::timeline::Timeline;
//! use segue_types::{IntervalParams, PointerEvent, PointerPhase};
//!
//! // 1. Build a timeline from config defaults
//! let config = Config::load();
//! let mut timeline = Timeline::new(
//!     ManualTransport::new(60.0),
//!     StaticSurface::fit(60.0, 20.0),
//!     config.timeline_options(),
//! );
//!
//! // 2. Listen for host events
//! timeline.on(|event| println!("{:?}", event));
//!
//! // 3. Add intervals and feed input, frames and playback ticks
//! timeline.add(IntervalParams::editable(4.0, 9.5));
//! timeline.handle_pointer(&PointerEvent::mouse(PointerPhase::Down, 120.0, 0.0));
//! while timeline.wants_frame() { timeline.on_frame(); }
//! timeline.on_time_update(5.0);
//! ```
//!
//! ## Module Overview
//!
//! - [`timeline`]: `Timeline` facade, the single entry point for hosts
//! - [`store`]: `IntervalStore`, id-keyed ownership, capacity, lookups
//! - [`interval`]: `Interval` entity, partial updates and geometry clamping
//! - [`interaction`]: drag/resize controller per interval
//! - [`selection`]: drag-to-select controller
//! - [`autoscroll`]: edge autoscroll task driven by animation frames
//! - [`playback`]: `PlaybackLinker`, in/out notifications and loop restart
//! - [`emitter`]: pub/sub `Emitter` and the host `EventBus`
//! - [`config`]: TOML configuration (embedded defaults + user override)
//! - [`interaction_log`]: JSONL interaction log and replay
//! - [`transport`], [`surface`], [`input`]: collaborator traits
//! - [`headless`]: in-memory collaborators for tests and replay
//! - [`render`]: pixel geometry and tooltip text for renderers

pub mod autoscroll;
pub mod config;
pub mod emitter;
pub mod headless;
pub mod input;
pub mod interaction;
pub mod interaction_log;
pub mod interval;
pub mod playback;
pub mod render;
pub mod selection;
pub mod store;
pub mod surface;
pub mod timeline;
pub mod transport;

pub use interval::Interval;
pub use store::IntervalStore;
pub use timeline::{Timeline, TimelineOptions};

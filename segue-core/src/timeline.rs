//! The timeline facade.
//!
//! [`Timeline`] owns the transport, the surface, the interval store and every
//! controller, and is the single entry point for the host: pointer input goes
//! through [`Timeline::handle_pointer`] (or [`Timeline::pump`]), animation
//! frames through [`Timeline::on_frame`] and playback ticks through
//! [`Timeline::on_time_update`]. Everything runs synchronously on the caller's
//! thread.

use std::collections::BTreeMap;

use segue_types::{
    HostEvent, HostEventKind, IntervalId, IntervalParams, IntervalPatch, PointerEvent,
    PointerPhase, PointerTarget,
};

use crate::emitter::{EventBus, ListenerId};
use crate::input::InputSource;
use crate::interaction::{marker_span, InteractionContext, PointerInteractionController, Response};
use crate::interval::Interval;
use crate::playback::PlaybackLinker;
use crate::selection::{SelectionController, SelectionOptions};
use crate::store::{IntervalStore, StoreDefaults};
use crate::surface::Surface;
use crate::transport::Transport;

pub const DEFAULT_MARKER_WIDTH_PX: f64 = 4.0;
/// Share of the viewport width used as the interval edge-scroll band when no
/// width is configured.
pub const DEFAULT_EDGE_SCROLL_FRACTION: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineOptions {
    /// Intervals created at construction.
    pub intervals: Vec<IntervalParams>,
    /// Enable drag-to-select at construction.
    pub drag_selection: Option<SelectionOptions>,
    pub defaults: StoreDefaults,
    pub max_count: Option<usize>,
    /// Width in pixels of an interval created without an end.
    pub marker_width_px: f64,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            intervals: Vec::new(),
            drag_selection: None,
            defaults: StoreDefaults::default(),
            max_count: None,
            marker_width_px: DEFAULT_MARKER_WIDTH_PX,
        }
    }
}

pub struct Timeline<T: Transport, S: Surface> {
    transport: T,
    surface: S,
    store: IntervalStore,
    bus: EventBus,
    controllers: BTreeMap<IntervalId, PointerInteractionController>,
    selection: Option<SelectionController>,
    linker: PlaybackLinker,
    marker_width_px: f64,
    suppress_click: bool,
}

impl<T: Transport, S: Surface> Timeline<T, S> {
    pub fn new(transport: T, surface: S, options: TimelineOptions) -> Self {
        let bus = EventBus::new();
        let mut defaults = options.defaults;
        if defaults.edge_scroll_width.is_none() {
            defaults.edge_scroll_width =
                Some(surface.viewport_width() * DEFAULT_EDGE_SCROLL_FRACTION);
        }
        let store = IntervalStore::new(bus.clone())
            .with_defaults(defaults)
            .with_max_count(options.max_count);

        let mut timeline = Self {
            transport,
            surface,
            store,
            bus,
            controllers: BTreeMap::new(),
            selection: None,
            linker: PlaybackLinker::new(),
            marker_width_px: options.marker_width_px,
            suppress_click: false,
        };
        for params in options.intervals {
            timeline.add(params);
        }
        if let Some(selection) = options.drag_selection {
            timeline.enable_drag_selection(selection);
        }
        timeline
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store(&self) -> &IntervalStore {
        &self.store
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Subscribe to host events.
    pub fn on(&self, listener: impl Fn(&HostEvent) + 'static) -> ListenerId {
        self.bus.on(listener)
    }

    pub fn duration(&self) -> f64 {
        self.transport.duration()
    }

    /// Length given to an interval created without an end.
    pub fn marker_span(&self) -> f64 {
        marker_span(
            self.marker_width_px,
            self.surface.scroll_width(),
            self.transport.duration(),
        )
    }

    pub fn add(&mut self, params: IntervalParams) -> Option<&mut Interval> {
        let duration = self.transport.duration();
        let marker = self.marker_span();
        let id = self.store.add(params, duration, marker)?.id().clone();
        self.controllers
            .insert(id.clone(), PointerInteractionController::new(id.clone()));
        self.store.get_mut(&id)
    }

    pub fn update(&mut self, id: &IntervalId, patch: IntervalPatch) -> bool {
        let duration = self.transport.duration();
        match self.store.get_mut(id) {
            Some(interval) => interval.update(patch, None, duration),
            None => false,
        }
    }

    pub fn remove(&mut self, id: &IntervalId) -> bool {
        self.controllers.remove(id);
        self.store.remove(id)
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.controllers.clear();
    }

    pub fn get(&self, id: &IntervalId) -> Option<&Interval> {
        self.store.get(id)
    }

    pub fn get_mut(&mut self, id: &IntervalId) -> Option<&mut Interval> {
        self.store.get_mut(id)
    }

    pub fn sorted(&self) -> Vec<&Interval> {
        self.store.sorted()
    }

    /// The interval under the playhead.
    pub fn current(&self) -> Option<&Interval> {
        self.store.current_at(self.transport.current_time())
    }

    pub fn play(&mut self, id: &IntervalId, offset: Option<f64>) -> bool {
        match self.store.get(id) {
            Some(interval) => {
                interval.play(offset, &mut self.transport);
                true
            }
            None => false,
        }
    }

    pub fn play_loop(&mut self, id: &IntervalId, offset: Option<f64>) -> bool {
        match self.store.get_mut(id) {
            Some(interval) => {
                interval.play_loop(offset, &mut self.transport);
                true
            }
            None => false,
        }
    }

    pub fn set_loop(&mut self, id: &IntervalId, looping: bool) -> bool {
        match self.store.get_mut(id) {
            Some(interval) => {
                interval.set_loop(looping);
                true
            }
            None => false,
        }
    }

    /// Replace any active drag-to-select configuration.
    pub fn enable_drag_selection(&mut self, options: SelectionOptions) {
        log::debug!(target: "selection", "drag selection enabled (slop {})", options.slop);
        self.selection = Some(SelectionController::new(options));
    }

    pub fn disable_drag_selection(&mut self) {
        if self.selection.take().is_some() {
            log::debug!(target: "selection", "drag selection disabled");
        }
    }

    pub fn drag_selection_enabled(&self) -> bool {
        self.selection.is_some()
    }

    /// Route one pointer event.
    ///
    /// Pointer-down goes to the controller of the interval under the pointer;
    /// if that interval is not editable the event falls through to
    /// drag-to-select. Move and up reach every controller. Leaving the
    /// surface only ends a drag-to-select. Clicks, double-clicks, context
    /// menus and hover changes go to the interval under the pointer.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Response {
        if !event.phase.is_gesture() {
            return self.interval_event(event);
        }
        self.sync_controllers();
        let mut ctx = InteractionContext::new(
            &mut self.store,
            &self.transport,
            &mut self.surface,
            self.marker_width_px,
        );
        let mut response = Response::default();
        match event.phase {
            PointerPhase::Down => {
                if let PointerTarget::Interval { id, .. } = &event.target {
                    if let Some(controller) = self.controllers.get_mut(id) {
                        response = controller.handle(event, &mut ctx);
                    }
                }
                if !response.consumed {
                    if let Some(selection) = self.selection.as_mut() {
                        response = response.merge(selection.handle(event, &mut ctx));
                    }
                }
            }
            PointerPhase::Move | PointerPhase::Up => {
                for controller in self.controllers.values_mut() {
                    response = response.merge(controller.handle(event, &mut ctx));
                }
                if let Some(selection) = self.selection.as_mut() {
                    response = response.merge(selection.handle(event, &mut ctx));
                }
            }
            PointerPhase::Leave => {
                if let Some(selection) = self.selection.as_mut() {
                    response = selection.handle(event, &mut ctx);
                }
            }
            _ => {}
        }
        if response.suppress_click {
            self.suppress_click = true;
        }
        self.sync_controllers();
        response
    }

    /// A click right after a gesture that changed geometry is dropped; see
    /// [`accept_click`](Self::accept_click).
    fn interval_event(&mut self, event: &PointerEvent) -> Response {
        let mut response = Response::default();
        if event.phase == PointerPhase::Click && !self.accept_click() {
            log::trace!(target: "interaction", "click dropped after gesture");
            response.click_dropped = true;
            return response;
        }
        if let PointerTarget::Interval { id, .. } = &event.target {
            if let Some(interval) = self.store.get(id) {
                response.prevent_default = interval.pointer_event(event);
            }
        }
        response
    }

    /// Drain `input`, handling every event. Returns the number handled.
    pub fn pump(&mut self, input: &mut dyn InputSource) -> usize {
        let mut handled = 0;
        while let Some(event) = input.poll_event() {
            self.handle_pointer(&event);
            handled += 1;
        }
        handled
    }

    /// Advance pending edge scrolls by one animation frame. Returns whether
    /// another frame is wanted.
    pub fn on_frame(&mut self) -> bool {
        let mut ctx = InteractionContext::new(
            &mut self.store,
            &self.transport,
            &mut self.surface,
            self.marker_width_px,
        );
        for controller in self.controllers.values_mut() {
            controller.on_frame(&mut ctx);
        }
        if let Some(selection) = self.selection.as_mut() {
            selection.on_frame(&mut ctx);
        }
        self.wants_frame()
    }

    pub fn wants_frame(&self) -> bool {
        self.controllers.values().any(|c| c.wants_frame())
            || self.selection.as_ref().map_or(false, |s| s.wants_frame())
    }

    /// Playback tick from the transport.
    pub fn on_time_update(&mut self, time: f64) {
        self.linker
            .on_time_update(time, &mut self.store, &mut self.transport);
    }

    /// Whether the host should act on a click. Returns false exactly once
    /// after a gesture that changed geometry. Click events routed through
    /// [`handle_pointer`](Self::handle_pointer) already go through this.
    pub fn accept_click(&mut self) -> bool {
        !std::mem::take(&mut self.suppress_click)
    }

    /// Re-clamp every interval and re-emit render notifications, e.g. after a
    /// zoom or once the duration becomes known.
    pub fn refresh(&mut self) {
        let duration = self.transport.duration();
        self.store.refresh(duration);
    }

    /// Tear everything down. Interval removals during teardown are not
    /// reported as `interval-removed`.
    pub fn destroy(&mut self) {
        self.bus.set_disabled(&[HostEventKind::Removed]);
        self.disable_drag_selection();
        for controller in self.controllers.values_mut() {
            controller.reset();
        }
        self.linker.reset(&mut self.store);
        self.store.clear();
        self.controllers.clear();
        self.suppress_click = false;
        log::debug!(target: "store", "timeline destroyed");
    }

    /// Keep exactly one controller per live interval. Intervals created by
    /// drag-to-select or removed through the store are picked up here.
    fn sync_controllers(&mut self) {
        let store = &self.store;
        self.controllers.retain(|id, _| store.contains(id));
        for id in self.store.ids() {
            if !self.controllers.contains_key(&id) {
                self.controllers
                    .insert(id.clone(), PointerInteractionController::new(id));
            }
        }
    }
}

//! Owner of every interval on a timeline.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use segue_types::{HostEvent, IntervalId, IntervalParams, IntervalSignal, SnapGrid};

use crate::emitter::EventBus;
use crate::interval::Interval;
use crate::render::TimeFormat;

/// Values applied to new intervals whose parameters leave them unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreDefaults {
    pub snap: SnapGrid,
    pub min_length: Option<f64>,
    pub scroll: Option<bool>,
    pub edge_scroll_width: Option<f64>,
    pub scroll_speed: Option<f64>,
    pub color: Option<String>,
    /// Tooltip formatter for intervals that do not carry their own.
    pub time_format: Option<TimeFormat>,
}

/// Id-keyed collection of intervals.
///
/// Iteration follows id order, which makes "first found" tie-breaks stable.
/// Removal is driven by the interval's own `Remove` signal: the store
/// subscribes on `add` and evicts queued ids on its next mutating call, so an
/// interval removed through [`get_mut`](Self::get_mut) disappears as well.
pub struct IntervalStore {
    intervals: BTreeMap<IntervalId, Interval>,
    max_count: Option<usize>,
    defaults: StoreDefaults,
    bus: EventBus,
    evicted: Rc<RefCell<Vec<IntervalId>>>,
    next_id: u64,
}

impl IntervalStore {
    pub fn new(bus: EventBus) -> Self {
        Self {
            intervals: BTreeMap::new(),
            max_count: None,
            defaults: StoreDefaults::default(),
            bus,
            evicted: Rc::new(RefCell::new(Vec::new())),
            next_id: 0,
        }
    }

    pub fn with_defaults(mut self, defaults: StoreDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_max_count(mut self, max_count: Option<usize>) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn defaults(&self) -> &StoreDefaults {
        &self.defaults
    }

    pub fn max_count(&self) -> Option<usize> {
        self.max_count
    }

    pub fn set_max_count(&mut self, max_count: Option<usize>) {
        self.max_count = max_count;
    }

    /// Adding one more interval would go over `max_count`.
    pub fn would_exceed_max(&self) -> bool {
        matches!(self.max_count, Some(max) if self.len() >= max)
    }

    /// Create and register an interval.
    ///
    /// Returns `None` without mutating anything when the store is full. A
    /// caller-supplied id that is already taken replaces the existing
    /// interval, which is removed first; a replacement never counts against
    /// capacity.
    pub fn add(
        &mut self,
        mut params: IntervalParams,
        duration: f64,
        marker_span: f64,
    ) -> Option<&mut Interval> {
        self.reap();
        let replaces = params
            .id
            .as_ref()
            .map_or(false, |id| self.intervals.contains_key(id));
        if !replaces && self.would_exceed_max() {
            log::debug!(target: "store", "add refused: {} intervals at capacity", self.len());
            return None;
        }

        if params.snap.is_none() {
            params.snap = Some(self.defaults.snap);
        }
        if params.min_length.is_none() {
            params.min_length = self.defaults.min_length;
        }
        if params.scroll.is_none() {
            params.scroll = self.defaults.scroll;
        }
        if params.edge_scroll_width.is_none() {
            params.edge_scroll_width = self.defaults.edge_scroll_width;
        }
        if params.scroll_speed.is_none() {
            params.scroll_speed = self.defaults.scroll_speed;
        }
        if params.color.is_none() {
            params.color = self.defaults.color.clone();
        }

        let id = match params.id.take() {
            Some(id) => {
                if self.intervals.contains_key(&id) {
                    log::debug!(target: "store", "replacing interval {}", id);
                    self.remove(&id);
                }
                id
            }
            None => self.fresh_id(),
        };

        let mut interval =
            Interval::new(id.clone(), params, duration, marker_span, self.bus.clone());
        interval.set_time_format(self.defaults.time_format.clone());
        let evicted = Rc::clone(&self.evicted);
        let evict_id = id.clone();
        interval.signals().on(move |signal| {
            if matches!(signal, IntervalSignal::Remove) {
                evicted.borrow_mut().push(evict_id.clone());
            }
        });
        let span = interval.span();
        self.intervals.insert(id.clone(), interval);
        log::debug!(target: "store", "added interval {} [{}, {}]", id, span.start, span.end);
        self.bus.emit(HostEvent::Created {
            id: id.clone(),
            span,
        });
        self.intervals.get_mut(&id)
    }

    /// Remove one interval. Unknown ids and repeated calls are no-ops.
    pub fn remove(&mut self, id: &IntervalId) -> bool {
        let removed = self
            .intervals
            .get_mut(id)
            .map(|interval| interval.remove())
            .unwrap_or(false);
        self.reap();
        removed
    }

    /// Remove every interval.
    pub fn clear(&mut self) {
        // Removal evicts from the map, so walk a snapshot of the ids.
        let ids: Vec<IntervalId> = self.intervals.keys().cloned().collect();
        for id in ids {
            self.remove(&id);
        }
    }

    pub fn get(&self, id: &IntervalId) -> Option<&Interval> {
        self.intervals.get(id).filter(|iv| iv.is_attached())
    }

    pub fn get_mut(&mut self, id: &IntervalId) -> Option<&mut Interval> {
        self.intervals.get_mut(id).filter(|iv| iv.is_attached())
    }

    pub fn contains(&self, id: &IntervalId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.values().filter(|iv| iv.is_attached())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Interval> {
        self.intervals.values_mut().filter(|iv| iv.is_attached())
    }

    pub fn ids(&self) -> Vec<IntervalId> {
        self.iter().map(|iv| iv.id().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Intervals ordered by start time; equal starts fall back to id order.
    pub fn sorted(&self) -> Vec<&Interval> {
        let mut list: Vec<&Interval> = self.iter().collect();
        list.sort_by(|a, b| {
            a.start()
                .total_cmp(&b.start())
                .then_with(|| a.id().cmp(b.id()))
        });
        list
    }

    /// The shortest interval covering `time` (inclusive bounds). Ties keep
    /// the first one found.
    pub fn current_at(&self, time: f64) -> Option<&Interval> {
        let mut best: Option<&Interval> = None;
        for interval in self.iter() {
            if interval.start() <= time && interval.end() >= time {
                if best.map_or(true, |b| interval.length() < b.length()) {
                    best = Some(interval);
                }
            }
        }
        best
    }

    /// Re-clamp every interval against `duration` and re-emit render
    /// notifications.
    pub fn refresh(&mut self, duration: f64) {
        for interval in self.iter_mut() {
            interval.refresh(duration);
        }
    }

    fn fresh_id(&mut self) -> IntervalId {
        loop {
            self.next_id += 1;
            let id = IntervalId::new(format!("interval-{}", self.next_id));
            if !self.intervals.contains_key(&id) {
                return id;
            }
        }
    }

    /// Drop intervals whose `Remove` signal fired since the last call.
    fn reap(&mut self) {
        let queued: Vec<IntervalId> = self.evicted.borrow_mut().drain(..).collect();
        for id in queued {
            let detached = self
                .intervals
                .get(&id)
                .map(|iv| !iv.is_attached())
                .unwrap_or(false);
            if detached {
                self.intervals.remove(&id);
                log::debug!(target: "store", "evicted interval {}", id);
            }
        }
    }
}

//! Publish/subscribe channel composed into intervals, the store and the timeline.
//!
//! Handles are cheap to clone and share one listener list, so an interval and
//! the store that owns it can hold the same host [`EventBus`].

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use segue_types::{HostEvent, HostEventKind};

pub type Listener<E> = Rc<dyn Fn(&E)>;

/// Returned by [`Emitter::on`]; pass to [`Emitter::off`] to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry<E> {
    id: ListenerId,
    listener: Listener<E>,
    once: bool,
}

pub struct Emitter<E> {
    listeners: Rc<RefCell<Vec<Entry<E>>>>,
    next_id: Rc<Cell<u64>>,
}

impl<E> Clone for Emitter<E> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    fn subscribe(&self, listener: Listener<E>, once: bool) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Entry { id, listener, once });
        id
    }

    pub fn on(&self, listener: impl Fn(&E) + 'static) -> ListenerId {
        self.subscribe(Rc::new(listener), false)
    }

    /// Subscribe for a single delivery.
    pub fn once(&self, listener: impl Fn(&E) + 'static) -> ListenerId {
        self.subscribe(Rc::new(listener), true)
    }

    /// Returns false if `id` was not subscribed.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|e| e.id != id);
        listeners.len() != before
    }

    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver `event` to every listener subscribed at the time of the call.
    ///
    /// The list is snapshotted first, so listeners may subscribe or unsubscribe
    /// from inside a callback.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = {
            let mut listeners = self.listeners.borrow_mut();
            let snapshot = listeners.iter().map(|e| Rc::clone(&e.listener)).collect();
            listeners.retain(|e| !e.once);
            snapshot
        };
        for listener in snapshot {
            (listener)(event);
        }
    }
}

/// Host-facing bus carrying [`HostEvent`]s, with per-kind muting.
#[derive(Clone, Default)]
pub struct EventBus {
    emitter: Emitter<HostEvent>,
    disabled: Rc<RefCell<HashSet<HostEventKind>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, listener: impl Fn(&HostEvent) + 'static) -> ListenerId {
        self.emitter.on(listener)
    }

    pub fn once(&self, listener: impl Fn(&HostEvent) + 'static) -> ListenerId {
        self.emitter.once(listener)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.emitter.off(id)
    }

    pub fn emit(&self, event: HostEvent) {
        if self.disabled.borrow().contains(&event.kind()) {
            return;
        }
        self.emitter.emit(&event);
    }

    /// Mute exactly the given kinds; any previously muted kind not listed is re-enabled.
    pub fn set_disabled(&self, kinds: &[HostEventKind]) {
        let mut disabled = self.disabled.borrow_mut();
        disabled.clear();
        disabled.extend(kinds.iter().copied());
    }

    pub fn is_disabled(&self, kind: HostEventKind) -> bool {
        self.disabled.borrow().contains(&kind)
    }
}

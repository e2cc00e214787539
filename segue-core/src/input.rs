use std::collections::VecDeque;

use segue_types::PointerEvent;

/// Source of pointer events, polled by `Timeline::pump`.
///
/// A windowing host adapts its mouse and touch callbacks to this trait; tests
/// and replay feed scripted events.
pub trait InputSource {
    fn poll_event(&mut self) -> Option<PointerEvent>;
}

/// Queue of pre-recorded events.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<PointerEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = PointerEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self) -> Option<PointerEvent> {
        self.queue.pop_front()
    }
}

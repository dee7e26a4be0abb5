//! Single-flight dispatch gate

use tracing::debug;

use super::queue::EventQueue;
use crate::domain::Event;

/// Event queue guarded by a busy flag
///
/// At most one event is in flight: `process_next` hands out the head of the
/// queue only while the dispatcher is free, and marks it busy until `release`.
#[derive(Debug, Default)]
pub struct Dispatcher {
    queue: EventQueue,
    busy: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, event: Event) {
        debug!(kind = %event.kind, priority = %event.priority, "Dispatcher::enqueue: called");
        self.queue.push(event);
    }

    /// Take the next event if the dispatcher is free
    ///
    /// Returns `None` without side effects while busy or when the queue is empty.
    pub fn process_next(&mut self) -> Option<Event> {
        if self.busy {
            debug!(depth = self.queue.len(), "Dispatcher::process_next: busy");
            return None;
        }
        let event = self.queue.pop()?;
        self.busy = true;
        debug!(kind = %event.kind, id = %event.id, "Dispatcher::process_next: dequeued");
        Some(event)
    }

    /// Mark the in-flight event finished
    pub fn release(&mut self) {
        debug!(was_busy = self.busy, "Dispatcher::release: called");
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn depth(&self) -> usize {
        self.queue.len()
    }

    pub fn peak_depth(&self) -> usize {
        self.queue.peak_depth()
    }

    /// Pending events in dispatch order
    pub fn pending(&self) -> impl Iterator<Item = &Event> {
        self.queue.iter()
    }
}

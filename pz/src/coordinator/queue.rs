//! Priority-ordered event queue

use std::collections::VecDeque;

use crate::domain::{Event, Priority};

/// Queue of pending events
///
/// Urgent events are inserted at the front, normal events at the back. The
/// newest urgent event is therefore served first among urgents, while normal
/// events keep their arrival order. Every urgent event precedes every normal
/// one.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
    peak_depth: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        match event.priority {
            Priority::Urgent => self.events.push_front(event),
            Priority::Normal => self.events.push_back(event),
        }
        self.peak_depth = self.peak_depth.max(self.events.len());
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn peek(&self) -> Option<&Event> {
        self.events.front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Largest depth seen since creation
    pub fn peak_depth(&self) -> usize {
        self.peak_depth
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}

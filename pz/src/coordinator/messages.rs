//! Message types for the Coordinator

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::domain::Event;
use crate::error::Result;
use crate::stages::Component;

/// Requests handled by the Coordinator task
#[derive(Debug)]
pub enum CoordRequest {
    /// Register a component and attach it to this coordinator
    Register {
        component: Arc<dyn Component>,
        reply_tx: oneshot::Sender<Result<()>>,
    },

    /// Find a registered component by name
    Lookup {
        name: String,
        reply_tx: oneshot::Sender<Option<Arc<dyn Component>>>,
    },

    /// Confirm every pipeline role has a component
    VerifyStages { reply_tx: oneshot::Sender<Result<()>> },

    /// Queue an event for dispatch
    Notify { event: Event },

    /// Queue several events before the next dispatch
    NotifyBatch { events: Vec<Event> },

    /// The in-flight dispatch finished (internal)
    Release,

    /// Get current metrics
    GetMetrics {
        reply_tx: oneshot::Sender<CoordinatorMetrics>,
    },

    /// Shutdown the coordinator
    Shutdown,
}

/// Coordinator metrics for observability
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinatorMetrics {
    pub registered_components: usize,
    pub queue_depth: usize,
    pub peak_queue_depth: usize,
    pub busy: bool,
    pub events_received: u64,
    pub events_dispatched: u64,
    pub events_discarded: u64,
    pub orders_completed: u64,
}

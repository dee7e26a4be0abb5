//! Event Bus - broadcast channel for pipeline activity

use tokio::sync::broadcast;
use tracing::debug;

use super::types::PipelineEvent;

/// Default channel capacity (events)
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Broadcasts pipeline activity to any number of subscribers
///
/// Cloning is cheap; every clone feeds the same channel.
#[derive(Clone, Debug)]
pub struct EventBus {
    tx: broadcast::Sender<PipelineEvent>,
}

impl EventBus {
    /// Create a new event bus with the given capacity
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "EventBus::new: creating event bus");
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Emit an event to all subscribers
    ///
    /// Fire-and-forget: with no subscribers the event is dropped.
    pub fn emit(&self, event: PipelineEvent) {
        debug!(event_type = event.event_type(), "EventBus::emit");
        let _ = self.tx.send(event);
    }

    /// Subscribe to events emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        debug!("EventBus::subscribe: new subscriber");
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderPayload;

    #[tokio::test]
    async fn test_emit_reaches_all_subscribers() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.emit(PipelineEvent::OrderCompleted {
            order: OrderPayload::new("Pizza X", 7, false),
        });

        assert_eq!(rx1.recv().await.unwrap().event_type(), "order_completed");
        assert_eq!(rx2.recv().await.unwrap().event_type(), "order_completed");
    }

    #[test]
    fn test_emit_without_subscribers_is_ok() {
        let bus = EventBus::new(4);
        bus.emit(PipelineEvent::EventDiscarded {
            kind: "bogus".to_string(),
            sender: "test".to_string(),
        });
        assert_eq!(bus.subscriber_count(), 0);
    }
}

//! CoordinatorHandle - client interface to the Coordinator task

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use super::messages::{CoordRequest, CoordinatorMetrics};
use crate::domain::{Event, EventKind, OrderPayload};
use crate::error::{PizzeriaError, Result};
use crate::events::{EventBus, PipelineEvent};
use crate::stages::Component;

/// Handle for talking to a running Coordinator
///
/// Cloneable; every clone keeps the coordinator's inbox open.
#[derive(Clone, Debug)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<CoordRequest>,
    bus: EventBus,
}

impl CoordinatorHandle {
    pub(crate) fn new(tx: mpsc::Sender<CoordRequest>, bus: EventBus) -> Self {
        debug!("CoordinatorHandle::new: called");
        Self { tx, bus }
    }

    async fn send(&self, req: CoordRequest) -> Result<()> {
        self.tx.send(req).await.map_err(|_| PizzeriaError::CoordinatorClosed)
    }

    /// Register a component and bind it to this coordinator
    ///
    /// Fails if the component's name or role is already taken, or if the
    /// component is already attached elsewhere.
    pub async fn register(&self, component: Arc<dyn Component>) -> Result<()> {
        debug!(name = %component.name(), role = %component.role(), "CoordinatorHandle::register: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(CoordRequest::Register { component, reply_tx }).await?;
        reply_rx.await.map_err(|_| PizzeriaError::CoordinatorClosed)?
    }

    /// Find a registered component by exact name
    pub async fn lookup(&self, name: &str) -> Result<Arc<dyn Component>> {
        debug!(%name, "CoordinatorHandle::lookup: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(CoordRequest::Lookup {
            name: name.to_string(),
            reply_tx,
        })
        .await?;
        reply_rx
            .await
            .map_err(|_| PizzeriaError::CoordinatorClosed)?
            .ok_or_else(|| PizzeriaError::ComponentNotFound { name: name.to_string() })
    }

    /// Fail with `StageMissing` unless all five roles are registered
    pub async fn verify_stages(&self) -> Result<()> {
        debug!("CoordinatorHandle::verify_stages: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(CoordRequest::VerifyStages { reply_tx }).await?;
        reply_rx.await.map_err(|_| PizzeriaError::CoordinatorClosed)?
    }

    /// Queue an event on behalf of `sender`
    pub async fn notify(&self, sender: &str, kind: EventKind, payload: OrderPayload) -> Result<()> {
        debug!(%sender, %kind, item = %payload.item, "CoordinatorHandle::notify: called");
        self.send(CoordRequest::Notify {
            event: Event::new(sender, kind, payload),
        })
        .await
    }

    /// Queue one event per payload in a single request
    ///
    /// The coordinator queues the whole batch before dispatching, so priority
    /// applies across it regardless of runtime scheduling.
    pub async fn notify_batch(&self, sender: &str, kind: EventKind, payloads: Vec<OrderPayload>) -> Result<()> {
        debug!(%sender, %kind, count = payloads.len(), "CoordinatorHandle::notify_batch: called");
        self.send(batch_request(sender, kind, payloads)).await
    }

    /// Queue an event whose kind is given by its wire name
    pub async fn notify_raw(&self, sender: &str, kind: &str, payload: OrderPayload) -> Result<()> {
        self.notify(sender, EventKind::from(kind), payload).await
    }

    /// Get current coordinator metrics
    pub async fn metrics(&self) -> Result<CoordinatorMetrics> {
        debug!("CoordinatorHandle::metrics: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(CoordRequest::GetMetrics { reply_tx }).await?;
        reply_rx.await.map_err(|_| PizzeriaError::CoordinatorClosed)
    }

    /// Request shutdown of the Coordinator
    pub async fn shutdown(&self) -> Result<()> {
        debug!("CoordinatorHandle::shutdown: called");
        self.send(CoordRequest::Shutdown).await
    }

    /// Subscribe to pipeline events emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.bus.subscribe()
    }

    /// Non-owning link for components
    pub fn link(&self) -> CoordinatorLink {
        CoordinatorLink {
            tx: self.tx.downgrade(),
            bus: self.bus.clone(),
        }
    }
}

/// Back reference from a component to its coordinator
///
/// Holds a weak sender, so components never keep the coordinator alive.
#[derive(Clone, Debug)]
pub struct CoordinatorLink {
    tx: mpsc::WeakSender<CoordRequest>,
    bus: EventBus,
}

impl CoordinatorLink {
    pub(crate) fn from_sender(tx: &mpsc::Sender<CoordRequest>, bus: EventBus) -> Self {
        Self {
            tx: tx.downgrade(),
            bus,
        }
    }

    /// Report an event to the coordinator
    pub async fn notify(&self, sender: &str, kind: EventKind, payload: OrderPayload) -> Result<()> {
        debug!(%sender, %kind, "CoordinatorLink::notify: called");
        let tx = self.tx.upgrade().ok_or(PizzeriaError::CoordinatorClosed)?;
        tx.send(CoordRequest::Notify {
            event: Event::new(sender, kind, payload),
        })
        .await
        .map_err(|_| PizzeriaError::CoordinatorClosed)
    }

    /// Report several events to the coordinator in one request
    pub async fn notify_batch(&self, sender: &str, kind: EventKind, payloads: Vec<OrderPayload>) -> Result<()> {
        debug!(%sender, %kind, count = payloads.len(), "CoordinatorLink::notify_batch: called");
        let tx = self.tx.upgrade().ok_or(PizzeriaError::CoordinatorClosed)?;
        tx.send(batch_request(sender, kind, payloads))
            .await
            .map_err(|_| PizzeriaError::CoordinatorClosed)
    }

    pub fn emit(&self, event: PipelineEvent) {
        self.bus.emit(event);
    }
}

fn batch_request(sender: &str, kind: EventKind, payloads: Vec<OrderPayload>) -> CoordRequest {
    let events = payloads
        .into_iter()
        .map(|payload| Event::new(sender, kind.clone(), payload))
        .collect();
    CoordRequest::NotifyBatch { events }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notify_fails_when_coordinator_gone() {
        let (tx, rx) = mpsc::channel(10);
        let handle = CoordinatorHandle::new(tx, EventBus::default());
        drop(rx);

        let result = handle.notify("Waiter", EventKind::OrderPlaced, OrderPayload::default()).await;
        assert!(matches!(result, Err(PizzeriaError::CoordinatorClosed)));
    }

    #[tokio::test]
    async fn test_link_does_not_keep_inbox_open() {
        let (tx, mut rx) = mpsc::channel(10);
        let handle = CoordinatorHandle::new(tx, EventBus::default());
        let link = handle.link();

        link.notify("Kitchen", EventKind::KitchenDone, OrderPayload::new("Pizza X", 7, false))
            .await
            .unwrap();
        match rx.recv().await {
            Some(CoordRequest::Notify { event }) => {
                assert_eq!(event.kind, EventKind::KitchenDone);
                assert_eq!(event.sender, "Kitchen");
            }
            other => panic!("Unexpected request: {:?}", other),
        }

        drop(handle);
        assert!(rx.recv().await.is_none());
        let result = link
            .notify_batch("Waiter", EventKind::OrderPlaced, vec![OrderPayload::default()])
            .await;
        assert!(matches!(result, Err(PizzeriaError::CoordinatorClosed)));
        let result = link.notify("Kitchen", EventKind::KitchenDone, OrderPayload::default()).await;
        assert!(matches!(result, Err(PizzeriaError::CoordinatorClosed)));
    }

    #[tokio::test]
    async fn test_notify_batch_sends_one_request() {
        let (tx, mut rx) = mpsc::channel(10);
        let handle = CoordinatorHandle::new(tx, EventBus::default());

        let orders = vec![OrderPayload::new("A", 1, false), OrderPayload::new("U", 2, true)];
        handle
            .notify_batch("Waiter", EventKind::OrderPlaced, orders.clone())
            .await
            .unwrap();

        match rx.try_recv() {
            Ok(CoordRequest::NotifyBatch { events }) => {
                let payloads: Vec<OrderPayload> = events.iter().map(|e| e.payload.clone()).collect();
                assert_eq!(payloads, orders);
                assert!(events.iter().all(|e| e.kind == EventKind::OrderPlaced && e.sender == "Waiter"));
                assert!(events[1].priority.is_urgent());
            }
            other => panic!("Unexpected request: {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }
}

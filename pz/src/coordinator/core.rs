//! Main Coordinator task implementation

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::config::CoordinatorConfig;
use super::dispatch::Dispatcher;
use super::handle::{CoordinatorHandle, CoordinatorLink};
use super::messages::{CoordRequest, CoordinatorMetrics};
use super::registry::Registry;
use crate::domain::{Event, Route};
use crate::error::PizzeriaError;
use crate::events::{EventBus, PipelineEvent};
use crate::stages::Component;

/// Whether the loop keeps running after a request
enum Flow {
    Continue,
    Shutdown,
}

/// Whether a dequeued event is still in flight
enum Dispatch {
    InFlight,
    Finished,
}

/// The Coordinator routes every event between pipeline components
///
/// Components never talk to each other; they report to the coordinator,
/// which queues the report and dispatches one event at a time to the next
/// stage.
pub struct Coordinator {
    dispatch_delay: Duration,
    tx: mpsc::Sender<CoordRequest>,
    rx: mpsc::Receiver<CoordRequest>,
    bus: EventBus,
}

impl Coordinator {
    /// Create a new Coordinator with the given configuration
    ///
    /// `dispatch_delay` is how long each dispatch holds the coordinator before
    /// the target stage receives its directive.
    pub fn new(config: CoordinatorConfig, dispatch_delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel(config.channel_buffer.max(1));
        let bus = EventBus::new(config.event_bus_capacity);
        Self {
            dispatch_delay,
            tx,
            rx,
            bus,
        }
    }

    /// Get a handle for registering components and sending events
    pub fn handle(&self) -> CoordinatorHandle {
        CoordinatorHandle::new(self.tx.clone(), self.bus.clone())
    }

    /// Spawn the Coordinator onto the runtime and return its handle
    pub fn spawn(config: CoordinatorConfig, dispatch_delay: Duration) -> (CoordinatorHandle, tokio::task::JoinHandle<()>) {
        let coordinator = Self::new(config, dispatch_delay);
        let handle = coordinator.handle();
        let task = tokio::spawn(coordinator.run());
        (handle, task)
    }

    /// Run the Coordinator task
    ///
    /// This consumes the Coordinator and runs until shutdown is requested.
    pub async fn run(self) {
        let Self {
            dispatch_delay,
            tx,
            mut rx,
            bus,
        } = self;

        let mut state = State {
            registry: Registry::default(),
            dispatcher: Dispatcher::new(),
            metrics: CoordinatorMetrics::default(),
            dispatch_delay,
            tx,
            bus,
        };

        info!("Coordinator started");

        'outer: while let Some(req) = rx.recv().await {
            if let Flow::Shutdown = state.handle_request(req) {
                break;
            }

            // Absorb everything already waiting so a burst is ordered by priority
            // before the next dispatch.
            while let Ok(req) = rx.try_recv() {
                if let Flow::Shutdown = state.handle_request(req) {
                    break 'outer;
                }
            }

            state.pump();
        }

        if state.dispatcher.depth() > 0 {
            warn!(pending = state.dispatcher.depth(), "Coordinator stopping with queued events");
        }
        info!("Coordinator stopped");
    }
}

/// Mutable state owned by the running Coordinator task
struct State {
    registry: Registry,
    dispatcher: Dispatcher,
    metrics: CoordinatorMetrics,
    dispatch_delay: Duration,
    tx: mpsc::Sender<CoordRequest>,
    bus: EventBus,
}

impl State {
    fn handle_request(&mut self, req: CoordRequest) -> Flow {
        match req {
            CoordRequest::Register { component, reply_tx } => {
                let result = self.register(component);
                let _ = reply_tx.send(result);
            }

            CoordRequest::Lookup { name, reply_tx } => {
                debug!(%name, "Looking up component");
                let _ = reply_tx.send(self.registry.by_name(&name).cloned());
            }

            CoordRequest::VerifyStages { reply_tx } => {
                let result = match self.registry.missing_role() {
                    Some(role) => {
                        error!(%role, "Pipeline is missing a stage");
                        Err(PizzeriaError::StageMissing { role })
                    }
                    None => Ok(()),
                };
                let _ = reply_tx.send(result);
            }

            CoordRequest::Notify { event } => self.enqueue(event),

            CoordRequest::NotifyBatch { events } => {
                debug!(count = events.len(), "Queueing batch");
                for event in events {
                    self.enqueue(event);
                }
            }

            CoordRequest::Release => {
                if !self.dispatcher.is_busy() {
                    warn!("Release received while idle");
                }
                self.dispatcher.release();
            }

            CoordRequest::GetMetrics { reply_tx } => {
                let _ = reply_tx.send(self.snapshot());
            }

            CoordRequest::Shutdown => {
                info!("Coordinator shutting down");
                return Flow::Shutdown;
            }
        }
        Flow::Continue
    }

    fn enqueue(&mut self, event: Event) {
        self.metrics.events_received += 1;
        debug!(
            sender = %event.sender,
            kind = %event.kind,
            priority = %event.priority,
            item = %event.payload.item,
            table = event.payload.table_id,
            "Queueing event"
        );
        self.dispatcher.enqueue(event);
    }

    fn register(&mut self, component: Arc<dyn Component>) -> crate::error::Result<()> {
        debug!(name = %component.name(), role = %component.role(), "Registering component");
        if let Err(e) = self.registry.check(component.as_ref()) {
            warn!(error = %e, "Registration rejected");
            return Err(e);
        }
        component.attach(CoordinatorLink::from_sender(&self.tx, self.bus.clone()))?;
        self.registry.insert(component);
        self.metrics.registered_components = self.registry.len();
        Ok(())
    }

    /// Dispatch queued events until one is in flight or the queue is empty
    fn pump(&mut self) {
        while let Some(event) = self.dispatcher.process_next() {
            match self.dispatch(event) {
                Dispatch::InFlight => break,
                Dispatch::Finished => self.dispatcher.release(),
            }
        }
    }

    fn dispatch(&mut self, event: Event) -> Dispatch {
        let Event {
            id,
            sender,
            kind,
            payload,
            ..
        } = event;

        match kind.route(&payload) {
            Route::Stage(directive) => {
                let target = directive.target();
                let Some(component) = self.registry.by_role(target).cloned() else {
                    error!(%id, %kind, error = %PizzeriaError::StageMissing { role: target }, "Dropping event");
                    self.metrics.events_discarded += 1;
                    return Dispatch::Finished;
                };

                let narration = PipelineEvent::Dispatched {
                    kind: kind.clone(),
                    target,
                    order: payload,
                };
                info!(%id, %kind, component = %component.name(), "{}", narration);
                self.bus.emit(narration);
                self.metrics.events_dispatched += 1;

                let delay = self.dispatch_delay;
                let release_tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Err(e) = component.receive(directive) {
                        error!(error = %e, "Stage rejected directive");
                    }
                    let _ = release_tx.send(CoordRequest::Release).await;
                });
                Dispatch::InFlight
            }

            Route::Complete => {
                let narration = PipelineEvent::OrderCompleted { order: payload };
                info!(%id, "{}", narration);
                self.bus.emit(narration);
                self.metrics.orders_completed += 1;
                Dispatch::Finished
            }

            Route::Discard => {
                let error = PizzeriaError::UnrecognizedEventKind {
                    kind: kind.to_string(),
                };
                warn!(%id, %sender, %error, "Discarding event");
                self.bus.emit(PipelineEvent::EventDiscarded {
                    kind: kind.to_string(),
                    sender,
                });
                self.metrics.events_discarded += 1;
                Dispatch::Finished
            }
        }
    }

    fn snapshot(&self) -> CoordinatorMetrics {
        CoordinatorMetrics {
            queue_depth: self.dispatcher.depth(),
            peak_queue_depth: self.dispatcher.peak_depth(),
            busy: self.dispatcher.is_busy(),
            ..self.metrics.clone()
        }
    }
}

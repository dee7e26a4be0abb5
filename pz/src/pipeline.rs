//! Pizzeria bootstrap: one coordinator, five fixed components

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::coordinator::{Coordinator, CoordinatorHandle};
use crate::domain::{OrderPayload, Role};
use crate::error::{PizzeriaError, Result};
use crate::events::PipelineEvent;
use crate::stages::{Billing, Component, Delivery, Kitchen, OrderTaker, Oven};

/// A running pipeline with every stage registered
pub struct Pizzeria {
    coordinator: CoordinatorHandle,
    task: JoinHandle<()>,
    waiter: Arc<OrderTaker>,
}

impl Pizzeria {
    /// Spawn the coordinator and register the five components
    ///
    /// Fails if any stage cannot be registered; the pipeline cannot run
    /// without all of them.
    pub async fn start(config: &Config) -> Result<Self> {
        debug!(simulation = ?config.simulation, "Pizzeria::start: called");
        let (coordinator, task) = Coordinator::spawn(config.coordinator.clone(), config.simulation.dispatch_delay());

        let stage_delay = config.simulation.stage_delay();
        let waiter = Arc::new(OrderTaker::new(Role::OrderTaker.default_name()));
        let components: Vec<Arc<dyn Component>> = vec![
            waiter.clone(),
            Arc::new(Kitchen::new(Role::Kitchen.default_name(), stage_delay)),
            Arc::new(Oven::new(Role::Oven.default_name(), stage_delay)),
            Arc::new(Billing::new(Role::Billing.default_name(), stage_delay)),
            Arc::new(Delivery::new(Role::Delivery.default_name(), stage_delay)),
        ];

        let wired = async {
            for component in components {
                coordinator.register(component).await?;
            }
            coordinator.verify_stages().await
        }
        .await;

        if let Err(e) = wired {
            let _ = coordinator.shutdown().await;
            let _ = task.await;
            return Err(e);
        }

        info!("Pizzeria open");
        Ok(Self {
            coordinator,
            task,
            waiter,
        })
    }

    pub fn waiter(&self) -> &OrderTaker {
        &self.waiter
    }

    pub fn coordinator(&self) -> &CoordinatorHandle {
        &self.coordinator
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.coordinator.subscribe()
    }

    /// Place orders through the waiter as one batch
    ///
    /// The coordinator queues every order before the first dispatch, so an
    /// urgent order overtakes the others on any runtime flavor.
    pub async fn place_orders(&self, orders: &[OrderPayload]) -> Result<()> {
        self.waiter.submit_batch(orders).await
    }

    /// Stop the coordinator and wait for its task to end
    pub async fn shutdown(self) -> Result<()> {
        self.coordinator.shutdown().await?;
        if let Err(e) = self.task.await {
            warn!(error = %e, "Coordinator task ended abnormally");
        }
        Ok(())
    }
}

/// Collect pipeline events until `orders` orders have completed
pub async fn wait_for_completions(
    rx: &mut broadcast::Receiver<PipelineEvent>,
    orders: usize,
    timeout: Duration,
) -> Result<Vec<PipelineEvent>> {
    watch_until_complete(rx, orders, timeout, |_| {}).await
}

/// Like [`wait_for_completions`], calling `on_event` as each event arrives
pub async fn watch_until_complete<F>(
    rx: &mut broadcast::Receiver<PipelineEvent>,
    orders: usize,
    timeout: Duration,
    mut on_event: F,
) -> Result<Vec<PipelineEvent>>
where
    F: FnMut(&PipelineEvent),
{
    let mut seen = Vec::new();
    let mut completed = 0;

    let collect = async {
        while completed < orders {
            match rx.recv().await {
                Ok(event) => {
                    if matches!(event, PipelineEvent::OrderCompleted { .. }) {
                        completed += 1;
                    }
                    on_event(&event);
                    seen.push(event);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return Err(PizzeriaError::CoordinatorClosed),
            }
        }
        Ok(())
    };

    let outcome = tokio::time::timeout(timeout, collect).await;
    match outcome {
        Ok(Ok(())) => Ok(seen),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(PizzeriaError::Timeout {
            what: format!("{} completed orders", orders),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

/// The three sample orders; the last one is urgent
pub fn demo_orders() -> Vec<OrderPayload> {
    vec![
        OrderPayload::new("Pizza Calabresa", 1, false),
        OrderPayload::new("Pizza Quatro Queijos", 2, false),
        OrderPayload::new("Pizza Marguerita", 3, true),
    ]
}

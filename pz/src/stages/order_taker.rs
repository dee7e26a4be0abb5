//! Order-taking stage

use tracing::{debug, info};

use super::{Component, StageCore, unsupported};
use crate::coordinator::CoordinatorLink;
use crate::domain::{Directive, EventKind, OrderPayload, Role};
use crate::error::Result;
use crate::events::PipelineEvent;

/// Takes orders from tables and starts their pipeline
///
/// The only component with an external entry point. Orders go to the
/// coordinator immediately, with no simulated delay.
#[derive(Debug)]
pub struct OrderTaker {
    core: StageCore,
}

impl OrderTaker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: StageCore::new(name, Role::OrderTaker, std::time::Duration::ZERO),
        }
    }

    /// Place an order; urgent orders jump ahead of queued normal work
    pub async fn place_order(&self, item: impl Into<String>, table_id: u32, urgent: bool) -> Result<()> {
        self.submit(OrderPayload::new(item, table_id, urgent)).await
    }

    /// Place an already-built order
    pub async fn submit(&self, order: OrderPayload) -> Result<()> {
        debug!(name = %self.core.name(), item = %order.item, table = order.table_id, "OrderTaker::submit: called");
        let link = self.core.link()?;

        let received = PipelineEvent::OrderReceived { order: order.clone() };
        info!("{}", received);
        link.emit(received);

        link.notify(self.core.name(), EventKind::OrderPlaced, order).await
    }

    /// Place several orders at once
    ///
    /// All of them reach the queue before any is dispatched, so an urgent
    /// order in the batch goes first.
    pub async fn submit_batch(&self, orders: &[OrderPayload]) -> Result<()> {
        debug!(name = %self.core.name(), count = orders.len(), "OrderTaker::submit_batch: called");
        let link = self.core.link()?;

        for order in orders {
            let received = PipelineEvent::OrderReceived { order: order.clone() };
            info!("{}", received);
            link.emit(received);
        }

        link.notify_batch(self.core.name(), EventKind::OrderPlaced, orders.to_vec())
            .await
    }
}

impl Component for OrderTaker {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn role(&self) -> Role {
        self.core.role()
    }

    fn attach(&self, link: CoordinatorLink) -> Result<()> {
        self.core.attach(link)
    }

    fn receive(&self, directive: Directive) -> Result<()> {
        Err(unsupported(self.core.name(), &directive))
    }
}

//! Billing stage

use std::time::Duration;

use tracing::debug;

use super::{Component, StageCore, unsupported};
use crate::coordinator::CoordinatorLink;
use crate::domain::{Directive, EventKind, OrderPayload, Role};
use crate::error::Result;

/// Charges the table
#[derive(Debug)]
pub struct Billing {
    core: StageCore,
}

impl Billing {
    pub fn new(name: impl Into<String>, work_delay: Duration) -> Self {
        Self {
            core: StageCore::new(name, Role::Billing, work_delay),
        }
    }

    /// Charge the order's table; reports `payment_done` when the payment clears
    pub fn charge(&self, order: OrderPayload) -> Result<()> {
        debug!(name = %self.core.name(), item = %order.item, "Billing::charge: called");
        self.core.start_work(order, EventKind::PaymentDone)
    }
}

impl Component for Billing {
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
        match directive {
            Directive::Charge(order) => self.charge(order),
            other => Err(unsupported(self.core.name(), &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::{CoordRequest, CoordinatorHandle};
    use crate::events::EventBus;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_charge_reports_payment_done() {
        let (tx, mut rx) = mpsc::channel(10);
        let handle = CoordinatorHandle::new(tx, EventBus::default());
        let billing = Billing::new("Billing", Duration::from_millis(1));
        billing.attach(handle.link()).unwrap();

        let order = OrderPayload::new("Pizza Quatro Queijos", 2, false);
        billing.receive(Directive::Charge(order.clone())).unwrap();

        match rx.recv().await {
            Some(CoordRequest::Notify { event }) => {
                assert_eq!(event.kind, EventKind::PaymentDone);
                assert_eq!(event.payload, order);
            }
            other => panic!("Unexpected request: {:?}", other),
        }
    }
}

//! Delivery stage

use std::time::Duration;

use tracing::debug;

use super::{Component, StageCore, unsupported};
use crate::coordinator::CoordinatorLink;
use crate::domain::{Directive, EventKind, OrderPayload, Role};
use crate::error::Result;

/// Takes the pizza to its table
#[derive(Debug)]
pub struct Delivery {
    core: StageCore,
}

impl Delivery {
    pub fn new(name: impl Into<String>, work_delay: Duration) -> Self {
        Self {
            core: StageCore::new(name, Role::Delivery, work_delay),
        }
    }

    /// Start delivering the order; `delivery_done` ends its pipeline
    pub fn deliver(&self, order: OrderPayload) -> Result<()> {
        debug!(name = %self.core.name(), item = %order.item, "Delivery::deliver: called");
        self.core.start_work(order, EventKind::DeliveryDone)
    }
}

impl Component for Delivery {
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
            Directive::Deliver(order) => self.deliver(order),
            other => Err(unsupported(self.core.name(), &other)),
        }
    }
}

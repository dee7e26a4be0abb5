//! Kitchen stage

use std::time::Duration;

use tracing::debug;

use super::{Component, StageCore, unsupported};
use crate::coordinator::CoordinatorLink;
use crate::domain::{Directive, EventKind, OrderPayload, Role};
use crate::error::Result;

/// Prepares the pizza
#[derive(Debug)]
pub struct Kitchen {
    core: StageCore,
}

impl Kitchen {
    pub fn new(name: impl Into<String>, work_delay: Duration) -> Self {
        Self {
            core: StageCore::new(name, Role::Kitchen, work_delay),
        }
    }

    /// Start preparing the order; reports `kitchen_done` when finished
    pub fn prepare(&self, order: OrderPayload) -> Result<()> {
        debug!(name = %self.core.name(), item = %order.item, "Kitchen::prepare: called");
        self.core.start_work(order, EventKind::KitchenDone)
    }
}

impl Component for Kitchen {
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
            Directive::Prepare(order) => self.prepare(order),
            other => Err(unsupported(self.core.name(), &other)),
        }
    }
}

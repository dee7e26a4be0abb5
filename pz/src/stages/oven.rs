//! Oven stage

use std::time::Duration;

use tracing::debug;

use super::{Component, StageCore, unsupported};
use crate::coordinator::CoordinatorLink;
use crate::domain::{Directive, EventKind, OrderPayload, Role};
use crate::error::Result;

/// Bakes the prepared pizza
#[derive(Debug)]
pub struct Oven {
    core: StageCore,
}

impl Oven {
    pub fn new(name: impl Into<String>, work_delay: Duration) -> Self {
        Self {
            core: StageCore::new(name, Role::Oven, work_delay),
        }
    }

    pub fn bake(&self, order: OrderPayload) -> Result<()> {
        debug!(name = %self.core.name(), item = %order.item, "Oven::bake: called");
        self.core.start_work(order, EventKind::OvenDone)
    }
}

impl Component for Oven {
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
            Directive::Bake(order) => self.bake(order),
            other => Err(unsupported(self.core.name(), &other)),
        }
    }
}

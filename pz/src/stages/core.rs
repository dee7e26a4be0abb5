//! Shared state and simulated work for stage components

use std::sync::OnceLock;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::coordinator::CoordinatorLink;
use crate::domain::{EventKind, OrderPayload, Role};
use crate::error::{PizzeriaError, Result};
use crate::events::PipelineEvent;

/// Name, role, coordinator link and work duration of a component
#[derive(Debug)]
pub struct StageCore {
    name: String,
    role: Role,
    work_delay: Duration,
    link: OnceLock<CoordinatorLink>,
}

impl StageCore {
    pub fn new(name: impl Into<String>, role: Role, work_delay: Duration) -> Self {
        Self {
            name: name.into(),
            role,
            work_delay,
            link: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn attach(&self, link: CoordinatorLink) -> Result<()> {
        debug!(name = %self.name, "StageCore::attach: called");
        self.link.set(link).map_err(|_| PizzeriaError::AlreadyAttached {
            name: self.name.clone(),
        })
    }

    pub fn link(&self) -> Result<&CoordinatorLink> {
        self.link.get().ok_or_else(|| PizzeriaError::NotAttached {
            name: self.name.clone(),
        })
    }

    /// Begin simulated work on `order`, reporting `completion` once done
    ///
    /// The payload is handed back to the coordinator exactly as received.
    /// Must be called from within a Tokio runtime; fails with `NoRuntime`
    /// otherwise.
    pub fn start_work(&self, order: OrderPayload, completion: EventKind) -> Result<()> {
        let link = self.link()?.clone();
        let runtime = Handle::try_current().map_err(|_| PizzeriaError::NoRuntime {
            name: self.name.clone(),
        })?;
        let started = PipelineEvent::WorkStarted {
            component: self.name.clone(),
            role: self.role,
            order: order.clone(),
        };
        info!("{}", started);
        link.emit(started);

        let name = self.name.clone();
        let delay = self.work_delay;
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(%name, %completion, item = %order.item, "Work finished");
            if let Err(e) = link.notify(&name, completion, order).await {
                warn!(%name, error = %e, "Could not report completion");
            }
        });
        Ok(())
    }
}

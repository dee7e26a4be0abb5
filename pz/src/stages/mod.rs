//! Stage components
//!
//! Each component plays one [`Role`] in the pipeline. It accepts the single
//! [`Directive`] matching its stage, does its simulated work off the
//! coordinator's critical path and reports completion back through its
//! [`CoordinatorLink`](crate::coordinator::CoordinatorLink).

mod billing;
mod core;
mod delivery;
mod kitchen;
mod order_taker;
mod oven;

pub use billing::Billing;
pub use self::core::StageCore;
pub use delivery::Delivery;
pub use kitchen::Kitchen;
pub use order_taker::OrderTaker;
pub use oven::Oven;

use crate::coordinator::CoordinatorLink;
use crate::domain::{Directive, Role};
use crate::error::{PizzeriaError, Result};

/// A participant registered with the coordinator
pub trait Component: Send + Sync + std::fmt::Debug {
    /// Registered name (unique per coordinator)
    fn name(&self) -> &str;

    /// Pipeline role this component fills
    fn role(&self) -> Role;

    /// Bind the coordinator back reference; allowed once
    fn attach(&self, link: CoordinatorLink) -> Result<()>;

    /// Start the work described by `directive`
    ///
    /// Returns immediately; completion is reported to the coordinator later.
    /// Work is spawned on the current Tokio runtime, so calling this outside
    /// one fails with `NoRuntime`.
    fn receive(&self, directive: Directive) -> Result<()>;
}

pub(crate) fn unsupported(component: &str, directive: &Directive) -> PizzeriaError {
    PizzeriaError::UnsupportedDirective {
        component: component.to_string(),
        directive: directive.name().to_string(),
    }
}

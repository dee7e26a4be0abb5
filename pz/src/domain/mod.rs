//! Domain types for the order pipeline
//!
//! Orders travel through five stages. Every hop is an [`Event`] whose
//! [`EventKind`] selects the next [`Directive`] and the [`Role`] that performs it.

mod event;
mod order;
mod priority;
mod role;

pub use event::{Directive, Event, EventKind, Route};
pub use order::OrderPayload;
pub use priority::Priority;
pub use role::Role;

//! Pizzeria - mediator-driven order pipeline
//!
//! A small restaurant workflow where five components (order taker, kitchen,
//! oven, billing, delivery) never talk to each other directly. Every report
//! goes to a single [`Coordinator`], which queues it, reorders urgent work to
//! the front and dispatches one event at a time to the next stage.
//!
//! # Modules
//!
//! - [`coordinator`] - Event queue, single-flight dispatcher and the mediator task
//! - [`stages`] - The five pipeline components
//! - [`domain`] - Orders, events, priorities and stage transitions
//! - [`events`] - Broadcast stream of pipeline activity
//! - [`pipeline`] - Bootstrap wiring all five components together
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod stages;

// Re-export commonly used types
pub use config::{Config, SimulationConfig};
pub use coordinator::{
    CoordRequest, Coordinator, CoordinatorConfig, CoordinatorHandle, CoordinatorLink, CoordinatorMetrics, Dispatcher,
    EventQueue,
};
pub use domain::{Directive, Event, EventKind, OrderPayload, Priority, Role, Route};
pub use error::{PizzeriaError, Result};
pub use events::{EventBus, PipelineEvent};
pub use pipeline::{Pizzeria, demo_orders, wait_for_completions, watch_until_complete};
pub use stages::{Billing, Component, Delivery, Kitchen, OrderTaker, Oven, StageCore};

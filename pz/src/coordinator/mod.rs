//! Coordinator (mediator) for the order pipeline
//!
//! Components never call each other. They notify the Coordinator, which
//! queues each event by priority and dispatches exactly one at a time:
//!
//! | incoming kind   | stage invoked | directive |
//! |-----------------|---------------|-----------|
//! | `order_placed`  | Kitchen       | prepare   |
//! | `kitchen_done`  | Oven          | bake      |
//! | `oven_done`     | Billing       | charge    |
//! | `payment_done`  | Delivery      | deliver   |
//! | `delivery_done` | (terminal)    | -         |

mod config;
mod core;
mod dispatch;
mod handle;
mod messages;
mod queue;
mod registry;

pub use config::CoordinatorConfig;
pub use self::core::Coordinator;
pub use dispatch::Dispatcher;
pub use handle::{CoordinatorHandle, CoordinatorLink};
pub use messages::{CoordRequest, CoordinatorMetrics};
pub use queue::EventQueue;

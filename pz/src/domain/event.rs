//! Events routed by the coordinator and the stage transitions they drive

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrderPayload, Priority, Role};

/// Kind of a routed event
///
/// The recognized kinds form a closed set; anything else arriving as a
/// string is kept as `Unrecognized` so the coordinator can log and drop it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    OrderPlaced,
    KitchenDone,
    OvenDone,
    PaymentDone,
    DeliveryDone,
    Unrecognized(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::OrderPlaced => "order_placed",
            Self::KitchenDone => "kitchen_done",
            Self::OvenDone => "oven_done",
            Self::PaymentDone => "payment_done",
            Self::DeliveryDone => "delivery_done",
            Self::Unrecognized(kind) => kind,
        }
    }

    /// Transition taken when an event of this kind is dequeued
    pub fn route(&self, order: &OrderPayload) -> Route {
        match self {
            Self::OrderPlaced => Route::Stage(Directive::Prepare(order.clone())),
            Self::KitchenDone => Route::Stage(Directive::Bake(order.clone())),
            Self::OvenDone => Route::Stage(Directive::Charge(order.clone())),
            Self::PaymentDone => Route::Stage(Directive::Deliver(order.clone())),
            Self::DeliveryDone => Route::Complete,
            Self::Unrecognized(_) => Route::Discard,
        }
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s {
            "order_placed" => Self::OrderPlaced,
            "kitchen_done" => Self::KitchenDone,
            "oven_done" => Self::OvenDone,
            "payment_done" => Self::PaymentDone,
            "delivery_done" => Self::DeliveryDone,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Work handed to a stage component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Prepare(OrderPayload),
    Bake(OrderPayload),
    Charge(OrderPayload),
    Deliver(OrderPayload),
}

impl Directive {
    /// Role able to perform this directive
    pub fn target(&self) -> Role {
        match self {
            Self::Prepare(_) => Role::Kitchen,
            Self::Bake(_) => Role::Oven,
            Self::Charge(_) => Role::Billing,
            Self::Deliver(_) => Role::Delivery,
        }
    }

    pub fn order(&self) -> &OrderPayload {
        match self {
            Self::Prepare(order) | Self::Bake(order) | Self::Charge(order) | Self::Deliver(order) => order,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Prepare(_) => "prepare",
            Self::Bake(_) => "bake",
            Self::Charge(_) => "charge",
            Self::Deliver(_) => "deliver",
        }
    }
}

/// Outcome of routing a dequeued event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Hand the directive to the stage that performs it
    Stage(Directive),
    /// Terminal: the order is done
    Complete,
    /// Unknown kind: log and drop
    Discard,
}

/// A notification queued inside the coordinator
#[derive(Debug, Clone)]
pub struct Event {
    pub id: Uuid,
    pub sender: String,
    pub kind: EventKind,
    pub payload: OrderPayload,
    pub priority: Priority,
}

impl Event {
    pub fn new(sender: impl Into<String>, kind: EventKind, payload: OrderPayload) -> Self {
        let priority = Priority::for_order(&payload);
        Self {
            id: Uuid::now_v7(),
            sender: sender.into(),
            kind,
            payload,
            priority,
        }
    }
}

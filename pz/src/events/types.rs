//! Pipeline event definitions

use serde::{Deserialize, Serialize};

use crate::domain::{EventKind, OrderPayload, Role};

/// Observable step of the order pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// The order taker accepted a new order
    OrderReceived { order: OrderPayload },

    /// The coordinator dequeued an event and is routing it to a stage
    Dispatched {
        kind: EventKind,
        target: Role,
        order: OrderPayload,
    },

    /// A stage component began its unit of work
    WorkStarted {
        component: String,
        role: Role,
        order: OrderPayload,
    },

    /// The last stage reported back; the order is done
    OrderCompleted { order: OrderPayload },

    /// An event of an unknown kind was dropped
    EventDiscarded { kind: String, sender: String },
}

impl PipelineEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::OrderReceived { .. } => "order_received",
            Self::Dispatched { .. } => "dispatched",
            Self::WorkStarted { .. } => "work_started",
            Self::OrderCompleted { .. } => "order_completed",
            Self::EventDiscarded { .. } => "event_discarded",
        }
    }

    pub fn order(&self) -> Option<&OrderPayload> {
        match self {
            Self::OrderReceived { order }
            | Self::Dispatched { order, .. }
            | Self::WorkStarted { order, .. }
            | Self::OrderCompleted { order } => Some(order),
            Self::EventDiscarded { .. } => None,
        }
    }
}

impl std::fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrderReceived { order } => {
                let flag = if order.urgent { " [urgent]" } else { "" };
                write!(f, "New order: {} (table {}){}", order.item, order.table_id, flag)
            }
            Self::Dispatched { kind, order, .. } => match kind {
                EventKind::OrderPlaced => write!(f, "Waiter took order: {} (table {})", order.item, order.table_id),
                EventKind::KitchenDone => write!(f, "Kitchen finished: {}", order.item),
                EventKind::OvenDone => write!(f, "Pizza baked: {}", order.item),
                EventKind::PaymentDone => write!(f, "Payment confirmed for table {}", order.table_id),
                other => write!(f, "Routing {}: {} (table {})", other, order.item, order.table_id),
            },
            Self::WorkStarted { component, role, order } => match role {
                Role::Kitchen => write!(f, "[{}] preparing {}...", component, order.item),
                Role::Oven => write!(f, "[{}] baking {}...", component, order.item),
                Role::Billing => write!(f, "[{}] charging table {}...", component, order.table_id),
                Role::Delivery => write!(f, "[{}] delivering {} to table {}...", component, order.item, order.table_id),
                Role::OrderTaker => write!(f, "[{}] taking {}...", component, order.item),
            },
            Self::OrderCompleted { order } => write!(f, "Order delivered: {} (table {})", order.item, order.table_id),
            Self::EventDiscarded { kind, sender } => write!(f, "Unknown event '{}' from {} discarded", kind, sender),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narration_mentions_item_and_table() {
        let order = OrderPayload::new("Pizza Calabresa", 1, false);

        let line = PipelineEvent::Dispatched {
            kind: EventKind::OrderPlaced,
            target: Role::Kitchen,
            order: order.clone(),
        }
        .to_string();
        assert_eq!(line, "Waiter took order: Pizza Calabresa (table 1)");

        let line = PipelineEvent::WorkStarted {
            component: "Delivery".to_string(),
            role: Role::Delivery,
            order: order.clone(),
        }
        .to_string();
        assert_eq!(line, "[Delivery] delivering Pizza Calabresa to table 1...");

        let line = PipelineEvent::OrderCompleted { order }.to_string();
        assert_eq!(line, "Order delivered: Pizza Calabresa (table 1)");
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = PipelineEvent::Dispatched {
            kind: EventKind::KitchenDone,
            target: Role::Oven,
            order: OrderPayload::new("Pizza X", 7, false),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "dispatched");
        assert_eq!(json["kind"], "kitchen_done");
        assert_eq!(json["target"], "oven");
        assert_eq!(json["order"]["table-id"], 7);
    }
}

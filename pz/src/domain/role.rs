//! Pipeline roles

use serde::{Deserialize, Serialize};

/// The five participants in the order pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    OrderTaker,
    Kitchen,
    Oven,
    Billing,
    Delivery,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::OrderTaker,
        Role::Kitchen,
        Role::Oven,
        Role::Billing,
        Role::Delivery,
    ];

    /// Name the bootstrap registers this role's component under
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::OrderTaker => "Waiter",
            Self::Kitchen => "Kitchen",
            Self::Oven => "Oven",
            Self::Billing => "Billing",
            Self::Delivery => "Delivery",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrderTaker => write!(f, "order-taker"),
            Self::Kitchen => write!(f, "kitchen"),
            Self::Oven => write!(f, "oven"),
            Self::Billing => write!(f, "billing"),
            Self::Delivery => write!(f, "delivery"),
        }
    }
}

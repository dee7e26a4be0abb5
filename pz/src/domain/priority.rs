//! Event priority

use serde::{Deserialize, Serialize};

use super::OrderPayload;

/// Dispatch priority of an event
///
/// Ranks follow the queue convention: 0 is serviced before 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    #[default]
    Normal,
}

impl Priority {
    /// Priority of any event carrying this order
    pub fn for_order(order: &OrderPayload) -> Self {
        if order.urgent { Self::Urgent } else { Self::Normal }
    }

    /// Numeric rank (0 = urgent, 1 = normal)
    pub fn as_rank(&self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::Normal => 1,
        }
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Self::Urgent)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Urgent => write!(f, "urgent"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "urgent" => Ok(Self::Urgent),
            "normal" => Ok(Self::Normal),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_order() {
        assert_eq!(Priority::for_order(&OrderPayload::new("a", 1, true)), Priority::Urgent);
        assert_eq!(Priority::for_order(&OrderPayload::new("a", 1, false)), Priority::Normal);
    }

    #[test]
    fn test_priority_rank() {
        assert_eq!(Priority::Urgent.as_rank(), 0);
        assert_eq!(Priority::Normal.as_rank(), 1);
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("URGENT".parse::<Priority>().unwrap(), Priority::Urgent);
        assert_eq!("normal".parse::<Priority>().unwrap(), Priority::Normal);
        assert!("1".parse::<Priority>().is_err());
        assert!("asap".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_serde() {
        let json = serde_json::to_string(&Priority::Urgent).unwrap();
        assert_eq!(json, "\"urgent\"");
    }
}

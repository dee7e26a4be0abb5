//! Order payload carried through every stage

use serde::{Deserialize, Serialize};

use super::Priority;

/// The order being fulfilled
///
/// Created once by the order taker and forwarded verbatim by every stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrderPayload {
    pub item: String,
    pub table_id: u32,
    #[serde(default)]
    pub urgent: bool,
}

impl OrderPayload {
    pub fn new(item: impl Into<String>, table_id: u32, urgent: bool) -> Self {
        Self {
            item: item.into(),
            table_id,
            urgent,
        }
    }
}

impl std::str::FromStr for OrderPayload {
    type Err = String;

    /// Parse `ITEM:TABLE` or `ITEM:TABLE:PRIORITY`
    ///
    /// Item names may contain ':'; only a trailing priority word is a flag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid order '{}': expected ITEM:TABLE[:urgent]", s);
        let (rest, last) = s.rsplit_once(':').ok_or_else(invalid)?;

        let (item, table, priority) = match last.trim().parse::<Priority>() {
            Ok(priority) => {
                let (item, table) = rest.rsplit_once(':').ok_or_else(invalid)?;
                (item, table, priority)
            }
            Err(_) => (rest, last, Priority::Normal),
        };

        let item = item.trim();
        if item.trim_matches(|c: char| c == ':' || c.is_whitespace()).is_empty() {
            return Err(format!("Invalid order '{}': item is empty", s));
        }
        let table_id = table
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid order '{}': table '{}' is not a number", s, table))?;

        Ok(Self::new(item, table_id, priority.is_urgent()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normal_order() {
        let order: OrderPayload = "Pizza Calabresa:1".parse().unwrap();
        assert_eq!(order, OrderPayload::new("Pizza Calabresa", 1, false));
    }

    #[test]
    fn test_parse_urgent_order() {
        let order: OrderPayload = "Pizza Marguerita:3:urgent".parse().unwrap();
        assert_eq!(order, OrderPayload::new("Pizza Marguerita", 3, true));

        let order: OrderPayload = "Pizza Marguerita:3:URGENT".parse().unwrap();
        assert!(order.urgent);
    }

    #[test]
    fn test_parse_item_with_colon() {
        let order: OrderPayload = "Combo: Large:4".parse().unwrap();
        assert_eq!(order.item, "Combo: Large");
        assert_eq!(order.table_id, 4);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("Pizza".parse::<OrderPayload>().is_err());
        assert!("Pizza:abc".parse::<OrderPayload>().is_err());
        assert!(":3".parse::<OrderPayload>().is_err());
        assert!("Pizza:3:later".parse::<OrderPayload>().is_err());
    }

    #[test]
    fn test_parse_rejects_item_of_only_separators() {
        assert!(" : :5".parse::<OrderPayload>().is_err());
        assert!("::5".parse::<OrderPayload>().is_err());
        assert!(" : :5:urgent".parse::<OrderPayload>().is_err());
    }

    #[test]
    fn test_parse_explicit_normal_priority() {
        let order: OrderPayload = " Pizza Y : 4 : normal".parse().unwrap();
        assert_eq!(order, OrderPayload::new("Pizza Y", 4, false));
    }

    #[test]
    fn test_payload_serde() {
        let order = OrderPayload::new("Pizza X", 7, true);
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("table-id"));

        let parsed: OrderPayload = serde_json::from_str(r#"{"item":"Pizza X","table-id":7}"#).unwrap();
        assert_eq!(parsed, OrderPayload::new("Pizza X", 7, false));
    }
}

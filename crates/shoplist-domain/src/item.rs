use serde::{Deserialize, Serialize};

pub type ItemId = String;

pub const DEFAULT_QUANTITY: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub purchased: bool,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    DEFAULT_QUANTITY
}

impl Item {
    /// A freshly added item, not yet purchased.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            purchased: false,
            quantity,
        }
    }

    pub fn set_purchased(&mut self, purchased: bool) {
        self.purchased = purchased;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_not_purchased() {
        let item = Item::new("i1", "Milk", DEFAULT_QUANTITY);
        assert!(!item.purchased);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_quantity_defaults_when_missing() {
        let item: Item =
            serde_json::from_str(r#"{"id":"i1","name":"Bread","purchased":true}"#).unwrap();
        assert_eq!(item.quantity, DEFAULT_QUANTITY);
        assert!(item.purchased);
    }
}

use super::Command;
use crate::{Item, ItemId, ShoppingList};
use shoplist_core::ShoplistResult;

/// Append an item the server just created, at the end of the list.
pub struct AppendItem {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: u32,
}

impl Command<ShoppingList> for AppendItem {
    fn execute(&self, list: &mut ShoppingList) -> ShoplistResult<()> {
        list.items
            .push(Item::new(self.item_id.clone(), self.name.clone(), self.quantity));
        Ok(())
    }

    fn description(&self) -> String {
        format!("Append item {} \"{}\" x{}", self.item_id, self.name, self.quantity)
    }
}

pub struct RemoveItem {
    pub item_id: ItemId,
}

impl Command<ShoppingList> for RemoveItem {
    fn execute(&self, list: &mut ShoppingList) -> ShoplistResult<()> {
        list.items.retain(|i| i.id != self.item_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Remove item {}", self.item_id)
    }
}

/// Assign (not flip) the purchased flag.
pub struct SetItemPurchased {
    pub item_id: ItemId,
    pub purchased: bool,
}

impl Command<ShoppingList> for SetItemPurchased {
    fn execute(&self, list: &mut ShoppingList) -> ShoplistResult<()> {
        if let Some(item) = list.item_mut(&self.item_id) {
            item.set_purchased(self.purchased);
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Set item {} purchased = {}", self.item_id, self.purchased)
    }
}

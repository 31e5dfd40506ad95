use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemId};
use crate::member::Member;

pub type ListId = String;

/// One entry of the collection view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: ListId,
    pub title: String,
    pub is_archived: bool,
}

impl ListSummary {
    pub fn new(id: impl Into<ListId>, title: impl Into<String>, is_archived: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_archived,
        }
    }
}

/// A list with its items and members, as shown by the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: ListId,
    pub title: String,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl ShoppingList {
    pub fn new(id: impl Into<ListId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_archived: false,
            items: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| &i.id == item_id)
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }

    pub fn purchased_count(&self) -> usize {
        self.items.iter().filter(|i| i.purchased).count()
    }
}

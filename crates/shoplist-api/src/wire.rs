//! JSON payloads exchanged with the shopping list service.
//!
//! Records use camelCase keys and Mongo-style `_id` fields; they are
//! converted into domain types at the edge.

use serde::{Deserialize, Serialize};
use shoplist_domain::member::placeholder_name;
use shoplist_domain::{Item, ListSummary, Member, ShoppingList, DEFAULT_QUANTITY};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListsResponse {
    #[serde(default)]
    pub shopping_lists: Vec<WireListSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireListSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_archived: bool,
}

impl From<WireListSummary> for ListSummary {
    fn from(wire: WireListSummary) -> Self {
        ListSummary::new(wire.id, wire.title, wire.is_archived)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListResponse {
    pub shopping_list: WireShoppingList,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireShoppingList {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub items: Vec<WireItem>,
    #[serde(default)]
    pub members: Vec<WireMember>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub purchased: bool,
    #[serde(default)]
    pub quantity: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMember {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<WireShoppingList> for ShoppingList {
    fn from(wire: WireShoppingList) -> Self {
        let items = wire
            .items
            .into_iter()
            .map(|i| Item {
                id: i.id,
                name: i.name,
                purchased: i.purchased,
                quantity: i.quantity.unwrap_or(DEFAULT_QUANTITY),
            })
            .collect();
        let members = wire
            .members
            .into_iter()
            .map(|m| {
                let name = m
                    .name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| placeholder_name(&m.user_id));
                Member::new(m.user_id, name)
            })
            .collect();
        ShoppingList {
            id: wire.id,
            title: wire.title,
            is_archived: wire.is_archived,
            items,
            members,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedListResponse {
    pub shopping_list_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedItemResponse {
    pub item_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListBody<'a> {
    pub title: &'a str,
    pub user_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveStatusBody<'a> {
    pub is_archived: bool,
    pub user_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItemBody<'a> {
    pub name: &'a str,
    pub quantity: u32,
    pub user_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatusBody<'a> {
    pub purchased: bool,
    pub user_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMemberBody<'a> {
    pub member_id: &'a str,
    pub user_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequesterBody<'a> {
    pub user_id: &'a str,
}

/// Pulls a readable message out of an error body.
///
/// Prefers a JSON `message` or `error` field and falls back to the raw body,
/// trimmed and capped.
pub fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return compact_text(text);
            }
        }
    }
    compact_text(body)
}

fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_response_maps_ids() {
        let body = r#"{"shoppingLists":[
            {"_id":"l1","title":"Groceries","isArchived":false},
            {"_id":"l2","title":"Hardware"}
        ]}"#;
        let parsed: ShoppingListsResponse = serde_json::from_str(body).unwrap();
        let lists: Vec<ListSummary> = parsed.shopping_lists.into_iter().map(Into::into).collect();

        assert_eq!(
            lists,
            vec![
                ListSummary::new("l1", "Groceries", false),
                ListSummary::new("l2", "Hardware", false),
            ]
        );
    }

    #[test]
    fn test_detail_response_fills_defaults() {
        let body = r#"{"shoppingList":{
            "_id":"L1","title":"Groceries",
            "items":[{"_id":"i1","name":"Milk","purchased":true},{"_id":"i2","name":"Eggs","quantity":6}],
            "members":[{"userId":"u1","name":"Alice"},{"userId":"u2"}]
        }}"#;
        let parsed: ShoppingListResponse = serde_json::from_str(body).unwrap();
        let list: ShoppingList = parsed.shopping_list.into();

        assert_eq!(list.id, "L1");
        assert!(!list.is_archived);
        assert_eq!(list.items[0].quantity, 1);
        assert!(list.items[0].purchased);
        assert_eq!(list.items[1].quantity, 6);
        assert!(!list.items[1].purchased);
        assert_eq!(list.members[0], Member::new("u1", "Alice"));
        assert_eq!(list.members[1], Member::new("u2", "User u2"));
    }

    #[test]
    fn test_request_bodies_are_camel_case() {
        let body = serde_json::to_value(ArchiveStatusBody {
            is_archived: true,
            user_id: "u1",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"isArchived": true, "userId": "u1"}));

        let body = serde_json::to_value(NewMemberBody {
            member_id: "u2",
            user_id: "u1",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"memberId": "u2", "userId": "u1"}));
    }

    #[test]
    fn test_error_message_prefers_json_field() {
        assert_eq!(error_message(r#"{"message":"Not a member"}"#), "Not a member");
        assert_eq!(error_message(r#"{"error":"Forbidden"}"#), "Forbidden");
        assert_eq!(error_message("  plain failure \n"), "plain failure");
        assert_eq!(error_message(&"x".repeat(500)).len(), 180);
    }
}

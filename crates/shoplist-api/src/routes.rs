use reqwest::Method;

/// Endpoints of the shopping list service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Lists,
    ArchivedLists,
    CreateList,
    List { list_id: &'a str },
    DeleteList { list_id: &'a str },
    ArchiveStatus { list_id: &'a str },
    CreateItem { list_id: &'a str },
    DeleteItem { list_id: &'a str, item_id: &'a str },
    ItemStatus { list_id: &'a str, item_id: &'a str },
    CreateMember { list_id: &'a str },
    DeleteMember { list_id: &'a str, member_id: &'a str },
    Leave { list_id: &'a str },
}

impl Route<'_> {
    pub fn method(&self) -> Method {
        match self {
            Self::Lists | Self::ArchivedLists | Self::List { .. } => Method::GET,
            Self::CreateList
            | Self::CreateItem { .. }
            | Self::CreateMember { .. }
            | Self::Leave { .. } => Method::POST,
            Self::ArchiveStatus { .. } | Self::ItemStatus { .. } => Method::PATCH,
            Self::DeleteList { .. } | Self::DeleteItem { .. } | Self::DeleteMember { .. } => {
                Method::DELETE
            }
        }
    }

    /// Path relative to the API base URL, with ids percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Self::Lists | Self::CreateList => "/shopping-lists".to_string(),
            Self::ArchivedLists => "/shopping-lists/archived".to_string(),
            Self::List { list_id } | Self::DeleteList { list_id } => {
                format!("/shopping-lists/{}", enc(list_id))
            }
            Self::ArchiveStatus { list_id } => {
                format!("/shopping-lists/{}/archive", enc(list_id))
            }
            Self::CreateItem { list_id } => format!("/shopping-lists/{}/items", enc(list_id)),
            Self::DeleteItem { list_id, item_id } | Self::ItemStatus { list_id, item_id } => {
                format!("/shopping-lists/{}/items/{}", enc(list_id), enc(item_id))
            }
            Self::CreateMember { list_id } => {
                format!("/shopping-lists/{}/members", enc(list_id))
            }
            Self::DeleteMember { list_id, member_id } => {
                format!("/shopping-lists/{}/members/{}", enc(list_id), enc(member_id))
            }
            Self::Leave { list_id } => format!("/shopping-lists/{}/leave", enc(list_id)),
        }
    }
}

fn enc(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_routes() {
        assert_eq!(Route::Lists.path(), "/shopping-lists");
        assert_eq!(Route::Lists.method(), Method::GET);
        assert_eq!(Route::ArchivedLists.path(), "/shopping-lists/archived");
        assert_eq!(Route::CreateList.method(), Method::POST);
    }

    #[test]
    fn test_nested_routes() {
        let route = Route::ItemStatus {
            list_id: "l1",
            item_id: "i9",
        };
        assert_eq!(route.path(), "/shopping-lists/l1/items/i9");
        assert_eq!(route.method(), Method::PATCH);

        let route = Route::DeleteMember {
            list_id: "l1",
            member_id: "u2",
        };
        assert_eq!(route.path(), "/shopping-lists/l1/members/u2");
        assert_eq!(route.method(), Method::DELETE);

        assert_eq!(Route::Leave { list_id: "l1" }.path(), "/shopping-lists/l1/leave");
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let route = Route::List {
            list_id: "a/b c",
        };
        assert_eq!(route.path(), "/shopping-lists/a%2Fb%20c");
    }
}

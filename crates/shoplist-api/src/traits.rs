use async_trait::async_trait;
use shoplist_core::ShoplistResult;
use shoplist_domain::{ItemId, ListId, ListSummary, ShoppingList};

/// The remote shopping list service.
///
/// Every call carries the id of the user it is made on behalf of. The
/// service is trusted and answers once per request; implementations do not
/// retry.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ShoppingApi: Send + Sync {
    /// Active lists visible to `user_id`
    async fn fetch_shopping_lists(&self, user_id: &str) -> ShoplistResult<Vec<ListSummary>>;

    /// Archived lists visible to `user_id`
    async fn fetch_archived_shopping_lists(
        &self,
        user_id: &str,
    ) -> ShoplistResult<Vec<ListSummary>>;

    /// Create a list and return the server-issued id
    async fn add_shopping_list(&self, title: &str, user_id: &str) -> ShoplistResult<ListId>;

    async fn delete_shopping_list(&self, list_id: &str, user_id: &str) -> ShoplistResult<()>;

    async fn toggle_archive_status(
        &self,
        list_id: &str,
        is_archived: bool,
        user_id: &str,
    ) -> ShoplistResult<()>;

    /// Full list with items and members
    async fn fetch_shopping_list(&self, list_id: &str, user_id: &str)
        -> ShoplistResult<ShoppingList>;

    /// Create an item and return the server-issued id
    async fn add_item(
        &self,
        list_id: &str,
        name: &str,
        quantity: u32,
        user_id: &str,
    ) -> ShoplistResult<ItemId>;

    async fn delete_item(&self, list_id: &str, item_id: &str, user_id: &str)
        -> ShoplistResult<()>;

    async fn toggle_item_status(
        &self,
        list_id: &str,
        item_id: &str,
        purchased: bool,
        user_id: &str,
    ) -> ShoplistResult<()>;

    async fn add_member(&self, list_id: &str, member_id: &str, user_id: &str)
        -> ShoplistResult<()>;

    async fn remove_member(
        &self,
        list_id: &str,
        member_id: &str,
        user_id: &str,
    ) -> ShoplistResult<()>;

    /// Remove `user_id` from the list's members
    async fn leave_list(&self, list_id: &str, user_id: &str) -> ShoplistResult<()>;
}

//! reqwest binding of [`ShoppingApi`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shoplist_core::config::normalize_base_url;
use shoplist_core::{AppConfig, ShoplistError, ShoplistResult};
use shoplist_domain::{ItemId, ListId, ListSummary, ShoppingList};
use std::time::Duration;

use crate::routes::Route;
use crate::traits::ShoppingApi;
use crate::wire::{
    error_message, ArchiveStatusBody, CreatedItemResponse, CreatedListResponse, ItemStatusBody,
    NewItemBody, NewListBody, NewMemberBody, RequesterBody, ShoppingListResponse,
    ShoppingListsResponse,
};

/// Header naming the user a request is made on behalf of.
pub const USER_ID_HEADER: &str = "user-id";

#[derive(Debug, Clone)]
pub struct HttpShoppingApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpShoppingApi {
    pub fn new(base_url: &str, timeout: Duration) -> ShoplistResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ShoplistError::Internal(format!("Failed to construct HTTP client: {e}")))?;
        Self::with_client(base_url, client)
    }

    /// Uses a caller-built client, e.g. one with custom proxy settings.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> ShoplistResult<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> ShoplistResult<Self> {
        Self::new(
            &config.effective_api_base_url()?,
            Duration::from_secs(config.effective_request_timeout_secs()),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &Route<'_>) -> String {
        format!("{}{}", self.base_url, route.path())
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        route: Route<'_>,
        user_id: &str,
        body: Option<&B>,
    ) -> ShoplistResult<reqwest::Response> {
        let method = route.method();
        let url = self.url(&route);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header(USER_ID_HEADER, user_id)
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ShoplistError::Connection(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShoplistError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        route: Route<'_>,
        user_id: &str,
    ) -> ShoplistResult<T> {
        let response = self.send::<()>(route, user_id, None).await?;
        decode(response).await
    }

    async fn submit<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        route: Route<'_>,
        user_id: &str,
        body: &B,
    ) -> ShoplistResult<T> {
        let response = self.send(route, user_id, Some(body)).await?;
        decode(response).await
    }

    /// Sends a request whose response body carries nothing but the ack.
    async fn acknowledge<B: Serialize + ?Sized>(
        &self,
        route: Route<'_>,
        user_id: &str,
        body: Option<&B>,
    ) -> ShoplistResult<()> {
        self.send(route, user_id, body).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ShoplistResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ShoplistError::Connection(format!("Failed to read response body: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| ShoplistError::Serialization(e.to_string()))
}

#[async_trait]
impl ShoppingApi for HttpShoppingApi {
    async fn fetch_shopping_lists(&self, user_id: &str) -> ShoplistResult<Vec<ListSummary>> {
        let response: ShoppingListsResponse = self.fetch(Route::Lists, user_id).await?;
        Ok(response.shopping_lists.into_iter().map(Into::into).collect())
    }

    async fn fetch_archived_shopping_lists(
        &self,
        user_id: &str,
    ) -> ShoplistResult<Vec<ListSummary>> {
        let response: ShoppingListsResponse = self.fetch(Route::ArchivedLists, user_id).await?;
        Ok(response.shopping_lists.into_iter().map(Into::into).collect())
    }

    async fn add_shopping_list(&self, title: &str, user_id: &str) -> ShoplistResult<ListId> {
        let response: CreatedListResponse = self
            .submit(Route::CreateList, user_id, &NewListBody { title, user_id })
            .await?;
        Ok(response.shopping_list_id)
    }

    async fn delete_shopping_list(&self, list_id: &str, user_id: &str) -> ShoplistResult<()> {
        self.acknowledge::<()>(Route::DeleteList { list_id }, user_id, None)
            .await
    }

    async fn toggle_archive_status(
        &self,
        list_id: &str,
        is_archived: bool,
        user_id: &str,
    ) -> ShoplistResult<()> {
        let body = ArchiveStatusBody {
            is_archived,
            user_id,
        };
        self.acknowledge(Route::ArchiveStatus { list_id }, user_id, Some(&body))
            .await
    }

    async fn fetch_shopping_list(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> ShoplistResult<ShoppingList> {
        let response: ShoppingListResponse = self.fetch(Route::List { list_id }, user_id).await?;
        Ok(response.shopping_list.into())
    }

    async fn add_item(
        &self,
        list_id: &str,
        name: &str,
        quantity: u32,
        user_id: &str,
    ) -> ShoplistResult<ItemId> {
        let body = NewItemBody {
            name,
            quantity,
            user_id,
        };
        let response: CreatedItemResponse = self
            .submit(Route::CreateItem { list_id }, user_id, &body)
            .await?;
        Ok(response.item_id)
    }

    async fn delete_item(&self, list_id: &str, item_id: &str, user_id: &str) -> ShoplistResult<()> {
        self.acknowledge::<()>(Route::DeleteItem { list_id, item_id }, user_id, None)
            .await
    }

    async fn toggle_item_status(
        &self,
        list_id: &str,
        item_id: &str,
        purchased: bool,
        user_id: &str,
    ) -> ShoplistResult<()> {
        let body = ItemStatusBody { purchased, user_id };
        self.acknowledge(Route::ItemStatus { list_id, item_id }, user_id, Some(&body))
            .await
    }

    async fn add_member(
        &self,
        list_id: &str,
        member_id: &str,
        user_id: &str,
    ) -> ShoplistResult<()> {
        let body = NewMemberBody { member_id, user_id };
        self.acknowledge(Route::CreateMember { list_id }, user_id, Some(&body))
            .await
    }

    async fn remove_member(
        &self,
        list_id: &str,
        member_id: &str,
        user_id: &str,
    ) -> ShoplistResult<()> {
        self.acknowledge::<()>(Route::DeleteMember { list_id, member_id }, user_id, None)
            .await
    }

    async fn leave_list(&self, list_id: &str, user_id: &str) -> ShoplistResult<()> {
        let body = RequesterBody { user_id };
        self.acknowledge(Route::Leave { list_id }, user_id, Some(&body))
            .await
    }
}

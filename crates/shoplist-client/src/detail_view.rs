//! One shopping list with its items and members.

use shoplist_api::ShoppingApi;
use shoplist_core::{LogEntry, Loggable, ShoplistError, ShoplistResult};
use shoplist_domain::commands::{
    AppendItem, AppendMember, Command, RemoveItem, RemoveMember, SetItemPurchased,
};
use shoplist_domain::{required_text, Item, Member, ShoppingList, User, DEFAULT_QUANTITY};
use std::sync::Arc;

use crate::navigation::NavigationTarget;
use crate::session::{SessionWatcher, UserSession};

pub const LEAVE_ACKNOWLEDGEMENT: &str = "You have left the shopping list.";
pub const LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailStatus {
    Gated,
    Loading,
    Ready,
    /// The active user left the list; this view has nothing more to show.
    Left,
}

pub struct ListDetailView {
    api: Arc<dyn ShoppingApi>,
    session: Arc<UserSession>,
    watcher: SessionWatcher,
    target: NavigationTarget,
    list: Option<ShoppingList>,
    loaded_generation: Option<u64>,
    left: bool,
    deltas: Vec<String>,
    logs: Vec<LogEntry>,
}

impl ListDetailView {
    pub fn new(
        api: Arc<dyn ShoppingApi>,
        session: Arc<UserSession>,
        target: NavigationTarget,
    ) -> Self {
        let watcher = session.subscribe();
        Self {
            api,
            session,
            watcher,
            target,
            list: None,
            loaded_generation: None,
            left: false,
            deltas: Vec::new(),
            logs: Vec::new(),
        }
    }

    pub fn status(&self) -> DetailStatus {
        if self.left {
            DetailStatus::Left
        } else if self.session.current_user().is_none() {
            DetailStatus::Gated
        } else if self.is_current() {
            DetailStatus::Ready
        } else {
            DetailStatus::Loading
        }
    }

    pub fn target(&self) -> &NavigationTarget {
        &self.target
    }

    pub fn list(&self) -> Option<&ShoppingList> {
        self.list.as_ref()
    }

    pub fn items(&self) -> &[Item] {
        self.list.as_ref().map(|l| l.items.as_slice()).unwrap_or(&[])
    }

    pub fn members(&self) -> &[Member] {
        self.list.as_ref().map(|l| l.members.as_slice()).unwrap_or(&[])
    }

    /// The fetched title, or the navigation hint while loading.
    pub fn title(&self) -> Option<&str> {
        self.list
            .as_ref()
            .map(|l| l.title.as_str())
            .or(self.target.title.as_deref())
    }

    pub fn confirmed_deltas(&self) -> &[String] {
        &self.deltas
    }

    fn is_current(&self) -> bool {
        self.list.is_some() && self.loaded_generation == Some(self.watcher.generation())
    }

    /// Fetches the list unless it is already loaded for the active user.
    pub async fn refresh(&mut self) -> ShoplistResult<()> {
        if self.left {
            return Err(ShoplistError::NoListLoaded);
        }
        let Some(user) = self.session.current_user() else {
            self.list = None;
            self.loaded_generation = None;
            return Ok(());
        };
        if self.is_current() && !self.watcher.has_changed() {
            return Ok(());
        }
        self.reload(&user).await
    }

    async fn reload(&mut self, user: &User) -> ShoplistResult<()> {
        if self.loaded_generation != Some(self.watcher.generation()) {
            self.list = None;
            self.deltas.clear();
        }
        let generation = self.watcher.mark_seen();
        tracing::debug!("Loading list {} for {}", self.target.list_id, user.id);

        match self
            .api
            .fetch_shopping_list(&self.target.list_id, &user.id)
            .await
        {
            Ok(list) => {
                if self.watcher.generation() != generation {
                    return Err(self.discard_stale("load list"));
                }
                self.list = Some(list);
                self.deltas.clear();
                self.loaded_generation = Some(generation);
                Ok(())
            }
            Err(e) => Err(self.reject("fetch shopping list", e)),
        }
    }

    pub async fn add_item_default(&mut self, name: &str) -> ShoplistResult<Item> {
        self.add_item(name, DEFAULT_QUANTITY).await
    }

    /// Adds `quantity` of `name` (trimmed, non-empty) at the end of the list.
    pub async fn add_item(&mut self, name: &str, quantity: u32) -> ShoplistResult<Item> {
        let name = self.validate("Item name", name)?;
        if quantity == 0 {
            let err = ShoplistError::Validation("Quantity must be at least 1".to_string());
            return Err(self.reject("validate input", err));
        }
        let user = self.prepare().await?;
        let generation = self.watcher.generation();

        match self
            .api
            .add_item(&self.target.list_id, &name, quantity, &user.id)
            .await
        {
            Ok(item_id) => {
                let item = Item::new(item_id.clone(), name.clone(), quantity);
                self.confirm(
                    generation,
                    AppendItem {
                        item_id,
                        name,
                        quantity,
                    },
                )?;
                Ok(item)
            }
            Err(e) => Err(self.reject("add item", e)),
        }
    }

    pub async fn delete_item(&mut self, item_id: &str) -> ShoplistResult<()> {
        let user = self.prepare().await?;
        let generation = self.watcher.generation();

        match self
            .api
            .delete_item(&self.target.list_id, item_id, &user.id)
            .await
        {
            Ok(()) => self.confirm(
                generation,
                RemoveItem {
                    item_id: item_id.to_string(),
                },
            ),
            Err(e) => Err(self.reject("delete item", e)),
        }
    }

    /// Sets the purchased flag to `purchased`. Repeating the call with the
    /// same value leaves the item as it is.
    pub async fn toggle_item(&mut self, item_id: &str, purchased: bool) -> ShoplistResult<()> {
        let user = self.prepare().await?;
        let generation = self.watcher.generation();

        match self
            .api
            .toggle_item_status(&self.target.list_id, item_id, purchased, &user.id)
            .await
        {
            Ok(()) => self.confirm(
                generation,
                SetItemPurchased {
                    item_id: item_id.to_string(),
                    purchased,
                },
            ),
            Err(e) => Err(self.reject("toggle item status", e)),
        }
    }

    /// Grants `member_id` access to the list.
    ///
    /// The server does not echo a display name, so the local record is
    /// named from the roster or with a `User <id>` placeholder.
    pub async fn add_member(&mut self, member_id: &str) -> ShoplistResult<Member> {
        let member_id = self.validate("Member ID", member_id)?;
        let user = self.prepare().await?;
        let generation = self.watcher.generation();

        match self
            .api
            .add_member(&self.target.list_id, &member_id, &user.id)
            .await
        {
            Ok(()) => {
                let member = Member::synthesized(&member_id, self.session.roster());
                self.confirm(
                    generation,
                    AppendMember {
                        member: member.clone(),
                    },
                )?;
                Ok(member)
            }
            Err(e) => Err(self.reject("add member", e)),
        }
    }

    pub async fn remove_member(&mut self, member_id: &str) -> ShoplistResult<()> {
        let member_id = self.validate("Member ID", member_id)?;
        let user = self.prepare().await?;
        let generation = self.watcher.generation();

        match self
            .api
            .remove_member(&self.target.list_id, &member_id, &user.id)
            .await
        {
            Ok(()) => self.confirm(generation, RemoveMember { user_id: member_id }),
            Err(e) => Err(self.reject("remove member", e)),
        }
    }

    /// Removes the active user from the list.
    ///
    /// On success local state is dropped for good: the view reports
    /// [`DetailStatus::Left`] and rejects every later call.
    pub async fn leave_list(&mut self) -> ShoplistResult<&'static str> {
        let user = self.prepare().await?;

        match self.api.leave_list(&self.target.list_id, &user.id).await {
            Ok(()) => {
                tracing::info!("{} left list {}", user.id, self.target.list_id);
                self.list = None;
                self.loaded_generation = None;
                self.deltas.clear();
                self.left = true;
                Ok(LEAVE_ACKNOWLEDGEMENT)
            }
            Err(e) => Err(self.reject("leave the list", e)),
        }
    }

    async fn prepare(&mut self) -> ShoplistResult<User> {
        if self.left {
            return Err(self.reject("use list", ShoplistError::NoListLoaded));
        }
        let Some(user) = self.session.current_user() else {
            return Err(self.reject("resolve active user", ShoplistError::NoActiveUser));
        };
        self.refresh().await?;
        Ok(user)
    }

    fn validate(&mut self, field: &str, input: &str) -> ShoplistResult<String> {
        required_text(field, input).map_err(|e| self.reject("validate input", e))
    }

    fn confirm<C: Command<ShoppingList>>(
        &mut self,
        generation: u64,
        command: C,
    ) -> ShoplistResult<()> {
        if self.watcher.generation() != generation {
            return Err(self.discard_stale(&command.description()));
        }
        let Some(list) = self.list.as_mut() else {
            return Err(ShoplistError::NoListLoaded);
        };
        let description = command.description();
        tracing::debug!("Applying: {}", description);
        command.execute(list)?;
        self.deltas.push(description);
        Ok(())
    }

    fn discard_stale(&mut self, what: &str) -> ShoplistError {
        self.list = None;
        self.loaded_generation = None;
        self.deltas.clear();
        self.reject(what, ShoplistError::StaleView)
    }

    fn reject(&mut self, operation: &str, error: ShoplistError) -> ShoplistError {
        tracing::warn!("Failed to {}: {}", operation, error);
        self.add_log(format!("Failed to {operation}: {error}"));
        error
    }
}

impl Loggable for ListDetailView {
    fn add_log(&mut self, message: String) {
        self.logs.push(LogEntry::new(message));
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.logs
    }
}

//! In-memory stand-in for the shopping list service.

use async_trait::async_trait;
use shoplist_api::ShoppingApi;
use shoplist_core::{ShoplistError, ShoplistResult};
use shoplist_domain::{Item, ItemId, ListId, ListSummary, Member, ShoppingList};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type Hook = Box<dyn Fn() + Send + Sync>;

struct StoredList {
    id: ListId,
    title: String,
    is_archived: bool,
    owner: String,
    items: Vec<Item>,
    members: Vec<String>,
}

impl StoredList {
    fn visible_to(&self, user_id: &str) -> bool {
        self.owner == user_id || self.members.iter().any(|m| m == user_id)
    }
}

#[derive(Default)]
struct State {
    lists: Vec<StoredList>,
    next_id: usize,
    fail_next: Option<ShoplistError>,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
    calls: AtomicUsize,
    before_reply: Mutex<Option<Hook>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of requests served so far, successful or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes the next request fail with `error`.
    pub fn fail_next(&self, error: ShoplistError) {
        self.state.lock().unwrap().fail_next = Some(error);
    }

    /// Runs `hook` while a request is in flight, before it replies.
    pub fn before_reply(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self.before_reply.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn seed_list(&self, id: &str, title: &str, owner: &str) {
        let mut state = self.state.lock().unwrap();
        state.lists.push(StoredList {
            id: id.to_string(),
            title: title.to_string(),
            is_archived: false,
            owner: owner.to_string(),
            items: Vec::new(),
            members: Vec::new(),
        });
    }

    fn begin(&self) -> ShoplistResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let hook = self.before_reply.lock().unwrap().take();
        if let Some(hook) = hook {
            hook();
        }
        match self.state.lock().unwrap().fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn next_id(state: &mut State, prefix: &str) -> String {
        state.next_id += 1;
        format!("{prefix}-{}", state.next_id)
    }

    fn with_list<T>(
        &self,
        list_id: &str,
        user_id: &str,
        f: impl FnOnce(&mut StoredList, &mut usize) -> T,
    ) -> ShoplistResult<T> {
        let mut state = self.state.lock().unwrap();
        let State { lists, next_id, .. } = &mut *state;
        let list = lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| ShoplistError::Api {
                status: 404,
                message: "Shopping list not found".to_string(),
            })?;
        if !list.visible_to(user_id) {
            return Err(ShoplistError::Api {
                status: 403,
                message: "Access denied".to_string(),
            });
        }
        Ok(f(list, next_id))
    }

    fn summaries(&self, user_id: &str, archived: bool) -> Vec<ListSummary> {
        self.state
            .lock()
            .unwrap()
            .lists
            .iter()
            .filter(|l| l.is_archived == archived && l.visible_to(user_id))
            .map(|l| ListSummary::new(l.id.clone(), l.title.clone(), l.is_archived))
            .collect()
    }
}

#[async_trait]
impl ShoppingApi for FakeBackend {
    async fn fetch_shopping_lists(&self, user_id: &str) -> ShoplistResult<Vec<ListSummary>> {
        self.begin()?;
        Ok(self.summaries(user_id, false))
    }

    async fn fetch_archived_shopping_lists(
        &self,
        user_id: &str,
    ) -> ShoplistResult<Vec<ListSummary>> {
        self.begin()?;
        Ok(self.summaries(user_id, true))
    }

    async fn add_shopping_list(&self, title: &str, user_id: &str) -> ShoplistResult<ListId> {
        self.begin()?;
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state, "list");
        state.lists.push(StoredList {
            id: id.clone(),
            title: title.to_string(),
            is_archived: false,
            owner: user_id.to_string(),
            items: Vec::new(),
            members: Vec::new(),
        });
        Ok(id)
    }

    async fn delete_shopping_list(&self, list_id: &str, user_id: &str) -> ShoplistResult<()> {
        self.begin()?;
        self.with_list(list_id, user_id, |_, _| ())?;
        self.state.lock().unwrap().lists.retain(|l| l.id != list_id);
        Ok(())
    }

    async fn toggle_archive_status(
        &self,
        list_id: &str,
        is_archived: bool,
        user_id: &str,
    ) -> ShoplistResult<()> {
        self.begin()?;
        self.with_list(list_id, user_id, |list, _| list.is_archived = is_archived)
    }

    async fn fetch_shopping_list(
        &self,
        list_id: &str,
        user_id: &str,
    ) -> ShoplistResult<ShoppingList> {
        self.begin()?;
        self.with_list(list_id, user_id, |list, _| ShoppingList {
            id: list.id.clone(),
            title: list.title.clone(),
            is_archived: list.is_archived,
            items: list.items.clone(),
            members: list
                .members
                .iter()
                .map(|m| Member::new(m.clone(), format!("User {m}")))
                .collect(),
        })
    }

    async fn add_item(
        &self,
        list_id: &str,
        name: &str,
        quantity: u32,
        user_id: &str,
    ) -> ShoplistResult<ItemId> {
        self.begin()?;
        self.with_list(list_id, user_id, |list, next_id| {
            *next_id += 1;
            let id = format!("item-{next_id}");
            list.items.push(Item::new(id.clone(), name, quantity));
            id
        })
    }

    async fn delete_item(&self, list_id: &str, item_id: &str, user_id: &str) -> ShoplistResult<()> {
        self.begin()?;
        self.with_list(list_id, user_id, |list, _| {
            list.items.retain(|i| i.id != item_id)
        })
    }

    async fn toggle_item_status(
        &self,
        list_id: &str,
        item_id: &str,
        purchased: bool,
        user_id: &str,
    ) -> ShoplistResult<()> {
        self.begin()?;
        self.with_list(list_id, user_id, |list, _| {
            if let Some(item) = list.items.iter_mut().find(|i| i.id == item_id) {
                item.purchased = purchased;
            }
        })
    }

    async fn add_member(
        &self,
        list_id: &str,
        member_id: &str,
        user_id: &str,
    ) -> ShoplistResult<()> {
        self.begin()?;
        self.with_list(list_id, user_id, |list, _| {
            if !list.members.iter().any(|m| m == member_id) {
                list.members.push(member_id.to_string());
            }
        })
    }

    async fn remove_member(
        &self,
        list_id: &str,
        member_id: &str,
        user_id: &str,
    ) -> ShoplistResult<()> {
        self.begin()?;
        self.with_list(list_id, user_id, |list, _| {
            list.members.retain(|m| m != member_id)
        })
    }

    async fn leave_list(&self, list_id: &str, user_id: &str) -> ShoplistResult<()> {
        self.begin()?;
        self.with_list(list_id, user_id, |list, _| {
            list.members.retain(|m| m != user_id)
        })
    }
}

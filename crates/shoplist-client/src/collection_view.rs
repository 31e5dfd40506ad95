//! The current user's shopping lists, active or archived.
//!
//! Local state is replaced wholesale by a fetch and afterwards changes only
//! through [`Command`]s applied after the server confirmed the matching
//! mutation. A fetch happens on first use and whenever the active user or the
//! view mode changed; a mutation never triggers one.

use shoplist_api::ShoppingApi;
use shoplist_core::{LogEntry, Loggable, ShoplistError, ShoplistResult};
use shoplist_domain::commands::{AppendList, Command, RemoveList, SetListArchived};
use shoplist_domain::{required_text, ListId, ListSummary, User, ViewMode};
use std::sync::Arc;

use crate::navigation::NavigationTarget;
use crate::session::{SessionWatcher, UserSession};

pub const GATED_MESSAGE: &str = "Please select a user to view shopping lists.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionStatus {
    /// No active user; nothing is fetched or mutated.
    Gated,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoadKey {
    generation: u64,
    mode: ViewMode,
}

pub struct ListCollectionView {
    api: Arc<dyn ShoppingApi>,
    session: Arc<UserSession>,
    watcher: SessionWatcher,
    mode: ViewMode,
    lists: Vec<ListSummary>,
    pending_deletion: Option<ListSummary>,
    loaded: Option<LoadKey>,
    deltas: Vec<String>,
    logs: Vec<LogEntry>,
}

impl ListCollectionView {
    pub fn new(api: Arc<dyn ShoppingApi>, session: Arc<UserSession>) -> Self {
        let watcher = session.subscribe();
        Self {
            api,
            session,
            watcher,
            mode: ViewMode::Active,
            lists: Vec::new(),
            pending_deletion: None,
            loaded: None,
            deltas: Vec::new(),
            logs: Vec::new(),
        }
    }

    pub fn status(&self) -> CollectionStatus {
        if self.session.current_user().is_none() {
            CollectionStatus::Gated
        } else if self.is_current() {
            CollectionStatus::Ready
        } else {
            CollectionStatus::Loading
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn lists(&self) -> &[ListSummary] {
        &self.lists
    }

    pub fn pending_deletion(&self) -> Option<&ListSummary> {
        self.pending_deletion.as_ref()
    }

    /// Descriptions of the deltas applied since the last full fetch.
    pub fn confirmed_deltas(&self) -> &[String] {
        &self.deltas
    }

    /// Switches between active and archived lists. Takes effect on the next
    /// refresh; entries already shown are kept until then.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            tracing::debug!("Collection view mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.pending_deletion = None;
        }
    }

    fn current_key(&self) -> LoadKey {
        LoadKey {
            generation: self.watcher.generation(),
            mode: self.mode,
        }
    }

    fn is_current(&self) -> bool {
        self.loaded == Some(self.current_key())
    }

    /// Fetches the lists for the active user and mode unless they are
    /// already loaded. Does nothing while the view is gated.
    pub async fn refresh(&mut self) -> ShoplistResult<()> {
        let Some(user) = self.session.current_user() else {
            self.clear();
            return Ok(());
        };
        if self.is_current() && !self.watcher.has_changed() {
            return Ok(());
        }
        self.reload(&user).await
    }

    /// Fetches unconditionally, replacing local state wholesale.
    pub async fn reload_now(&mut self) -> ShoplistResult<()> {
        let user = self.require_user()?;
        self.reload(&user).await
    }

    async fn reload(&mut self, user: &User) -> ShoplistResult<()> {
        if self.loaded.map(|k| k.generation) != Some(self.watcher.generation()) {
            self.clear();
        }
        let generation = self.watcher.mark_seen();
        let mode = self.mode;
        tracing::debug!("Loading {:?} lists for {}", mode, user.id);

        let fetched = match mode {
            ViewMode::Active => self.api.fetch_shopping_lists(&user.id).await,
            ViewMode::Archived => self.api.fetch_archived_shopping_lists(&user.id).await,
        };
        match fetched {
            Ok(lists) => {
                if self.watcher.generation() != generation {
                    return Err(self.discard_stale("load lists"));
                }
                self.lists = lists;
                self.deltas.clear();
                self.loaded = Some(LoadKey { generation, mode });
                Ok(())
            }
            Err(e) => Err(self.reject("fetch shopping lists", e)),
        }
    }

    /// Creates a list titled `title` (trimmed, non-empty) and appends it.
    pub async fn create_list(&mut self, title: &str) -> ShoplistResult<ListSummary> {
        let title = self.validate("Title", title)?;
        let user = self.prepare().await?;
        let generation = self.watcher.generation();

        match self.api.add_shopping_list(&title, &user.id).await {
            Ok(list_id) => {
                tracing::info!("Created list {} \"{}\"", list_id, title);
                let created = ListSummary::new(list_id.clone(), title.clone(), false);
                self.confirm(generation, AppendList { list_id, title })?;
                Ok(created)
            }
            Err(e) => Err(self.reject("add shopping list", e)),
        }
    }

    /// Marks an entry as awaiting deletion confirmation.
    ///
    /// Archived mode offers no deletion, so selection is refused there.
    pub fn select_for_deletion(&mut self, list_id: &str) -> ShoplistResult<&ListSummary> {
        if !self.mode.allows_deletion() {
            let err =
                ShoplistError::Validation("Archived lists cannot be deleted".to_string());
            return Err(self.reject("select list for deletion", err));
        }
        let Some(list) = self.lists.iter().find(|l| l.id == list_id).cloned() else {
            let err = ShoplistError::NotFound(format!("List {list_id}"));
            return Err(self.reject("select list for deletion", err));
        };
        Ok(self.pending_deletion.insert(list))
    }

    pub fn cancel_deletion(&mut self) {
        self.pending_deletion = None;
    }

    /// Deletes the entry selected for deletion.
    ///
    /// The selection is cleared only when the server confirms; after a failure
    /// it stays pending so the user can confirm again or cancel. Without a
    /// selection this is a no-op returning `Ok(None)`. A selection made under
    /// a different active user is dropped by the reload and never sent.
    pub async fn confirm_deletion(&mut self) -> ShoplistResult<Option<ListId>> {
        if self.pending_deletion.is_none() {
            return Ok(None);
        }
        let user = self.prepare().await?;
        let Some(pending) = self.pending_deletion.clone() else {
            tracing::debug!("Deletion selection dropped by identity change");
            return Ok(None);
        };
        let generation = self.watcher.generation();

        match self.api.delete_shopping_list(&pending.id, &user.id).await {
            Ok(()) => {
                tracing::info!("Deleted list {}", pending.id);
                self.confirm(
                    generation,
                    RemoveList {
                        list_id: pending.id.clone(),
                    },
                )?;
                self.pending_deletion = None;
                Ok(Some(pending.id))
            }
            Err(e) => Err(self.reject("delete shopping list", e)),
        }
    }

    /// Selects `list_id` and confirms its deletion in one step.
    pub async fn delete_list(&mut self, list_id: &str) -> ShoplistResult<()> {
        self.prepare().await?;
        self.select_for_deletion(list_id)?;
        self.confirm_deletion().await?;
        Ok(())
    }

    /// Sets the archive flag of `list_id` to `is_archived`.
    ///
    /// The entry stays in the current view even when it no longer matches
    /// the mode; it moves only on the next full reload.
    pub async fn toggle_archive(&mut self, list_id: &str, is_archived: bool) -> ShoplistResult<()> {
        let user = self.prepare().await?;
        let generation = self.watcher.generation();

        match self
            .api
            .toggle_archive_status(list_id, is_archived, &user.id)
            .await
        {
            Ok(()) => {
                tracing::info!("List {} archived = {}", list_id, is_archived);
                self.confirm(
                    generation,
                    SetListArchived {
                        list_id: list_id.to_string(),
                        is_archived,
                    },
                )
            }
            Err(e) => Err(self.reject("toggle archive status", e)),
        }
    }

    /// Link to the detail view of a listed entry.
    pub fn navigate(&self, list_id: &str) -> ShoplistResult<NavigationTarget> {
        self.lists
            .iter()
            .find(|l| l.id == list_id)
            .map(NavigationTarget::from)
            .ok_or_else(|| ShoplistError::NotFound(format!("List {list_id}")))
    }

    fn require_user(&mut self) -> ShoplistResult<User> {
        match self.session.current_user() {
            Some(user) => Ok(user),
            None => Err(self.reject("resolve active user", ShoplistError::NoActiveUser)),
        }
    }

    /// Resolves the user and makes sure local state belongs to them.
    async fn prepare(&mut self) -> ShoplistResult<User> {
        let user = self.require_user()?;
        self.refresh().await?;
        Ok(user)
    }

    fn validate(&mut self, field: &str, input: &str) -> ShoplistResult<String> {
        required_text(field, input).map_err(|e| self.reject("validate input", e))
    }

    fn confirm<C: Command<Vec<ListSummary>>>(
        &mut self,
        generation: u64,
        command: C,
    ) -> ShoplistResult<()> {
        if self.watcher.generation() != generation {
            return Err(self.discard_stale(&command.description()));
        }
        let description = command.description();
        tracing::debug!("Applying: {}", description);
        command.execute(&mut self.lists)?;
        self.deltas.push(description);
        Ok(())
    }

    /// Drops everything loaded for the previous identity, including a
    /// pending deletion.
    fn discard_stale(&mut self, what: &str) -> ShoplistError {
        self.clear();
        self.reject(what, ShoplistError::StaleView)
    }

    fn reject(&mut self, operation: &str, error: ShoplistError) -> ShoplistError {
        tracing::warn!("Failed to {}: {}", operation, error);
        self.add_log(format!("Failed to {operation}: {error}"));
        error
    }

    fn clear(&mut self) {
        self.lists.clear();
        self.deltas.clear();
        self.pending_deletion = None;
        self.loaded = None;
    }
}

impl Loggable for ListCollectionView {
    fn add_log(&mut self, message: String) {
        self.logs.push(LogEntry::new(message));
    }

    fn get_logs(&self) -> &[LogEntry] {
        &self.logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use shoplist_api::MockShoppingApi;
    use shoplist_domain::Roster;

    fn session() -> Arc<UserSession> {
        Arc::new(UserSession::new(Roster::new(vec![
            User::new("U1", "Alice"),
            User::new("U2", "Bob"),
        ])))
    }

    fn view(mock: MockShoppingApi) -> ListCollectionView {
        ListCollectionView::new(Arc::new(mock), session())
    }

    #[tokio::test]
    async fn test_gated_without_user() {
        // No expectations: any API call would panic.
        let session = Arc::new(UserSession::uninitialized(Roster::default()));
        let mut view = ListCollectionView::new(Arc::new(MockShoppingApi::new()), session);

        view.refresh().await.unwrap();
        assert_eq!(view.status(), CollectionStatus::Gated);
        assert!(matches!(
            view.create_list("Groceries").await,
            Err(ShoplistError::NoActiveUser)
        ));
        assert!(matches!(
            view.toggle_archive("l1", true).await,
            Err(ShoplistError::NoActiveUser)
        ));
    }

    #[tokio::test]
    async fn test_blank_title_makes_no_request() {
        let mut view = view(MockShoppingApi::new());

        for title in ["", "   ", "\t\n"] {
            assert!(matches!(
                view.create_list(title).await,
                Err(ShoplistError::Validation(_))
            ));
        }
        assert!(view.lists().is_empty());
        assert_eq!(view.get_logs().len(), 3);
    }

    #[tokio::test]
    async fn test_refresh_fetches_once_per_key() {
        let mut mock = MockShoppingApi::new();
        mock.expect_fetch_shopping_lists()
            .with(eq("U1"))
            .times(1)
            .returning(|_| Ok(vec![ListSummary::new("l1", "Groceries", false)]));
        mock.expect_fetch_archived_shopping_lists()
            .with(eq("U1"))
            .times(1)
            .returning(|_| Ok(vec![]));
        let mut view = view(mock);

        view.refresh().await.unwrap();
        view.refresh().await.unwrap();
        assert_eq!(view.status(), CollectionStatus::Ready);
        assert_eq!(view.lists().len(), 1);

        view.set_mode(ViewMode::Archived);
        assert_eq!(view.status(), CollectionStatus::Loading);
        view.refresh().await.unwrap();
        assert!(view.lists().is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_leaves_state_unchanged() {
        let mut mock = MockShoppingApi::new();
        mock.expect_fetch_shopping_lists()
            .times(1)
            .returning(|_| Ok(vec![ListSummary::new("l1", "Groceries", false)]));
        mock.expect_add_shopping_list().times(1).returning(|_, _| {
            Err(ShoplistError::Api {
                status: 500,
                message: "down".to_string(),
            })
        });
        let mut view = view(mock);

        let result = view.create_list("Party").await;
        assert!(matches!(result, Err(ShoplistError::Api { status: 500, .. })));
        assert_eq!(view.lists(), &[ListSummary::new("l1", "Groceries", false)]);
        assert!(view.confirmed_deltas().is_empty());
        assert_eq!(view.get_logs().len(), 1);
    }

    #[tokio::test]
    async fn test_create_appends_trimmed_title_with_server_id() {
        let mut mock = MockShoppingApi::new();
        mock.expect_fetch_shopping_lists()
            .times(1)
            .returning(|_| Ok(vec![]));
        mock.expect_add_shopping_list()
            .with(eq("Groceries"), eq("U1"))
            .times(1)
            .returning(|_, _| Ok("srv-1".to_string()));
        let mut view = view(mock);

        let created = view.create_list("  Groceries  ").await.unwrap();
        assert_eq!(created, ListSummary::new("srv-1", "Groceries", false));
        assert_eq!(view.lists(), &[created]);
        assert_eq!(view.confirmed_deltas().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_selection() {
        let mut mock = MockShoppingApi::new();
        mock.expect_fetch_shopping_lists()
            .times(1)
            .returning(|_| Ok(vec![ListSummary::new("l1", "Groceries", false)]));
        mock.expect_delete_shopping_list()
            .with(eq("l1"), eq("U1"))
            .times(1)
            .returning(|_, _| Err(ShoplistError::Connection("refused".to_string())));
        let mut view = view(mock);
        view.refresh().await.unwrap();

        view.select_for_deletion("l1").unwrap();
        assert!(view.confirm_deletion().await.is_err());
        assert_eq!(view.pending_deletion().unwrap().id, "l1");
        assert_eq!(view.lists().len(), 1);

        view.cancel_deletion();
        assert!(view.pending_deletion().is_none());
        assert_eq!(view.confirm_deletion().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_archived_mode_refuses_deletion() {
        let mut mock = MockShoppingApi::new();
        mock.expect_fetch_archived_shopping_lists()
            .times(1)
            .returning(|_| Ok(vec![ListSummary::new("l1", "Old", true)]));
        let mut view = view(mock);
        view.set_mode(ViewMode::Archived);
        view.refresh().await.unwrap();

        assert!(matches!(
            view.select_for_deletion("l1"),
            Err(ShoplistError::Validation(_))
        ));
        assert!(view.delete_list("l1").await.is_err());
        assert_eq!(view.lists().len(), 1);
    }

    #[tokio::test]
    async fn test_switching_user_forces_reload() {
        let mut mock = MockShoppingApi::new();
        mock.expect_fetch_shopping_lists()
            .with(eq("U1"))
            .times(1)
            .returning(|_| Ok(vec![ListSummary::new("l1", "Mine", false)]));
        mock.expect_fetch_shopping_lists()
            .with(eq("U2"))
            .times(1)
            .returning(|_| Ok(vec![ListSummary::new("l2", "Bob's", false)]));
        let session = session();
        let mut view = ListCollectionView::new(Arc::new(mock), session.clone());

        view.refresh().await.unwrap();
        assert_eq!(view.lists()[0].id, "l1");

        session.switch_user("U2");
        assert_eq!(view.status(), CollectionStatus::Loading);
        view.refresh().await.unwrap();
        assert_eq!(view.lists(), &[ListSummary::new("l2", "Bob's", false)]);
    }

    #[tokio::test]
    async fn test_navigate_carries_title_hint() {
        let mut mock = MockShoppingApi::new();
        mock.expect_fetch_shopping_lists()
            .returning(|_| Ok(vec![ListSummary::new("l1", "Groceries", false)]));
        let mut view = view(mock);
        view.refresh().await.unwrap();

        let target = view.navigate("l1").unwrap();
        assert_eq!(target, NavigationTarget::new("l1").with_title("Groceries"));
        assert!(matches!(view.navigate("zz"), Err(ShoplistError::NotFound(_))));
    }
}

use shoplist_api::{HttpShoppingApi, ShoppingApi};
use shoplist_client::{ListCollectionView, ListDetailView, NavigationTarget, UserSession};
use shoplist_core::{AppConfig, ShoplistError, ShoplistResult};
use shoplist_domain::{Roster, User};
use std::sync::Arc;

use crate::cli::Cli;

pub struct CliContext {
    pub api_base_url: String,
    pub session: Arc<UserSession>,
    api: Arc<dyn ShoppingApi>,
}

impl CliContext {
    /// Resolves configuration (flag, then env, then file, then defaults) and
    /// activates the requested user.
    pub fn load(cli: &Cli) -> ShoplistResult<Self> {
        let mut config = match &cli.config {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load(),
        };
        if let Some(url) = &cli.api_url {
            config.api_base_url = Some(url.clone());
        }

        let api = HttpShoppingApi::from_config(&config)?;
        tracing::debug!("Using API at {}", api.base_url());

        let session = UserSession::new(Roster::from_entries(config.effective_users()));
        if let Some(user_id) = &cli.user {
            session.switch_user(user_id);
            if session.current_user().map(|u| u.id) != Some(user_id.clone()) {
                return Err(ShoplistError::Validation(format!("Unknown user: {user_id}")));
            }
        }

        Ok(Self {
            api_base_url: api.base_url().to_string(),
            session: Arc::new(session),
            api: Arc::new(api),
        })
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn collection(&self) -> ListCollectionView {
        ListCollectionView::new(self.api.clone(), self.session.clone())
    }

    pub fn detail(&self, target: NavigationTarget) -> ListDetailView {
        ListDetailView::new(self.api.clone(), self.session.clone(), target)
    }
}

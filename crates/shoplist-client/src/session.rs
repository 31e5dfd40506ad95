//! The active identity shared by every view.
//!
//! A session holds one current [`User`] drawn from a fixed [`Roster`].
//! Every change of identity bumps a generation counter and is broadcast over
//! a `watch` channel; views remember the generation they loaded under and
//! reload once it moves.

use shoplist_domain::{Roster, User};
use tokio::sync::watch;

#[derive(Debug, Clone, Default)]
struct SessionState {
    user: Option<User>,
    generation: u64,
}

#[derive(Debug)]
pub struct UserSession {
    roster: Roster,
    state: watch::Sender<SessionState>,
}

impl UserSession {
    /// A session with the roster's first user already active.
    pub fn new(roster: Roster) -> Self {
        let session = Self::uninitialized(roster);
        session.initialize();
        session
    }

    /// A session with no active user until [`initialize`](Self::initialize)
    /// or [`switch_user`](Self::switch_user) is called.
    pub fn uninitialized(roster: Roster) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { roster, state }
    }

    /// Selects the roster's first user if nobody is active yet.
    pub fn initialize(&self) {
        let Some(first) = self.roster.first().cloned() else {
            tracing::warn!("Roster is empty; no user can be activated");
            return;
        };
        self.state.send_if_modified(|state| {
            if state.user.is_some() {
                return false;
            }
            state.user = Some(first);
            state.generation += 1;
            true
        });
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// Makes `user_id` the active user.
    ///
    /// Unknown ids are ignored. Returns whether the identity changed;
    /// switching to the user who is already active changes nothing.
    pub fn switch_user(&self, user_id: &str) -> bool {
        let Some(user) = self.roster.find(user_id).cloned() else {
            tracing::debug!("Ignoring switch to unknown user {}", user_id);
            return false;
        };
        let switched = self.state.send_if_modified(|state| {
            if state.user.as_ref().is_some_and(|u| u.id == user.id) {
                return false;
            }
            state.user = Some(user.clone());
            state.generation += 1;
            true
        });
        if switched {
            tracing::info!("Active user is now {} ({})", user.name, user.id);
        }
        switched
    }

    pub fn list_users(&self) -> &[User] {
        self.roster.users()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Increases every time the active user changes.
    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    pub fn subscribe(&self) -> SessionWatcher {
        SessionWatcher {
            receiver: self.state.subscribe(),
        }
    }
}

/// Invalidation signal handed to views.
#[derive(Debug, Clone)]
pub struct SessionWatcher {
    receiver: watch::Receiver<SessionState>,
}

impl SessionWatcher {
    /// True when the identity changed since the last [`mark_seen`](Self::mark_seen).
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Acknowledges the current identity and returns its generation.
    pub fn mark_seen(&mut self) -> u64 {
        self.receiver.borrow_and_update().generation
    }

    pub fn generation(&self) -> u64 {
        self.receiver.borrow().generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(vec![
            User::new("U1", "Alice"),
            User::new("U2", "Bob"),
            User::new("U3", "Carol"),
        ])
    }

    #[test]
    fn test_new_activates_first_user() {
        let session = UserSession::new(roster());
        assert_eq!(session.current_user().unwrap().id, "U1");
        assert_eq!(session.generation(), 1);
        assert_eq!(session.list_users().len(), 3);
    }

    #[test]
    fn test_uninitialized_has_no_user() {
        let session = UserSession::uninitialized(roster());
        assert!(session.current_user().is_none());

        session.initialize();
        assert_eq!(session.current_user().unwrap().id, "U1");

        // A second initialize keeps the active user.
        session.switch_user("U2");
        session.initialize();
        assert_eq!(session.current_user().unwrap().id, "U2");
    }

    #[test]
    fn test_empty_roster_never_resolves() {
        let session = UserSession::new(Roster::default());
        assert!(session.current_user().is_none());
        assert!(!session.switch_user("U1"));
    }

    #[test]
    fn test_switch_unknown_user_is_noop() {
        let session = UserSession::new(roster());
        let before = session.generation();

        assert!(!session.switch_user("nobody"));
        assert_eq!(session.current_user().unwrap().id, "U1");
        assert_eq!(session.generation(), before);
    }

    #[test]
    fn test_switch_bumps_generation_and_notifies() {
        let session = UserSession::new(roster());
        let mut watcher = session.subscribe();
        assert!(!watcher.has_changed());

        assert!(session.switch_user("U3"));
        assert!(watcher.has_changed());
        assert_eq!(watcher.mark_seen(), 2);
        assert!(!watcher.has_changed());
        assert_eq!(session.current_user().unwrap().name, "Carol");
    }

    #[test]
    fn test_switch_to_current_user_does_not_invalidate() {
        let session = UserSession::new(roster());
        let watcher = session.subscribe();

        assert!(!session.switch_user("U1"));
        assert!(!watcher.has_changed());
        assert_eq!(session.generation(), 1);
    }
}

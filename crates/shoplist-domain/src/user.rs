use serde::{Deserialize, Serialize};
use shoplist_core::UserEntry;

pub type UserId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl From<UserEntry> for User {
    fn from(entry: UserEntry) -> Self {
        Self::new(entry.id, entry.name)
    }
}

/// Fixed, ordered set of users that can act in a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    users: Vec<User>,
}

impl Roster {
    /// Builds a roster, keeping the first entry for any repeated id.
    pub fn new(users: Vec<User>) -> Self {
        let mut unique: Vec<User> = Vec::with_capacity(users.len());
        for user in users {
            if unique.iter().any(|u| u.id == user.id) {
                tracing::debug!("Ignoring duplicate roster entry {}", user.id);
                continue;
            }
            unique.push(user);
        }
        Self { users: unique }
    }

    pub fn from_entries(entries: Vec<UserEntry>) -> Self {
        Self::new(entries.into_iter().map(User::from).collect())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn first(&self) -> Option<&User> {
        self.users.first()
    }
}

use serde::{Deserialize, Serialize};

use crate::user::{Roster, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: UserId,
    pub name: String,
}

impl Member {
    pub fn new(user_id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
        }
    }

    /// Local record for a member the server just accepted.
    ///
    /// The add-member response carries no display name, so the roster name is
    /// used when the id is known and a `User <id>` label otherwise.
    pub fn synthesized(user_id: &str, roster: &Roster) -> Self {
        let name = roster
            .find(user_id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| placeholder_name(user_id));
        Self::new(user_id, name)
    }
}

pub fn placeholder_name(user_id: &str) -> String {
    format!("User {user_id}")
}

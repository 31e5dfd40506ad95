use serde::{Deserialize, Serialize};

/// Which slice of a user's lists the collection view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Active,
    Archived,
}

impl ViewMode {
    /// Deletion is offered only while browsing active lists.
    pub fn allows_deletion(self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::Active => "My Shopping Lists",
            Self::Archived => "Archived Shopping Lists",
        }
    }
}

use serde::Serialize;
use shoplist_domain::{ListId, ListSummary};

/// Link from the collection view to a detail view.
///
/// `title` is only a hint shown while the detail view loads; the detail view
/// always fetches the authoritative title itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationTarget {
    pub list_id: ListId,
    pub title: Option<String>,
}

impl NavigationTarget {
    pub fn new(list_id: impl Into<ListId>) -> Self {
        Self {
            list_id: list_id.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl From<&ListSummary> for NavigationTarget {
    fn from(summary: &ListSummary) -> Self {
        Self::new(summary.id.clone()).with_title(summary.title.clone())
    }
}

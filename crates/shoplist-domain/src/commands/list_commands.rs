use super::Command;
use crate::{ListId, ListSummary};
use shoplist_core::ShoplistResult;

/// Append a list the server just created. New lists are never archived.
pub struct AppendList {
    pub list_id: ListId,
    pub title: String,
}

impl Command<Vec<ListSummary>> for AppendList {
    fn execute(&self, lists: &mut Vec<ListSummary>) -> ShoplistResult<()> {
        lists.push(ListSummary::new(self.list_id.clone(), self.title.clone(), false));
        Ok(())
    }

    fn description(&self) -> String {
        format!("Append list {} \"{}\"", self.list_id, self.title)
    }
}

pub struct RemoveList {
    pub list_id: ListId,
}

impl Command<Vec<ListSummary>> for RemoveList {
    fn execute(&self, lists: &mut Vec<ListSummary>) -> ShoplistResult<()> {
        lists.retain(|l| l.id != self.list_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Remove list {}", self.list_id)
    }
}

/// Assign the archive flag. The entry stays in place even when it no longer
/// matches the view mode.
pub struct SetListArchived {
    pub list_id: ListId,
    pub is_archived: bool,
}

impl Command<Vec<ListSummary>> for SetListArchived {
    fn execute(&self, lists: &mut Vec<ListSummary>) -> ShoplistResult<()> {
        if let Some(list) = lists.iter_mut().find(|l| l.id == self.list_id) {
            list.is_archived = self.is_archived;
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Set list {} archived = {}", self.list_id, self.is_archived)
    }
}

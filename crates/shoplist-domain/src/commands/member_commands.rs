use super::Command;
use crate::{Member, ShoppingList, UserId};
use shoplist_core::ShoplistResult;

/// Append a member the server just accepted. Members are unique by user id.
pub struct AppendMember {
    pub member: Member,
}

impl Command<ShoppingList> for AppendMember {
    fn execute(&self, list: &mut ShoppingList) -> ShoplistResult<()> {
        if list.has_member(&self.member.user_id) {
            tracing::debug!(
                "Member {} already present in list {}",
                self.member.user_id,
                list.id
            );
            return Ok(());
        }
        list.members.push(self.member.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Append member {}", self.member.user_id)
    }
}

pub struct RemoveMember {
    pub user_id: UserId,
}

impl Command<ShoppingList> for RemoveMember {
    fn execute(&self, list: &mut ShoppingList) -> ShoplistResult<()> {
        list.members.retain(|m| m.user_id != self.user_id);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Remove member {}", self.user_id)
    }
}

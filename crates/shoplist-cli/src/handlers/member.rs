use crate::cli::MemberAction;
use crate::context::CliContext;
use crate::output;
use shoplist_client::NavigationTarget;

pub async fn handle(ctx: &CliContext, action: MemberAction) -> anyhow::Result<()> {
    match action {
        MemberAction::Add { list, member } => {
            let mut view = ctx.detail(NavigationTarget::new(list));
            let member = view.add_member(&member).await?;
            output::output_success(&member);
        }
        MemberAction::Remove { list, member } => {
            let mut view = ctx.detail(NavigationTarget::new(list));
            view.remove_member(&member).await?;
            output::output_success(serde_json::json!({ "removed": member.trim() }));
        }
    }
    Ok(())
}

use crate::cli::ListAction;
use crate::context::CliContext;
use crate::output;
use shoplist_client::NavigationTarget;

pub async fn handle(ctx: &CliContext, action: ListAction) -> anyhow::Result<()> {
    match action {
        ListAction::Show { id } => {
            let mut view = ctx.detail(NavigationTarget::new(id.clone()));
            view.refresh().await?;
            match view.list() {
                Some(list) => output::output_success(list),
                None => output::output_error(&format!("List not loaded: {}", id)),
            }
        }
        ListAction::Leave { id } => {
            let mut view = ctx.detail(NavigationTarget::new(id.clone()));
            let message = view.leave_list().await?;
            output::output_success(serde_json::json!({ "left": id, "message": message }));
        }
    }
    Ok(())
}

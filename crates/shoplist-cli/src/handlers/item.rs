use crate::cli::ItemAction;
use crate::context::CliContext;
use crate::output;
use shoplist_client::NavigationTarget;

pub async fn handle(ctx: &CliContext, action: ItemAction) -> anyhow::Result<()> {
    match action {
        ItemAction::Add {
            list,
            name,
            quantity,
        } => {
            let mut view = ctx.detail(NavigationTarget::new(list));
            let item = view.add_item(&name, quantity).await?;
            output::output_success(&item);
        }
        ItemAction::Delete { list, id } => {
            let mut view = ctx.detail(NavigationTarget::new(list));
            view.delete_item(&id).await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        ItemAction::Toggle {
            list,
            id,
            purchased,
        } => {
            let mut view = ctx.detail(NavigationTarget::new(list));
            view.toggle_item(&id, purchased).await?;
            match view.list().and_then(|l| l.item(&id)) {
                Some(item) => output::output_success(item),
                None => output::output_success(
                    serde_json::json!({ "id": id, "purchased": purchased }),
                ),
            }
        }
    }
    Ok(())
}

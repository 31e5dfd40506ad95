use crate::cli::ListsAction;
use crate::context::CliContext;
use crate::output;
use shoplist_client::{CollectionStatus, GATED_MESSAGE};
use shoplist_domain::ViewMode;

pub async fn handle(ctx: &CliContext, action: ListsAction) -> anyhow::Result<()> {
    let mut view = ctx.collection();
    match action {
        ListsAction::Show { archived } => {
            if archived {
                view.set_mode(ViewMode::Archived);
            }
            view.refresh().await?;
            if view.status() == CollectionStatus::Gated {
                output::output_error(GATED_MESSAGE);
            }
            output::output_list(view.lists().to_vec());
        }
        ListsAction::Create { title } => {
            let list = view.create_list(&title).await?;
            output::output_success(&list);
        }
        ListsAction::Delete { id } => {
            view.delete_list(&id).await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        ListsAction::Archive { id } => {
            view.toggle_archive(&id, true).await?;
            output::output_success(serde_json::json!({ "id": id, "is_archived": true }));
        }
        ListsAction::Unarchive { id } => {
            view.toggle_archive(&id, false).await?;
            output::output_success(serde_json::json!({ "id": id, "is_archived": false }));
        }
    }
    Ok(())
}

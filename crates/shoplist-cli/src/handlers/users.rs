use crate::cli::UsersAction;
use crate::context::CliContext;
use crate::output;
use serde::Serialize;

#[derive(Serialize)]
struct UserRow<'a> {
    id: &'a str,
    name: &'a str,
    current: bool,
}

pub fn handle(ctx: &CliContext, action: UsersAction) {
    match action {
        UsersAction::List => {
            let current = ctx.current_user().map(|u| u.id);
            let rows = ctx
                .session
                .list_users()
                .iter()
                .map(|u| UserRow {
                    id: &u.id,
                    name: &u.name,
                    current: current.as_deref() == Some(u.id.as_str()),
                })
                .collect();
            output::output_list::<UserRow>(rows);
        }
    }
}

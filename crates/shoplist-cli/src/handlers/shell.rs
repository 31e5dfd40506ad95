//! Line-oriented interactive session.
//!
//! One session, one collection view and at most one open detail view live for
//! the whole run, so identity switches and confirmed deltas carry across
//! commands the way they would in a long-lived UI.

use shoplist_client::{
    CollectionStatus, DetailStatus, ListCollectionView, ListDetailView, NavigationTarget,
    GATED_MESSAGE, LOADING_MESSAGE,
};
use shoplist_core::{LogEntry, Loggable, ShoplistError, ShoplistResult};
use shoplist_domain::{ViewMode, DEFAULT_QUANTITY};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::context::CliContext;

const HELP: &str = "\
Commands:
  users                 list known users
  user <id>             act as another user
  lists                 show lists in the current mode
  active | archived     switch mode and show lists
  create <title>        create a list
  delete <list-id>      delete a list (asks for confirmation)
  archive <list-id>     archive a list
  unarchive <list-id>   restore an archived list
  open <list-id>        open a list
  add <name> [qty]      add an item to the open list
  rm <item-id>          remove an item
  check <item-id>       mark an item as purchased
  uncheck <item-id>     mark an item as not purchased
  invite <user-id>      share the open list
  kick <user-id>        revoke a member's access
  leave                 leave the open list
  log                   show failed operations
  help                  show this help
  quit                  exit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Help,
    Users,
    User(String),
    Lists,
    Active,
    Archived,
    Create(String),
    Delete(String),
    Archive(String),
    Unarchive(String),
    Open(String),
    Add { name: String, quantity: u32 },
    Remove(String),
    Check(String),
    Uncheck(String),
    Invite(String),
    Kick(String),
    Leave,
    Log,
    Quit,
}

impl ShellCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    ///
    /// Free-text arguments (titles, item names, member ids) may be empty here;
    /// the views reject them before anything is sent.
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let id = |usage: &str| {
            if rest.is_empty() {
                Err(format!("Usage: {usage}"))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word {
            "help" | "?" => Self::Help,
            "users" => Self::Users,
            "user" => Self::User(id("user <id>")?),
            "lists" => Self::Lists,
            "active" => Self::Active,
            "archived" => Self::Archived,
            "create" => Self::Create(rest.to_string()),
            "delete" => Self::Delete(id("delete <list-id>")?),
            "archive" => Self::Archive(id("archive <list-id>")?),
            "unarchive" => Self::Unarchive(id("unarchive <list-id>")?),
            "open" => Self::Open(id("open <list-id>")?),
            "add" => Self::parse_add(rest),
            "rm" => Self::Remove(id("rm <item-id>")?),
            "check" => Self::Check(id("check <item-id>")?),
            "uncheck" => Self::Uncheck(id("uncheck <item-id>")?),
            "invite" => Self::Invite(rest.to_string()),
            "kick" => Self::Kick(rest.to_string()),
            "leave" => Self::Leave,
            "log" => Self::Log,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command: {other} (try `help`)")),
        };
        Ok(Some(command))
    }

    /// `add <name> [qty]`: a trailing number is the quantity when a name
    /// precedes it.
    fn parse_add(rest: &str) -> Self {
        if let Some((name, last)) = rest.rsplit_once(char::is_whitespace) {
            if let Ok(quantity) = last.parse::<u32>() {
                return Self::Add {
                    name: name.trim().to_string(),
                    quantity,
                };
            }
        }
        Self::Add {
            name: rest.to_string(),
            quantity: DEFAULT_QUANTITY,
        }
    }
}

struct Shell {
    ctx: CliContext,
    collection: ListCollectionView,
    detail: Option<ListDetailView>,
}

impl Shell {
    fn new(ctx: CliContext) -> Self {
        let collection = ctx.collection();
        Self {
            ctx,
            collection,
            detail: None,
        }
    }

    fn banner(&self) -> String {
        match self.ctx.current_user() {
            Some(user) => format!(
                "Connected to {} as {} ({}). Type `help` for commands.",
                self.ctx.api_base_url, user.name, user.id
            ),
            None => GATED_MESSAGE.to_string(),
        }
    }

    /// Runs one command. Returns `false` when the session should end.
    async fn execute(&mut self, command: ShellCommand) -> ShoplistResult<bool> {
        match command {
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => return Ok(false),
            ShellCommand::Users => self.print_users(),
            ShellCommand::User(id) => {
                self.ctx.session.switch_user(&id);
                match self.ctx.current_user() {
                    Some(user) if user.id == id => {
                        println!("Now acting as {} ({})", user.name, user.id)
                    }
                    _ => return Err(ShoplistError::NotFound(format!("User {id}"))),
                }
            }
            ShellCommand::Lists => self.show_lists().await?,
            ShellCommand::Active => {
                self.collection.set_mode(ViewMode::Active);
                self.show_lists().await?;
            }
            ShellCommand::Archived => {
                self.collection.set_mode(ViewMode::Archived);
                self.show_lists().await?;
            }
            ShellCommand::Create(title) => {
                let list = self.collection.create_list(&title).await?;
                println!("Created \"{}\" ({})", list.title, list.id);
            }
            ShellCommand::Delete(id) => {
                self.collection.refresh().await?;
                let list = self.collection.select_for_deletion(&id)?;
                println!(
                    "Delete \"{}\"? Type `yes` to confirm, anything else cancels.",
                    list.title
                );
            }
            ShellCommand::Archive(id) => {
                self.collection.toggle_archive(&id, true).await?;
                println!("Archived {id}");
            }
            ShellCommand::Unarchive(id) => {
                self.collection.toggle_archive(&id, false).await?;
                println!("Unarchived {id}");
            }
            ShellCommand::Open(id) => {
                let target = self
                    .collection
                    .navigate(&id)
                    .unwrap_or_else(|_| NavigationTarget::new(id));
                let view = self.detail.insert(self.ctx.detail(target));
                if let Some(title) = view.title() {
                    println!("{title}");
                }
                println!("{LOADING_MESSAGE}");
                view.refresh().await?;
                print_detail(view);
            }
            ShellCommand::Add { name, quantity } => {
                let item = self.open_detail()?.add_item(&name, quantity).await?;
                println!("Added {} x{} ({})", item.name, item.quantity, item.id);
            }
            ShellCommand::Remove(item_id) => {
                self.open_detail()?.delete_item(&item_id).await?;
                println!("Removed {item_id}");
            }
            ShellCommand::Check(item_id) => {
                self.open_detail()?.toggle_item(&item_id, true).await?;
                println!("Checked {item_id}");
            }
            ShellCommand::Uncheck(item_id) => {
                self.open_detail()?.toggle_item(&item_id, false).await?;
                println!("Unchecked {item_id}");
            }
            ShellCommand::Invite(member_id) => {
                let member = self.open_detail()?.add_member(&member_id).await?;
                println!("Shared with {} ({})", member.name, member.user_id);
            }
            ShellCommand::Kick(member_id) => {
                self.open_detail()?.remove_member(&member_id).await?;
                println!("Removed member {}", member_id.trim());
            }
            ShellCommand::Leave => {
                let message = self.open_detail()?.leave_list().await?;
                println!("{message}");
                self.detail = None;
                self.collection.reload_now().await?;
                self.print_lists();
            }
            ShellCommand::Log => self.print_log(),
        }
        Ok(true)
    }

    /// Answers a pending deletion prompt.
    async fn answer_deletion(&mut self, answer: &str) -> ShoplistResult<()> {
        if matches!(answer.trim(), "y" | "yes") {
            if let Some(id) = self.collection.confirm_deletion().await? {
                if self.detail.as_ref().is_some_and(|d| d.target().list_id == id) {
                    self.detail = None;
                }
                println!("Deleted {id}");
            } else {
                println!("Active user changed; nothing deleted");
            }
        } else {
            self.collection.cancel_deletion();
            println!("Cancelled");
        }
        Ok(())
    }

    fn open_detail(&mut self) -> ShoplistResult<&mut ListDetailView> {
        self.detail.as_mut().ok_or(ShoplistError::NoListLoaded)
    }

    fn print_users(&self) {
        let current = self.ctx.current_user().map(|u| u.id);
        for user in self.ctx.session.list_users() {
            let marker = if current.as_deref() == Some(user.id.as_str()) {
                "*"
            } else {
                " "
            };
            println!("{marker} {}  {}", user.id, user.name);
        }
    }

    async fn show_lists(&mut self) -> ShoplistResult<()> {
        self.collection.refresh().await?;
        self.print_lists();
        Ok(())
    }

    fn print_lists(&self) {
        if self.collection.status() == CollectionStatus::Gated {
            println!("{GATED_MESSAGE}");
            return;
        }
        println!("{}", self.collection.mode().heading());
        if self.collection.lists().is_empty() {
            println!("  (none)");
        }
        for list in self.collection.lists() {
            let flag = if list.is_archived { "  [archived]" } else { "" };
            println!("  {}  {}{}", list.id, list.title, flag);
        }
    }

    fn print_log(&self) {
        let mut entries: Vec<&LogEntry> = self.collection.get_logs().iter().collect();
        if let Some(detail) = &self.detail {
            entries.extend(detail.get_logs());
        }
        entries.sort_by_key(|e| e.timestamp);
        if entries.is_empty() {
            println!("No failed operations");
        }
        for entry in entries {
            println!("{}  {}", entry.timestamp.format("%H:%M:%S"), entry.message);
        }
    }
}

fn print_detail(view: &ListDetailView) {
    match (view.status(), view.list()) {
        (DetailStatus::Gated, _) => println!("{GATED_MESSAGE}"),
        (_, Some(list)) => {
            let archived = if list.is_archived { " [archived]" } else { "" };
            println!("{}{}", list.title, archived);
            println!("Members:");
            for member in &list.members {
                println!("  {}  {}", member.user_id, member.name);
            }
            println!(
                "Items ({}/{} purchased):",
                list.purchased_count(),
                list.items.len()
            );
            for item in &list.items {
                let mark = if item.purchased { "x" } else { " " };
                println!("  [{}] {} x{}  ({})", mark, item.name, item.quantity, item.id);
            }
        }
        (_, None) => println!("{LOADING_MESSAGE}"),
    }
}

pub async fn run(ctx: CliContext) -> anyhow::Result<()> {
    let mut shell = Shell::new(ctx);
    println!("{}", shell.banner());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("shoplist> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        if shell.collection.pending_deletion().is_some() {
            if let Err(e) = shell.answer_deletion(&line).await {
                eprintln!("Error: {e}");
                println!("Type `yes` to retry, anything else cancels.");
            }
            continue;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(usage) => {
                eprintln!("{usage}");
                continue;
            }
        };
        tracing::debug!("Shell command: {:?}", command);
        match shell.execute(command).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("Error: {e}"),
        }
    }
    println!();
    Ok(())
}

use clap::{ArgAction, Args, Parser, Subcommand};
use shoplist_domain::DEFAULT_QUANTITY;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shoplist")]
#[command(about = "Shared shopping lists from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the shopping list service
    #[arg(long, global = true, value_name = "URL", env = "SHOPLIST_API_URL")]
    pub api_url: Option<String>,

    /// Act as this user (defaults to the first roster entry)
    #[arg(long, global = true, value_name = "ID", env = "SHOPLIST_USER")]
    pub user: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Known users
    Users(UsersCommand),
    /// The current user's shopping lists
    Lists(ListsCommand),
    /// A single shopping list
    List(ListCommand),
    /// Items on a list
    Item(ItemCommand),
    /// People a list is shared with
    Member(MemberCommand),
    /// Interactive session
    Shell,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub action: UsersAction,
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// List the roster, flagging the active user
    List,
}

#[derive(Args)]
pub struct ListsCommand {
    #[command(subcommand)]
    pub action: ListsAction,
}

#[derive(Subcommand)]
pub enum ListsAction {
    /// Show active lists, or archived ones with --archived
    Show {
        #[arg(long)]
        archived: bool,
    },
    /// Create a new list
    Create {
        #[arg(long)]
        title: String,
    },
    /// Delete a list
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Move a list to the archive
    Archive {
        #[arg(long)]
        id: String,
    },
    /// Bring a list back from the archive
    Unarchive {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct ListCommand {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Show a list with its items and members
    Show {
        #[arg(long)]
        id: String,
    },
    /// Stop being a member of a list
    Leave {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub action: ItemAction,
}

#[derive(Subcommand)]
pub enum ItemAction {
    /// Add an item
    Add {
        #[arg(long)]
        list: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = DEFAULT_QUANTITY)]
        quantity: u32,
    },
    /// Remove an item
    Delete {
        #[arg(long)]
        list: String,
        #[arg(long)]
        id: String,
    },
    /// Mark an item as purchased or not
    Toggle {
        #[arg(long)]
        list: String,
        #[arg(long)]
        id: String,
        #[arg(long, action = ArgAction::Set)]
        purchased: bool,
    },
}

#[derive(Args)]
pub struct MemberCommand {
    #[command(subcommand)]
    pub action: MemberAction,
}

#[derive(Subcommand)]
pub enum MemberAction {
    /// Share a list with a user
    Add {
        #[arg(long)]
        list: String,
        #[arg(long)]
        member: String,
    },
    /// Revoke a user's access to a list
    Remove {
        #[arg(long)]
        list: String,
        #[arg(long)]
        member: String,
    },
}

mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use shoplist_core::ShoplistError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("SHOPLIST_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "shoplist", &mut std::io::stdout());
        return Ok(());
    }

    if let Err(e) = run(cli).await {
        if e
            .downcast_ref::<ShoplistError>()
            .is_some_and(|err| !err.is_client_side())
        {
            tracing::debug!("Service request failed: {:?}", e);
        }
        output::output_error(&e.to_string());
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = CliContext::load(&cli)?;

    match cli.command {
        Commands::Users(users_cmd) => handlers::users::handle(&ctx, users_cmd.action),
        Commands::Lists(lists_cmd) => handlers::lists::handle(&ctx, lists_cmd.action).await?,
        Commands::List(list_cmd) => handlers::list::handle(&ctx, list_cmd.action).await?,
        Commands::Item(item_cmd) => handlers::item::handle(&ctx, item_cmd.action).await?,
        Commands::Member(member_cmd) => {
            handlers::member::handle(&ctx, member_cmd.action).await?
        }
        Commands::Shell => handlers::shell::run(ctx).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}

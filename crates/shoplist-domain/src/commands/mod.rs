use shoplist_core::ShoplistResult;

pub mod item_commands;
pub mod list_commands;
pub mod member_commands;

pub use item_commands::*;
pub use list_commands::*;
pub use member_commands::*;

/// A confirmed delta: the local counterpart of one mutation the server has
/// already acknowledged.
///
/// Views apply a command only after the matching API call returned `Ok`, so
/// local state is always the last full fetch plus a sequence of commands.
/// `S` is the slice of state the command touches.
pub trait Command<S>: Send + Sync {
    /// Apply this delta to local state
    fn execute(&self, state: &mut S) -> ShoplistResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

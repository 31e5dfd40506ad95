pub mod commands;
pub mod item;
pub mod member;
pub mod shopping_list;
pub mod user;
pub mod validation;
pub mod view_mode;

pub use item::{Item, ItemId, DEFAULT_QUANTITY};
pub use member::Member;
pub use shopping_list::{ListId, ListSummary, ShoppingList};
pub use user::{Roster, User, UserId};
pub use validation::required_text;
pub use view_mode::ViewMode;

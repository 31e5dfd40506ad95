pub mod item;
pub mod list;
pub mod lists;
pub mod member;
pub mod shell;
pub mod users;

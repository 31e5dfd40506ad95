pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use config::{AppConfig, UserEntry};
pub use error::ShoplistError;
pub use logging::{LogEntry, Loggable};
pub use result::ShoplistResult;

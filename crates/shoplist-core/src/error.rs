use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShoplistError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No active user selected")]
    NoActiveUser,

    #[error("No shopping list loaded")]
    NoListLoaded,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Active user changed while the request was in flight")]
    StaleView,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShoplistError {
    /// True for failures rejected locally, before any request was sent.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NoActiveUser | Self::NoListLoaded | Self::NotFound(_)
        )
    }
}

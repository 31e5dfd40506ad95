pub mod collection_view;
pub mod detail_view;
pub mod navigation;
pub mod session;

pub use collection_view::{CollectionStatus, ListCollectionView, GATED_MESSAGE};
pub use detail_view::{DetailStatus, ListDetailView, LEAVE_ACKNOWLEDGEMENT, LOADING_MESSAGE};
pub use navigation::NavigationTarget;
pub use session::{SessionWatcher, UserSession};

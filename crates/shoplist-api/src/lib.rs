pub mod http_client;
pub mod routes;
pub mod traits;
pub mod wire;

pub use http_client::HttpShoppingApi;
pub use routes::Route;
pub use traits::ShoppingApi;
#[cfg(any(test, feature = "mock"))]
pub use traits::MockShoppingApi;

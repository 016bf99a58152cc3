pub mod connection;
pub mod error_context;

pub use connection::{ConnectionConfig, connect_with_retry, mask_url_password};
pub use error_context::SqlErrorContext;

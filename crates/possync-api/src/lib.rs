// possync-api: Async Rust client for the StoreHub POS API

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;

pub use auth::Credentials;
pub use client::{DEFAULT_BASE_URL, Record, StoreHubClient};
pub use error::{Error, MAX_ERROR_BODY_BYTES};
pub use transport::{DEFAULT_TIMEOUT, TransportConfig};

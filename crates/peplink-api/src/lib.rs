// peplink-api: Async Rust client for the Peplink MANGA device API

pub mod auth;
pub mod error;
pub mod manga;
pub mod transport;
pub mod webhook;

pub use auth::Session;
pub use error::Error;
pub use manga::client::MangaClient;
pub use manga::models::{DeviceInfo, MangaResponse, WanPriority};
pub use transport::{TlsMode, TransportConfig};
pub use webhook::{WebhookClient, WebhookPayload};

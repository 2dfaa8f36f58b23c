// MANGA API surface: the single `api.cgi` endpoint every Peplink
// router exposes. Endpoint groups live in their own files as inherent
// methods on `MangaClient`.

pub mod auth;
pub mod client;
pub mod config;
pub mod models;
pub mod status;

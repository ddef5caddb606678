//! HTTP API module exposing the proxied data queries and the stream webhook.

pub mod docs;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;

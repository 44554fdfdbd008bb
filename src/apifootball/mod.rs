//! API-Football v3 integration: typed payloads and the resilient client.

pub mod client;
pub mod types;

pub use client::ApiClient;

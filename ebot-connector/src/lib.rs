//! # ebot-connector
//!
//! Connector transport layer: [`ebot_core::Bot`] and [`ebot_core::Directory`]
//! implementations over the platform's REST surface, client-credentials token
//! acquisition, and minimal configuration. Handles only connectivity; no command or
//! dispatch logic.

mod auth;
mod client;
mod config;
mod directory;

use std::sync::Arc;

pub use auth::{TokenProvider, DEFAULT_LOGIN_URL};
pub use client::ConnectorClient;
pub use config::{ConnectorConfig, DEFAULT_BIND_ADDR};
pub use directory::ConnectorDirectory;

/// Builds the send and directory clients over one shared HTTP client and token cache.
pub fn build_clients(config: &ConnectorConfig) -> (Arc<ConnectorClient>, Arc<ConnectorDirectory>) {
    let http = reqwest::Client::new();
    let tokens = Arc::new(TokenProvider::new(config, http.clone()));
    let bot = Arc::new(ConnectorClient::with_parts(http.clone(), tokens.clone()));
    let directory = Arc::new(ConnectorDirectory::with_parts(http, tokens));
    (bot, directory)
}

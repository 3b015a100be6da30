//! Minimal transport configuration: app credentials, login URL, bind address, log path.
//! Loaded from the environment: BOT_APP_ID, BOT_APP_PASSWORD, LOGIN_URL, BIND_ADDR,
//! LOG_FILE.

use anyhow::Result;
use std::env;

/// Address the webhook server binds to when BIND_ADDR is not set. The port matches the
/// platform emulator's default bot endpoint.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3978";

/// Connector configuration. App credentials are optional: without them the client runs
/// in anonymous mode (emulator use).
pub struct ConnectorConfig {
    pub app_id: Option<String>,
    pub app_password: Option<String>,
    pub login_url: Option<String>,
    pub bind_addr: String,
    pub log_file: Option<String>,
}

impl ConnectorConfig {
    /// Loads from environment variables. BOT_APP_ID and BOT_APP_PASSWORD must be set
    /// together or not at all; LOGIN_URL, BIND_ADDR, and LOG_FILE are optional.
    pub fn from_env() -> Result<Self> {
        let app_id = env::var("BOT_APP_ID").ok().filter(|s| !s.is_empty());
        let app_password = env::var("BOT_APP_PASSWORD").ok().filter(|s| !s.is_empty());

        if app_id.is_some() != app_password.is_some() {
            anyhow::bail!("BOT_APP_ID and BOT_APP_PASSWORD must be set together");
        }

        let login_url = env::var("LOGIN_URL").ok();
        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let log_file = env::var("LOG_FILE").ok();

        Ok(Self {
            app_id,
            app_password,
            login_url,
            bind_addr,
            log_file,
        })
    }

    /// Anonymous configuration with defaults; outbound requests carry no Authorization.
    pub fn anonymous() -> Self {
        Self {
            app_id: None,
            app_password: None,
            login_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_file: None,
        }
    }
}

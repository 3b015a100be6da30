//! Wires config, tracing, connector clients, and handlers, then serves the webhook.

use std::sync::Arc;

use activity_router::ActivityRouter;
use anyhow::Result;
use ebot_connector::ConnectorConfig;
use ebot_core::{init_tracing, ActivityKind, Bot};
use tracing::info;

use crate::handlers::{EchoHandler, EventNoticeHandler};
use crate::server::{self, AppState};

/// Loads config from env, initializes tracing, and runs the webhook server until the
/// process is stopped. `bind_override` takes precedence over BIND_ADDR.
pub async fn run(bind_override: Option<String>) -> Result<()> {
    let mut config = ConnectorConfig::from_env()?;
    if let Some(bind) = bind_override {
        config.bind_addr = bind;
    }

    init_tracing(config.log_file.as_deref())?;
    info!(
        anonymous = config.app_id.is_none(),
        bind_addr = %config.bind_addr,
        "Starting echo bot"
    );

    let (connector, directory) = ebot_connector::build_clients(&config);
    let bot: Arc<dyn Bot> = connector;

    let router = ActivityRouter::new()
        .on(
            ActivityKind::Message,
            Arc::new(EchoHandler::new(bot.clone(), directory)),
        )
        .fallback(Arc::new(EventNoticeHandler::new(bot.clone())));

    let state = AppState {
        router: Arc::new(router),
        bot,
    };

    server::serve(&config.bind_addr, state).await
}

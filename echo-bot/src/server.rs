//! Webhook endpoint: receives platform activities and runs the dispatcher.

use std::sync::Arc;

use activity_router::ActivityRouter;
use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use ebot_core::{Activity, Bot};
use tracing::{error, info};

/// Notice sent into the conversation when a turn fails.
const TURN_ERROR_NOTICE: &str = "The bot encountered an error or bug.";

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ActivityRouter>,
    pub bot: Arc<dyn Bot>,
}

/// Builds the HTTP router: the activity webhook and a health probe.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/messages", post(messages))
        .route("/health", get(health))
        .with_state(state)
}

/// Basic health check (always returns OK if the server is running).
async fn health() -> impl IntoResponse {
    "OK"
}

/// Deserializes the inbound activity and runs one turn. A failed turn is logged,
/// answered with 500, and reported into the conversation on a best-effort basis.
async fn messages(
    State(state): State<AppState>,
    Json(activity): Json<Activity>,
) -> impl IntoResponse {
    info!(
        kind = %activity.kind,
        activity_id = ?activity.id,
        "Received activity"
    );

    match state.router.dispatch(&activity).await {
        Ok(outcome) => {
            info!(kind = %activity.kind, outcome = ?outcome, "Turn finished");
            StatusCode::ACCEPTED
        }
        Err(e) => {
            error!(error = %e, kind = %activity.kind, "Turn failed");
            if let Err(notify_err) = state.bot.reply_to(&activity, TURN_ERROR_NOTICE).await {
                error!(error = %notify_err, "Failed to send turn error notice");
            }
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Binds the listener and serves until the process is stopped.
pub async fn serve(bind_addr: &str, state: AppState) -> anyhow::Result<()> {
    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address: {}", bind_addr))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Webhook server listening on {}", addr);

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

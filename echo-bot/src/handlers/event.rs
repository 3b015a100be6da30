//! Fallback handler: acknowledges activities that have no dedicated handler.

use std::sync::Arc;

use activity_router::ActivityHandler;
use async_trait::async_trait;
use ebot_core::{Activity, Bot, Result};

/// Replies with a short notice naming the activity kind, so every inbound turn gets a
/// visible response even when the bot has nothing to do with it.
pub struct EventNoticeHandler {
    bot: Arc<dyn Bot>,
}

impl EventNoticeHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ActivityHandler for EventNoticeHandler {
    async fn handle(&self, activity: &Activity) -> Result<()> {
        self.bot
            .reply_to(activity, &format!("[{} event detected]", activity.kind))
            .await
    }
}

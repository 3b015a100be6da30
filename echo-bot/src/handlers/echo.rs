//! Message handler: echoes the incoming text and serves the roster commands.

use std::sync::Arc;

use activity_router::ActivityHandler;
use async_trait::async_trait;
use ebot_core::batch::send_in_batches;
use ebot_core::mention::remove_recipient_mention;
use ebot_core::{Activity, Bot, Directory, Result};
use tracing::{info, instrument};

/// Usage hint sent when the text matches no command.
const USAGE_HINT: &str = "You can send me \"show members\" from a group chat or team chat \
to see a list of members in a team. You can send me \"show channels\" from a team to see \
a channel list for that team. You can send me \"show details\" from a team chat to see \
information about the team.";

/// Echoes every message, then answers "show members", "show channels", and
/// "show details" from the directory, paginating long listings in batches.
pub struct EchoHandler {
    bot: Arc<dyn Bot>,
    directory: Arc<dyn Directory>,
}

impl EchoHandler {
    pub fn new(bot: Arc<dyn Bot>, directory: Arc<dyn Directory>) -> Self {
        Self { bot, directory }
    }

    async fn show_members(&self, activity: &Activity) -> Result<()> {
        let members = self.directory.conversation_members(activity).await?;

        self.bot
            .reply_to(
                activity,
                &format!("Total of {} members are currently in team", members.len()),
            )
            .await?;

        let lines = members.into_iter().map(|member| {
            format!(
                "{} --> {} --> {}",
                member.aad_object_id.as_deref().unwrap_or(""),
                member.name.as_deref().unwrap_or(""),
                member.user_principal_name.as_deref().unwrap_or("")
            )
        });

        let bot = self.bot.as_ref();
        send_in_batches(lines, move |text| async move {
            bot.reply_to(activity, &text).await
        })
        .await
    }

    async fn show_channels(&self, activity: &Activity) -> Result<()> {
        let channels = self.directory.team_channels(activity).await?;

        self.bot
            .reply_to(
                activity,
                &format!("Total of {} channels are currently in team", channels.len()),
            )
            .await?;

        let lines = channels.into_iter().map(|channel| {
            format!("{} --> {}", channel.id, channel.name.as_deref().unwrap_or(""))
        });

        let bot = self.bot.as_ref();
        send_in_batches(lines, move |text| async move {
            bot.reply_to(activity, &text).await
        })
        .await
    }

    async fn show_details(&self, activity: &Activity) -> Result<()> {
        let details = self.directory.team_details(activity).await?;

        self.bot
            .reply_to(
                activity,
                &format!(
                    "The team name is <b>{}</b>. The team ID is <b>{}</b>. The AADGroupID is <b>{}</b>.",
                    details.name.as_deref().unwrap_or(""),
                    details.id,
                    details.aad_group_id.as_deref().unwrap_or("")
                ),
            )
            .await
    }
}

#[async_trait]
impl ActivityHandler for EchoHandler {
    #[instrument(skip(self, activity))]
    async fn handle(&self, activity: &Activity) -> Result<()> {
        let text = activity.text.as_deref().unwrap_or("");
        self.bot
            .reply_to(activity, &format!("Echo: {}", text))
            .await?;

        let command = remove_recipient_mention(activity);
        info!(command = %command, "step: command resolved");

        match command.as_str() {
            "show members" => self.show_members(activity).await,
            "show channels" => self.show_channels(activity).await,
            "show details" => self.show_details(activity).await,
            _ => self.bot.reply_to(activity, USAGE_HINT).await,
        }
    }
}

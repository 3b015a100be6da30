//! Activity wire model: activity, accounts, roster entries, team metadata.
//!
//! Field names follow the platform's camelCase JSON contract; inbound payloads may omit
//! most fields, so everything but the kind tag is optional or defaulted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind tag of a conversational activity. Unrecognized tags deserialize to [`ActivityKind::Unknown`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Message,
    ConversationUpdate,
    MessageReaction,
    Typing,
    EndOfConversation,
    Event,
    Invoke,
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            ActivityKind::Message => "message",
            ActivityKind::ConversationUpdate => "conversationUpdate",
            ActivityKind::MessageReaction => "messageReaction",
            ActivityKind::Typing => "typing",
            ActivityKind::EndOfConversation => "endOfConversation",
            ActivityKind::Event => "event",
            ActivityKind::Invoke => "invoke",
            ActivityKind::Unknown => "unknown",
        };
        f.write_str(tag)
    }
}

/// A user or bot endpoint in a conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The conversation an activity belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_type: Option<String>,
}

/// A metadata entity attached to an activity. Mentions carry `mentioned` and the literal
/// mention text as it appears in the activity text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentioned: Option<ChannelAccount>,
}

/// One conversational-turn message exchanged with the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members_added: Vec<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Channel-specific payload; carries `{"team": {"id": ...}}` for activities that
    /// originate in a team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<serde_json::Value>,
}

impl Activity {
    /// Builds an outbound message activity addressed back to the sender of `inbound`.
    pub fn reply_text(inbound: &Activity, text: impl Into<String>) -> Self {
        Activity {
            kind: ActivityKind::Message,
            text: Some(text.into()),
            from: inbound.recipient.clone(),
            recipient: inbound.from.clone(),
            conversation: inbound.conversation.clone(),
            channel_id: inbound.channel_id.clone(),
            service_url: inbound.service_url.clone(),
            reply_to_id: inbound.id.clone(),
            ..Default::default()
        }
    }

    /// Id of the team the activity originated in, read from the channel data.
    pub fn team_id(&self) -> Option<&str> {
        self.channel_data
            .as_ref()
            .and_then(|data| data.get("team"))
            .and_then(|team| team.get("id"))
            .and_then(|id| id.as_str())
    }
}

/// One roster entry of a conversation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aad_object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One channel of a team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Metadata of a team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetails {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aad_group_id: Option<String>,
}

//! Implements [`ebot_core::Directory`] over the connector REST surface: conversation
//! roster, team channel list, and team metadata.

use std::sync::Arc;

use async_trait::async_trait;
use ebot_core::{
    Activity, ChannelInfo, Directory, EbotError, HandlerError, Member, Result, TeamDetails,
};
use serde::Deserialize;
use tracing::debug;

use crate::auth::TokenProvider;

/// Wire shape of the team channel listing.
#[derive(Deserialize)]
struct ConversationList {
    #[serde(default)]
    conversations: Vec<ChannelInfo>,
}

/// Directory lookups against `GET {service_url}/v3/...`. Team-scoped routes read the
/// team id from the activity's channel data.
pub struct ConnectorDirectory {
    http: reqwest::Client,
    tokens: Arc<TokenProvider>,
}

impl ConnectorDirectory {
    /// Creates a directory client from existing parts, sharing the HTTP client and token
    /// cache with other connector components.
    pub fn with_parts(http: reqwest::Client, tokens: Arc<TokenProvider>) -> Self {
        Self { http, tokens }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %url, "Directory lookup");
        let request = self.http.get(url);
        let response = self
            .tokens
            .authorize(request)
            .await?
            .send()
            .await
            .map_err(|e| EbotError::Directory(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(EbotError::Directory(format!(
                "Directory lookup returned HTTP {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| EbotError::Directory(format!("Invalid directory response: {}", e)))
    }

    fn service_url(activity: &Activity) -> Result<&str> {
        Ok(activity
            .service_url
            .as_deref()
            .ok_or(HandlerError::NoServiceUrl)?
            .trim_end_matches('/'))
    }

    fn team_id(activity: &Activity) -> Result<&str> {
        Ok(activity.team_id().ok_or(HandlerError::NotInTeam)?)
    }
}

#[async_trait]
impl Directory for ConnectorDirectory {
    async fn conversation_members(&self, activity: &Activity) -> Result<Vec<Member>> {
        let service_url = Self::service_url(activity)?;
        let conversation_id = activity
            .conversation
            .as_ref()
            .map(|c| c.id.as_str())
            .ok_or(HandlerError::NoConversation)?;

        let url = format!(
            "{}/v3/conversations/{}/members",
            service_url,
            urlencoding::encode(conversation_id)
        );
        self.get_json(&url).await
    }

    async fn team_channels(&self, activity: &Activity) -> Result<Vec<ChannelInfo>> {
        let service_url = Self::service_url(activity)?;
        let team_id = Self::team_id(activity)?;

        let url = format!(
            "{}/v3/teams/{}/conversations",
            service_url,
            urlencoding::encode(team_id)
        );
        let list: ConversationList = self.get_json(&url).await?;
        Ok(list.conversations)
    }

    async fn team_details(&self, activity: &Activity) -> Result<TeamDetails> {
        let service_url = Self::service_url(activity)?;
        let team_id = Self::team_id(activity)?;

        let url = format!("{}/v3/teams/{}", service_url, urlencoding::encode(team_id));
        self.get_json(&url).await
    }
}

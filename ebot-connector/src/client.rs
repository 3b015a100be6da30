//! Implements [`ebot_core::Bot`] over the connector REST surface. Production code sends
//! through the platform; tests substitute another Bot impl.

use std::sync::Arc;

use async_trait::async_trait;
use ebot_core::{Activity, Bot, EbotError, HandlerError, Result};
use tracing::debug;

use crate::auth::TokenProvider;

/// Sends activities via `POST {service_url}/v3/conversations/{id}/activities`, threaded
/// to the inbound activity when replying.
pub struct ConnectorClient {
    http: reqwest::Client,
    tokens: Arc<TokenProvider>,
}

impl ConnectorClient {
    /// Creates a client from existing parts, sharing the HTTP client and token cache
    /// with other connector components.
    pub fn with_parts(http: reqwest::Client, tokens: Arc<TokenProvider>) -> Self {
        Self { http, tokens }
    }

    async fn post_activity(&self, inbound: &Activity, outbound: &Activity) -> Result<()> {
        let service_url = inbound
            .service_url
            .as_deref()
            .ok_or(HandlerError::NoServiceUrl)?;
        let conversation_id = inbound
            .conversation
            .as_ref()
            .map(|c| c.id.as_str())
            .ok_or(HandlerError::NoConversation)?;

        let mut url = format!(
            "{}/v3/conversations/{}/activities",
            service_url.trim_end_matches('/'),
            urlencoding::encode(conversation_id)
        );
        if let Some(reply_to_id) = outbound.reply_to_id.as_deref() {
            url.push('/');
            url.push_str(&urlencoding::encode(reply_to_id));
        }

        debug!(url = %url, "Posting activity");
        let request = self.http.post(&url).json(outbound);
        let response = self
            .tokens
            .authorize(request)
            .await?
            .send()
            .await
            .map_err(|e| EbotError::Connector(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(EbotError::Connector(format!(
                "Activity post returned HTTP {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Bot for ConnectorClient {
    async fn reply_to(&self, activity: &Activity, text: &str) -> Result<()> {
        let outbound = Activity::reply_text(activity, text);
        self.post_activity(activity, &outbound).await
    }

    async fn send_to_conversation(&self, activity: &Activity, text: &str) -> Result<()> {
        let mut outbound = Activity::reply_text(activity, text);
        outbound.reply_to_id = None;
        self.post_activity(activity, &outbound).await
    }
}

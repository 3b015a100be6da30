//! Client-credentials token acquisition with an in-process cache.

use chrono::{DateTime, Duration, Utc};
use ebot_core::{EbotError, Result};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::ConnectorConfig;

/// Token endpoint used when the config carries no LOGIN_URL override.
pub const DEFAULT_LOGIN_URL: &str =
    "https://login.microsoftonline.com/botframework.com/oauth2/v2.0/token";

const TOKEN_SCOPE: &str = "https://api.botframework.com/.default";

/// A cached token is considered stale this long before its actual expiry, so in-flight
/// requests never carry a token that dies mid-call.
const EXPIRY_MARGIN_SECS: i64 = 300;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

/// Fetches and caches the connector bearer token. Anonymous when the config carries no
/// app credentials; then [`TokenProvider::bearer_token`] yields None and requests go out
/// without Authorization.
pub struct TokenProvider {
    credentials: Option<(String, String)>,
    login_url: String,
    http: reqwest::Client,
    cached: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    /// Creates a provider from the config, sharing the given HTTP client.
    pub fn new(config: &ConnectorConfig, http: reqwest::Client) -> Self {
        let credentials = match (&config.app_id, &config.app_password) {
            (Some(id), Some(password)) => Some((id.clone(), password.clone())),
            _ => None,
        };
        let login_url = config
            .login_url
            .clone()
            .unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string());

        Self {
            credentials,
            login_url,
            http,
            cached: RwLock::new(None),
        }
    }

    /// Returns a bearer token, refreshing the cache when stale. None in anonymous mode.
    pub async fn bearer_token(&self) -> Result<Option<String>> {
        let Some((app_id, app_password)) = &self.credentials else {
            return Ok(None);
        };

        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(Some(cached.token.clone()));
            }
        }

        let mut cached = self.cached.write().await;
        // Another task may have refreshed while we waited for the write lock.
        if let Some(existing) = cached.as_ref() {
            if existing.is_fresh(Utc::now()) {
                return Ok(Some(existing.token.clone()));
            }
        }

        debug!(login_url = %self.login_url, "Requesting connector token");
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", app_id.as_str()),
            ("client_secret", app_password.as_str()),
            ("scope", TOKEN_SCOPE),
        ];
        let response = self
            .http
            .post(&self.login_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| EbotError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(EbotError::Auth(format!(
                "Token endpoint returned HTTP {}: {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| EbotError::Auth(format!("Invalid token response: {}", e)))?;

        let token = token_response.access_token.clone();
        *cached = Some(CachedToken {
            token: token_response.access_token,
            expires_at: Utc::now() + Duration::seconds(token_response.expires_in),
        });
        info!("Connector token refreshed");

        Ok(Some(token))
    }

    /// Attaches the bearer token to a request when not anonymous.
    pub async fn authorize(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        match self.bearer_token().await? {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Ok(request),
        }
    }
}

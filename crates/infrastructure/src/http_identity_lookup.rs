//! Identity provider client confirming that a token's subject is an active account.

use std::time::Duration;

use async_trait::async_trait;
use orgreg_application::{ActiveAccount, IdentityLookup};
use orgreg_core::{AppError, AppResult};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::{debug, warn};

/// HTTP implementation of [`IdentityLookup`].
///
/// Every failure mode (transport, timeout, non-2xx, unparseable body,
/// `success: false`) collapses to `None`.
#[derive(Clone)]
pub struct HttpIdentityLookup {
    http_client: reqwest::Client,
    active_account_url: String,
}

impl HttpIdentityLookup {
    /// Builds a client with the given connect and read timeout.
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build identity lookup client: {error}"))
            })?;

        Ok(Self::with_client(http_client, base_url))
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            active_account_url: format!("{}/active", base_url.trim_end_matches('/')),
        }
    }

    /// Endpoint the lookup posts to.
    #[must_use]
    pub fn active_account_url(&self) -> &str {
        &self.active_account_url
    }
}

#[derive(Debug, Deserialize)]
struct ActiveAccountEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<ActiveAccountPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActiveAccountPayload {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "userName")]
    username: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

async fn request_active_account(
    http_client: reqwest::Client,
    url: String,
    user_id: String,
    authorization_header: String,
) -> Option<ActiveAccount> {
    let response = match http_client
        .post(&url)
        .header(AUTHORIZATION, authorization_header)
        .json(&serde_json::json!({ "userId": user_id }))
        .send()
        .await
    {
        Ok(response) => response,
        Err(error) => {
            warn!(error = %error, url = %url, "identity lookup request failed");
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "identity lookup returned non-success status");
        return None;
    }

    let envelope = match response.json::<ActiveAccountEnvelope>().await {
        Ok(envelope) => envelope,
        Err(error) => {
            warn!(error = %error, "identity lookup response could not be parsed");
            return None;
        }
    };

    if !envelope.success {
        debug!(
            message = envelope.message.as_deref().unwrap_or_default(),
            "identity lookup reported no active account"
        );
        return None;
    }

    let payload = envelope.data?;
    Some(ActiveAccount {
        active: true,
        user_id: payload.user_id,
        email: payload.email,
        username: payload.username,
        role: payload.role,
    })
}

#[async_trait]
impl IdentityLookup for HttpIdentityLookup {
    async fn find_active_account(
        &self,
        user_id: &str,
        authorization_header: &str,
    ) -> Option<ActiveAccount> {
        let lookup = tokio::spawn(request_active_account(
            self.http_client.clone(),
            self.active_account_url.clone(),
            user_id.to_owned(),
            authorization_header.to_owned(),
        ));

        match lookup.await {
            Ok(account) => account,
            Err(error) => {
                warn!(error = %error, "identity lookup task failed");
                None
            }
        }
    }
}

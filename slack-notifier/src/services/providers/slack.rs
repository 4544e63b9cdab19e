use super::{MessagingProvider, ProviderError};
use crate::config::SlackConfig;
use crate::models::{OutboundMessage, PostMessageResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

const POST_MESSAGE_METHOD: &str = "chat.postMessage";

/// `ok: false` error codes Slack uses for a rejected token. Slack answers
/// these with HTTP 200, so they are recognised by code rather than status.
const AUTH_ERROR_CODES: &[&str] = &[
    "invalid_auth",
    "not_authed",
    "token_revoked",
    "token_expired",
    "account_inactive",
];

/// Slack Web API client for `chat.postMessage`.
pub struct SlackProvider {
    client: Client,
    post_message_url: String,
}

impl SlackProvider {
    pub fn new(config: &SlackConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ProviderError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            post_message_url: format!(
                "{}/{}",
                config.api_base_url.trim_end_matches('/'),
                POST_MESSAGE_METHOD
            ),
        })
    }
}

#[async_trait]
impl MessagingProvider for SlackProvider {
    async fn post_message(
        &self,
        token: &Secret<String>,
        message: &OutboundMessage,
    ) -> Result<PostMessageResponse, ProviderError> {
        let response = self
            .client
            .post(&self.post_message_url)
            .bearer_auth(token.expose_secret())
            .header("Content-Type", "application/json; charset=utf-8")
            .json(message)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to connect to Slack: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = format!("Slack API returned status {}: {}", status, body);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProviderError::Authentication(detail)
                }
                StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited(detail),
                _ => ProviderError::SendFailed(detail),
            });
        }

        let slack_response: PostMessageResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse Slack response: {}", e))
        })?;

        tracing::debug!(
            ok = slack_response.ok,
            channel = ?slack_response.channel,
            "Slack API responded"
        );

        if let Some(code) = slack_response
            .error
            .as_deref()
            .filter(|code| !slack_response.ok && AUTH_ERROR_CODES.contains(code))
        {
            return Err(ProviderError::Authentication(format!(
                "Slack rejected the token: {}",
                code
            )));
        }

        Ok(slack_response)
    }

    fn name(&self) -> &'static str {
        "slack"
    }
}

/// How the mock answers every call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Ok,
    /// `ok: false` with the given error string.
    SoftFailure(String),
    /// Fails as if the network call itself broke.
    TransportError(String),
}

/// Mock provider for dry runs and tests. Counts calls and keeps only the
/// most recent message, so a long-running dry run stays bounded.
pub struct MockSlackProvider {
    reply: MockReply,
    send_count: AtomicU64,
    last_message: Mutex<Option<OutboundMessage>>,
}

impl MockSlackProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            send_count: AtomicU64::new(0),
            last_message: Mutex::new(None),
        }
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }

    pub fn last_message(&self) -> Option<OutboundMessage> {
        self.last_message
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl MessagingProvider for MockSlackProvider {
    async fn post_message(
        &self,
        _token: &Secret<String>,
        message: &OutboundMessage,
    ) -> Result<PostMessageResponse, ProviderError> {
        let count = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;
        *self
            .last_message
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(message.clone());

        tracing::info!(
            recipient = %message.recipient,
            text_length = message.text.len(),
            "[MOCK] Slack message would be sent"
        );

        match &self.reply {
            MockReply::Ok => Ok(PostMessageResponse::success(
                message.recipient.clone(),
                format!("mock-{}", count),
            )),
            MockReply::SoftFailure(error) => Ok(PostMessageResponse::failure(error.clone())),
            MockReply::TransportError(error) => Err(ProviderError::Connection(error.clone())),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

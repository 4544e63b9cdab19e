use crate::config::SlackConfig;
use crate::models::{OutboundMessage, SendOutcome};
use crate::services::metrics::record_slack_message;
use crate::services::providers::{MessagingProvider, ProviderError};
use secrecy::Secret;
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<NotifierError> for AppError {
    fn from(err: NotifierError) -> Self {
        match err {
            NotifierError::Configuration(msg) => AppError::ConfigError(anyhow::anyhow!(msg)),
            NotifierError::Provider(e) => AppError::BadGateway(e.to_string()),
        }
    }
}

/// Sends the fixed direct message. One attempt per call, no retries.
pub struct Notifier {
    token: Option<Secret<String>>,
    recipient: String,
    text: String,
    provider: Arc<dyn MessagingProvider>,
}

impl Notifier {
    pub fn new(config: &SlackConfig, provider: Arc<dyn MessagingProvider>) -> Self {
        Self {
            token: config.api_token.clone(),
            recipient: config.recipient.clone(),
            text: config.message.clone(),
            provider,
        }
    }

    /// Whether a token is available to authenticate with.
    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Post the fixed text to the fixed recipient.
    ///
    /// An API-level refusal (`ok: false`) is logged and returned as
    /// [`SendOutcome::Failed`]. A missing token fails before any network call;
    /// transport failures are returned as errors.
    #[tracing::instrument(skip(self), fields(recipient = %self.recipient, provider = self.provider.name()))]
    pub async fn send_fixed_message(&self) -> Result<SendOutcome, NotifierError> {
        let token = self.token.as_ref().ok_or_else(|| {
            tracing::error!("SLACK_API_TOKEN is not set; refusing to send");
            NotifierError::Configuration("SLACK_API_TOKEN is not set".to_string())
        })?;

        let message = OutboundMessage::new(&self.recipient, &self.text);
        let provider = self.provider.name();

        let response = self
            .provider
            .post_message(token, &message)
            .await
            .map_err(|e| {
                record_slack_message(provider, "error");
                tracing::error!(error = %e, "Slack request failed");
                e
            })?;

        let outcome = SendOutcome::from(response);
        match &outcome {
            SendOutcome::Sent { channel, ts } => {
                record_slack_message(provider, "sent");
                tracing::info!(channel = ?channel, ts = ?ts, "Private message sent successfully");
            }
            SendOutcome::Failed { error } => {
                record_slack_message(provider, "failed");
                tracing::warn!(error = %error, "Failed to send private message");
            }
        }

        Ok(outcome)
    }
}

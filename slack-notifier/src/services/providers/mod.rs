pub mod slack;

use crate::models::{OutboundMessage, PostMessageResponse};
use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

pub use slack::{MockReply, MockSlackProvider, SlackProvider};

/// Transport-level failures: the API could not be reached or did not answer
/// with a readable `ok`/`error` envelope.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Send error: {0}")]
    SendFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Issue one `chat.postMessage` call authenticated with `token`.
    ///
    /// An `ok: false` reply is returned as `Ok`; only transport failures are `Err`.
    async fn post_message(
        &self,
        token: &Secret<String>,
        message: &OutboundMessage,
    ) -> Result<PostMessageResponse, ProviderError>;

    fn name(&self) -> &'static str;
}

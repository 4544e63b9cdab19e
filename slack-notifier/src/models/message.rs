use serde::{Deserialize, Serialize};

/// A single direct message, built right before the API call.
///
/// Serializes to the `chat.postMessage` body: the recipient goes out as
/// `channel`, since Slack opens a DM when given a user ID there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    #[serde(rename = "channel")]
    pub recipient: String,
    pub text: String,
}

impl OutboundMessage {
    pub fn new(recipient: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            text: text.into(),
        }
    }
}

/// Envelope every Web API method replies with. Only the fields we log are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessageResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
}

impl PostMessageResponse {
    pub fn success(channel: impl Into<String>, ts: impl Into<String>) -> Self {
        Self {
            ok: true,
            error: None,
            channel: Some(channel.into()),
            ts: Some(ts.into()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            channel: None,
            ts: None,
        }
    }
}

/// What happened to a send that reached the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent {
        channel: Option<String>,
        ts: Option<String>,
    },
    /// The API answered but refused the message (`ok: false`).
    Failed { error: String },
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent { .. })
    }
}

impl From<PostMessageResponse> for SendOutcome {
    fn from(response: PostMessageResponse) -> Self {
        if response.ok {
            SendOutcome::Sent {
                channel: response.channel,
                ts: response.ts,
            }
        } else {
            SendOutcome::Failed {
                error: response.error.unwrap_or_else(|| "unknown_error".to_string()),
            }
        }
    }
}

impl std::fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendOutcome::Sent { .. } => write!(f, "sent"),
            SendOutcome::Failed { .. } => write!(f, "failed"),
        }
    }
}

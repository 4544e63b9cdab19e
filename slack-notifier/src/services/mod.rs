pub mod metrics;
pub mod notifier;
pub mod providers;

pub use metrics::{get_metrics, init_metrics, record_slack_message};
pub use notifier::{Notifier, NotifierError};
pub use providers::{
    MessagingProvider, MockReply, MockSlackProvider, ProviderError, SlackProvider,
};

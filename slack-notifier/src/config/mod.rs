use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

/// Slack user the trigger endpoint messages.
pub const DEFAULT_RECIPIENT: &str = "U06HQP5JN1X";

/// Text of the message sent on every trigger.
pub const DEFAULT_MESSAGE: &str = "Hello, this is from My Traffic Wizard on Render!";

pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

#[derive(Debug, Clone)]
pub struct NotifierConfig {
    pub common: core_config::Config,
    pub slack: SlackConfig,
    pub pages: PagesConfig,
}

#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Bot token. Optional at startup; sending without one is a configuration error.
    pub api_token: Option<Secret<String>>,
    pub api_base_url: String,
    pub recipient: String,
    pub message: String,
    /// When false, messages go to the logging mock provider instead of Slack.
    pub enabled: bool,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct PagesConfig {
    /// Directory holding `index.html`.
    pub static_dir: PathBuf,
}

impl NotifierConfig {
    pub fn load() -> Result<Self, AppError> {
        // Loads `.env` before anything below reads the environment.
        let common_config = core_config::Config::load()?;

        Ok(NotifierConfig {
            common: common_config,
            slack: SlackConfig {
                api_token: secret_env("SLACK_API_TOKEN"),
                api_base_url: get_env("SLACK_API_BASE_URL", DEFAULT_SLACK_API_URL),
                recipient: get_env("SLACK_RECIPIENT", DEFAULT_RECIPIENT),
                message: get_env("SLACK_MESSAGE", DEFAULT_MESSAGE),
                enabled: parse_env("SLACK_ENABLED", true)?,
                timeout_secs: parse_env("SLACK_TIMEOUT_SECS", 10)?,
            },
            pages: PagesConfig {
                static_dir: match env::var("STATIC_DIR") {
                    Ok(dir) => PathBuf::from(dir),
                    Err(_) => default_static_dir()?,
                },
            },
        })
    }
}

impl SlackConfig {
    /// Settings pointing at the public Slack API with the fixed recipient and text.
    pub fn new(api_token: Option<Secret<String>>) -> Self {
        Self {
            api_token,
            api_base_url: DEFAULT_SLACK_API_URL.to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            enabled: true,
            timeout_secs: 10,
        }
    }
}

fn default_static_dir() -> Result<PathBuf, AppError> {
    let base_path = env::current_dir()?;

    // Works both from the workspace root and from inside the crate directory
    if base_path.ends_with("slack-notifier") {
        Ok(base_path.join("static"))
    } else {
        Ok(base_path.join("slack-notifier").join("static"))
    }
}

/// A blank value counts as unset.
fn secret_env(key: &str) -> Option<Secret<String>> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(Secret::new)
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.trim().parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, val, e))
        }),
        Err(_) => Ok(default),
    }
}

use dotenvy::dotenv;
use service_core::observability::init_tracing;
use slack_notifier::config::NotifierConfig;
use slack_notifier::services::init_metrics;
use slack_notifier::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Span export is opt-in; logs always go to stdout
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("slack-notifier", "info", otlp_endpoint.as_deref())?;

    init_metrics();

    let config = NotifierConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    Ok(())
}

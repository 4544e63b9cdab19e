use askama::Template;
use axum::extract::State;
use service_core::error::AppError;

use crate::startup::AppState;

#[derive(Template)]
#[template(path = "slack_bot.html")]
pub struct ConfirmationTemplate {}

/// Send the fixed message, then render the confirmation page.
///
/// The request body is ignored. A refusal reported by Slack still renders
/// the page; a missing token or a failed request becomes an error response.
#[tracing::instrument(skip(state))]
pub async fn trigger(State(state): State<AppState>) -> Result<ConfirmationTemplate, AppError> {
    let outcome = state.notifier.send_fixed_message().await?;

    tracing::info!(outcome = %outcome, "Trigger handled");

    Ok(ConfirmationTemplate {})
}

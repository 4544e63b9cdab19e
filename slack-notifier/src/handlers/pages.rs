use axum::{extract::State, response::Html};
use service_core::error::AppError;

use crate::startup::AppState;

pub const INDEX_PAGE: &str = "index.html";

/// Serve `index.html` from the static directory, read fresh on every request.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = state.config.pages.static_dir.join(INDEX_PAGE);

    let page = tokio::fs::read_to_string(&path).await.map_err(|e| {
        tracing::error!(path = %path.display(), "Failed to read home page: {}", e);
        AppError::from(e)
    })?;

    Ok(Html(page))
}

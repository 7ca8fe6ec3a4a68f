use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::views;

/// A request that cannot be completed.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] feedback_api::Error),
    #[error("session store failed: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(views::server_error()),
        )
            .into_response()
    }
}

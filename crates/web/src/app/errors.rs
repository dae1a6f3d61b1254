use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use tallydesk_store::StoreError;

/// Failure of a read handler or of the hosting layer itself.
///
/// Submission failures never travel this path; they are returned as
/// [`tallydesk_forms::FormState`] data. This type covers read-side store
/// errors and re-raised internal errors from the sign-in flow.
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        match self {
            WebError::Store(StoreError::NotFound) => {
                json_error(StatusCode::NOT_FOUND, "not_found", "not found")
            }
            WebError::Store(e) => {
                tracing::error!(error = %e, "store error while serving request");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "failed to load data")
            }
            WebError::Unexpected(e) => {
                tracing::error!(error = %e, "unexpected error while serving request");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
            }
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing::get, Json, Router};

use tallydesk_forms::FormState;

use crate::app::actions::ActionOutcome;

pub mod auth;
pub mod customers;
pub mod invoices;
pub mod overview;
pub mod system;

/// Session-protected routes under `/dashboard`.
pub fn dashboard_router() -> Router {
    Router::new()
        .nest("/invoices", invoices::router())
        .nest("/customers", customers::router())
        .route("/overview", get(overview::overview))
}

/// Translate a create/update outcome into HTTP: failed states re-render,
/// success is the one place a redirect is performed.
pub(crate) fn respond_outcome(outcome: ActionOutcome) -> Response {
    match outcome {
        ActionOutcome::ValidationFailed(state) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(state)).into_response()
        }
        ActionOutcome::PersistenceFailed(state) => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(state)).into_response()
        }
        ActionOutcome::Succeeded { redirect } => Redirect::to(redirect).into_response(),
    }
}

/// Translate a delete outcome: no navigation, the client's listing refreshes
/// through the revalidated path.
pub(crate) fn respond_delete(result: Result<(), FormState>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(state) => (StatusCode::INTERNAL_SERVER_ERROR, Json(state)).into_response(),
    }
}

//! HTTP application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: infrastructure wiring (store, sessions, authenticator,
//!   revalidation log)
//! - `actions/`: the form-submission pipeline (validate → persist →
//!   revalidate), HTTP-free
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: response JSON mapping and query-parameter types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::middleware;

pub mod actions;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let session_state = middleware::SessionState {
        sessions: services.sessions_arc(),
    };

    // Dashboard routes: require a valid session.
    let protected = routes::dashboard_router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            session_state,
            middleware::session_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::auth::router().layer(Extension(services)))
        .nest("/dashboard", protected)
}

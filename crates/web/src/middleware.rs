use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use tallydesk_auth::Hs256Sessions;

use crate::context::SessionContext;

pub const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
pub struct SessionState {
    pub sessions: Arc<Hs256Sessions>,
}

/// Require a valid session cookie; insert [`SessionContext`] for handlers.
pub async fn session_middleware(
    State(state): State<SessionState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = session_cookie(req.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = state
        .sessions
        .validate(token, Utc::now())
        .map_err(|_e| StatusCode::UNAUTHORIZED)?;

    req.extensions_mut()
        .insert(SessionContext::new(claims.user_id(), claims.email.clone()));

    Ok(next.run(req).await)
}

fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(header::COOKIE)?.to_str().ok()?;
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .filter(|token| !token.is_empty())
}

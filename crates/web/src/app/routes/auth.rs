//! Sign-in and sign-out.
//!
//! The sign-in handler is the authentication boundary's message mapping:
//! invalid credentials get their own message, every other recognized
//! authentication failure collapses to a generic one, and anything that is
//! not an authentication verdict re-raises into the error responder.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect},
    routing::post,
    Form, Json, Router,
};
use chrono::{Duration, Utc};

use tallydesk_auth::{AuthError, Credentials, SignInError};
use tallydesk_forms::{CredentialsSchema, FormState, RawFields};

use crate::app::errors::WebError;
use crate::app::services::AppServices;
use crate::middleware::SESSION_COOKIE;

const SESSION_TTL_HOURS: i64 = 12;

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Result<axum::response::Response, WebError> {
    let fields = RawFields::from(fields);

    // A submission that fails the schema is indistinguishable from a wrong
    // password: same message, no store lookup.
    let payload = match CredentialsSchema::parse(&fields) {
        Ok(payload) => payload,
        Err(_) => return Ok(invalid_credentials()),
    };

    let credentials = Credentials {
        email: payload.email,
        password: payload.password,
    };

    match services.authenticator().sign_in(&credentials).await {
        Ok(user) => {
            let token = services
                .sessions()
                .issue(user.id, &user.email, Utc::now(), Duration::hours(SESSION_TTL_HOURS))
                .map_err(|e| anyhow::anyhow!(e))?;
            let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
            Ok((
                [(header::SET_COOKIE, cookie)],
                Redirect::to("/dashboard/overview"),
            )
                .into_response())
        }
        Err(SignInError::Auth(AuthError::InvalidCredentials)) => Ok(invalid_credentials()),
        Err(SignInError::Auth(e)) => {
            tracing::warn!(error = %e, "sign-in failed");
            Ok((
                StatusCode::UNAUTHORIZED,
                Json(FormState::message("Something went wrong.")),
            )
                .into_response())
        }
        // Not an authentication verdict: re-raise to the error responder.
        Err(SignInError::Internal(e)) => Err(WebError::Unexpected(e)),
    }
}

pub async fn logout() -> axum::response::Response {
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    ([(header::SET_COOKIE, cookie)], Redirect::to("/login")).into_response()
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(FormState::message("Invalid credentials.")),
    )
        .into_response()
}

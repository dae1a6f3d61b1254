//! Authentication error model.

use thiserror::Error;

/// A recognized authentication failure.
///
/// The web layer maps `InvalidCredentials` to its own specific message and
/// every other kind to a generic one; the kinds stay discriminable so that
/// mapping (and tests) can tell them apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The email/password pair did not match a user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account exists but may not sign in.
    #[error("account disabled")]
    AccountDisabled,

    /// The credential provider could not be consulted.
    #[error("authentication provider unavailable: {0}")]
    ProviderUnavailable(String),
}

/// Outcome channel of a sign-in attempt.
///
/// `Auth` failures are expected and mapped to form messages. `Internal`
/// failures are not an authentication verdict at all; the caller must
/// re-raise them so the hosting layer's error responder handles them.
#[derive(Debug, Error)]
pub enum SignInError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

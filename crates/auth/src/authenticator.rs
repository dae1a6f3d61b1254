//! The credential sign-in seam.

use async_trait::async_trait;

use tallydesk_core::UserId;

use crate::error::SignInError;

/// A submitted email/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Never log the password.
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The identity established by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Credential verification seam.
///
/// Implementations return [`crate::AuthError`] kinds through
/// [`SignInError::Auth`] for expected failures; anything that is not an
/// authentication verdict (store outage, codec failure) travels as
/// [`SignInError::Internal`] and must be re-raised by callers.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, SignInError>;
}

//! Infrastructure wiring for the HTTP application.

use std::sync::Arc;

use async_trait::async_trait;

use tallydesk_auth::{
    verify_password, AuthError, AuthUser, Authenticator, Credentials, Hs256Sessions, SignInError,
};
use tallydesk_store::{Store, StoreError};

use crate::revalidate::{RevalidationLog, Revalidator};

/// Everything the route handlers need, constructed once at startup and
/// shared via `Extension<Arc<AppServices>>`.
pub struct AppServices {
    store: Arc<dyn Store>,
    revalidations: Arc<RevalidationLog>,
    sessions: Arc<Hs256Sessions>,
    authenticator: Arc<dyn Authenticator>,
}

impl AppServices {
    pub fn new(store: Arc<dyn Store>, session_secret: &[u8]) -> Self {
        let authenticator = Arc::new(StoreAuthenticator::new(store.clone()));
        Self {
            store,
            revalidations: Arc::new(RevalidationLog::new()),
            sessions: Arc::new(Hs256Sessions::new(session_secret)),
            authenticator,
        }
    }

    /// Swap the credential provider (alternate providers, test stubs).
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn revalidator(&self) -> &dyn Revalidator {
        self.revalidations.as_ref()
    }

    /// The concrete revalidation log, for post-commit assertions.
    pub fn revalidations(&self) -> &RevalidationLog {
        &self.revalidations
    }

    pub fn sessions(&self) -> &Hs256Sessions {
        &self.sessions
    }

    pub fn sessions_arc(&self) -> Arc<Hs256Sessions> {
        self.sessions.clone()
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }
}

/// Credential provider backed by the `users` table.
pub struct StoreAuthenticator {
    store: Arc<dyn Store>,
}

impl StoreAuthenticator {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Authenticator for StoreAuthenticator {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, SignInError> {
        let user = self
            .store
            .find_user_by_email(&credentials.email)
            .await
            .map_err(|e: StoreError| AuthError::ProviderUnavailable(e.to_string()))?;

        // A missing user and a wrong password are indistinguishable to the
        // caller.
        let Some(user) = user else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(&user.password_digest, &credentials.password) {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(AuthUser {
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }
}

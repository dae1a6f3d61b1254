//! HS256 session tokens.
//!
//! Claims are validated deterministically against a caller-supplied `now`,
//! so expiry behavior is testable without clock control.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use tallydesk_core::UserId;

/// Session claims carried by the cookie token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the signed-in user.
    pub sub: Uuid,

    /// Email of the signed-in user (display, not authorization).
    pub email: String,

    /// Issued-at, seconds since the epoch.
    pub iat: i64,

    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl SessionClaims {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,

    #[error("token rejected: {0}")]
    Invalid(String),

    #[error("token encoding failed: {0}")]
    Encode(String),
}

/// Issues and validates HS256 session tokens under one shared secret.
pub struct Hs256Sessions {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Hs256Sessions {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a token for `user_id` valid for `ttl` from `now`.
    pub fn issue(
        &self,
        user_id: UserId,
        email: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, SessionError> {
        let claims = SessionClaims {
            sub: *user_id.as_uuid(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| SessionError::Encode(e.to_string()))
    }

    /// Decode the signature, then deterministically validate the time window
    /// against `now`.
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time checks happen below against the caller's clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let claims = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation)
            .map_err(|e| SessionError::Invalid(e.to_string()))?
            .claims;

        if claims.exp <= claims.iat {
            return Err(SessionError::InvalidTimeWindow);
        }
        if now.timestamp() < claims.iat {
            return Err(SessionError::NotYetValid);
        }
        if now.timestamp() >= claims.exp {
            return Err(SessionError::Expired);
        }
        Ok(claims)
    }
}

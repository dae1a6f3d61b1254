//! `tallydesk-auth` — credential sign-in and session boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it defines
//! the [`Authenticator`] seam, the discriminable error kinds the web layer
//! maps to user-facing messages, password digest handling, and the HS256
//! session token model. Wiring against the store happens in the web crate.

pub mod authenticator;
pub mod error;
pub mod password;
pub mod session;

pub use authenticator::{AuthUser, Authenticator, Credentials};
pub use error::{AuthError, SignInError};
pub use password::{hash_password, verify_password};
pub use session::{Hs256Sessions, SessionClaims, SessionError};

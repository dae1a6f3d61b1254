//! Store error model.

use thiserror::Error;

/// Error raised by a [`crate::Store`] implementation.
///
/// Callers in the action pipeline treat every variant the same way (log the
/// detail, surface a generic templated message); the variants exist so tests
/// and operators can tell failure classes apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The requested row does not exist.
    #[error("record not found")]
    NotFound,

    /// A database constraint rejected the statement (foreign key, unique,
    /// check).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// A fetched row could not be decoded into its record type.
    #[error("row decode failed: {0}")]
    Decode(String),

    /// The database could not be reached (pool closed, connect/IO failure).
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// Any other statement failure.
    #[error("query failed: {0}")]
    Query(String),
}

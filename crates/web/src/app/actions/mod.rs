//! The form-submission pipeline.
//!
//! Each action is a transition function over one submission attempt:
//! extract → validate → transform → persist → post-commit. Failures are
//! data, not exceptions, and navigation is a value the route layer acts on
//! only for [`ActionOutcome::Succeeded`]. The post-commit step (revalidate,
//! then hand back the redirect) sits after all failure handling, so the
//! navigation value can never be reclassified as a persistence failure.

use tallydesk_forms::FormState;

pub mod customers;
pub mod invoices;

/// Listing path of the invoices collection.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Listing path of the customers collection.
pub const CUSTOMERS_PATH: &str = "/dashboard/customers";

/// Terminal state of one create/update submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Schema validation failed; no side effects occurred.
    ValidationFailed(FormState),

    /// The store rejected the statement; detail was logged, the state
    /// carries only a generic templated message.
    PersistenceFailed(FormState),

    /// The row was written and the listing path revalidated; the caller
    /// performs the redirect.
    Succeeded { redirect: &'static str },
}

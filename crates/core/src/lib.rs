//! `tallydesk-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no persistence or HTTP
//! concerns): typed identifiers, the domain error model, monetary amounts in
//! minor units, and the invoice/customer records.

pub mod customer;
pub mod error;
pub mod id;
pub mod invoice;
pub mod money;

pub use customer::{Customer, PLACEHOLDER_IMAGE};
pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, InvoiceId, UserId};
pub use invoice::{Invoice, InvoiceStatus};
pub use money::Cents;

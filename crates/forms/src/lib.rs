//! `tallydesk-forms` — form decoding and validation schemas.
//!
//! Each schema takes the raw field-name → string map of one submission and
//! produces either a typed payload or a per-field error map. Schemas never
//! touch the store; uniqueness and referential failures surface later as
//! persistence errors.

pub mod credentials;
pub mod customer;
pub mod errors;
pub mod fields;
pub mod invoice;
pub mod state;

pub use credentials::{CredentialsPayload, CredentialsSchema};
pub use customer::{CustomerPayload, CustomerSchema};
pub use errors::FieldErrors;
pub use fields::RawFields;
pub use invoice::{InvoicePayload, InvoiceSchema};
pub use state::FormState;

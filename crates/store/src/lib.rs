//! `tallydesk-store` — the persistence boundary.
//!
//! The [`Store`] trait is the seam between the action pipeline and storage.
//! Two implementations are provided: [`PgStore`] (Postgres over sqlx, the
//! production path) and [`InMemoryStore`] (tests and storeless dev runs).
//! Every statement an implementation issues is parameterized; user input is
//! never interpolated into SQL text.

pub mod error;
pub mod in_memory;
pub mod postgres;
pub mod seed;
pub mod r#trait;

pub use error::StoreError;
pub use in_memory::InMemoryStore;
pub use postgres::PgStore;
pub use r#trait::{
    CardData, CustomerRef, CustomerTableRow, CustomerUpdate, InvoiceListRow, InvoiceUpdate,
    LatestInvoiceRow, NewCustomer, NewInvoice, NewUser, Store, UserRecord, ITEMS_PER_PAGE,
};

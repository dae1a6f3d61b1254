//! The `Store` trait and its row types.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use tallydesk_core::{Cents, Customer, CustomerId, Invoice, InvoiceId, InvoiceStatus, UserId};

use crate::error::StoreError;

/// Rows per page of the invoice listing.
pub const ITEMS_PER_PAGE: u32 = 6;

/// A validated, transformed invoice ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: CustomerId,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Fields an invoice update may change. The creation date is immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceUpdate {
    pub customer_id: CustomerId,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

/// A validated, transformed customer ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Fields a customer update may change. The image is managed separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub name: String,
    pub email: String,
}

/// A sign-in identity row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_digest: String,
}

/// A new sign-in identity (seed/admin path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_digest: String,
}

/// One row of the filtered invoice listing (invoice joined with customer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceListRow {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// One row of the latest-invoices panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestInvoiceRow {
    pub id: InvoiceId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: Cents,
}

/// Dashboard card aggregates. Totals are in cents and may be zero, so they
/// are plain integers rather than [`Cents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardData {
    pub invoice_count: i64,
    pub customer_count: i64,
    pub paid_cents: i64,
    pub pending_cents: i64,
}

/// Customer id + name pair for the invoice-form dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerRef {
    pub id: CustomerId,
    pub name: String,
}

/// One row of the customers table with per-customer invoice totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerTableRow {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending_cents: i64,
    pub total_paid_cents: i64,
}

/// Persistence seam for the action pipeline and the read side.
///
/// Implementations must:
/// - issue exactly one statement per mutation, with bound parameters
/// - surface constraint rejections as [`StoreError::Constraint`] so deferred
///   referential checks (invoice → customer) fail at this boundary
#[async_trait]
pub trait Store: Send + Sync {
    // Invoice mutations.
    async fn create_invoice(&self, invoice: NewInvoice) -> Result<InvoiceId, StoreError>;
    async fn update_invoice(&self, id: InvoiceId, update: InvoiceUpdate) -> Result<(), StoreError>;
    async fn delete_invoice(&self, id: InvoiceId) -> Result<(), StoreError>;

    // Invoice reads.
    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, StoreError>;
    async fn list_invoices(&self, query: &str, page: u32) -> Result<Vec<InvoiceListRow>, StoreError>;
    async fn invoice_pages(&self, query: &str) -> Result<u64, StoreError>;
    async fn latest_invoices(&self, limit: u32) -> Result<Vec<LatestInvoiceRow>, StoreError>;
    async fn card_data(&self) -> Result<CardData, StoreError>;

    // Customer mutations.
    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerId, StoreError>;
    async fn update_customer(&self, id: CustomerId, update: CustomerUpdate) -> Result<(), StoreError>;
    async fn delete_customer(&self, id: CustomerId) -> Result<(), StoreError>;

    // Customer reads.
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, StoreError>;
    async fn list_customers(&self) -> Result<Vec<CustomerRef>, StoreError>;
    async fn customers_table(&self, query: &str) -> Result<Vec<CustomerTableRow>, StoreError>;

    // Users (sign-in identities).
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;
    async fn create_user(&self, user: NewUser) -> Result<UserId, StoreError>;
}

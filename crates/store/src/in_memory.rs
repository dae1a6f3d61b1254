//! In-memory store for tests and storeless dev runs.
//!
//! Mirrors the Postgres implementation's observable behavior: the
//! invoice → customer reference is checked the way the foreign key would
//! check it, filters match the same stringified columns, and listing order
//! is date-descending with id as the tiebreaker.

use std::sync::Mutex;

use async_trait::async_trait;

use tallydesk_core::{Customer, CustomerId, Invoice, InvoiceId, InvoiceStatus, UserId};

use crate::error::StoreError;
use crate::r#trait::{
    CardData, CustomerRef, CustomerTableRow, CustomerUpdate, InvoiceListRow, InvoiceUpdate,
    LatestInvoiceRow, NewCustomer, NewInvoice, NewUser, Store, UserRecord, ITEMS_PER_PAGE,
};

#[derive(Debug, Default)]
struct Inner {
    invoices: Vec<Invoice>,
    customers: Vec<Customer>,
    users: Vec<UserRecord>,
}

/// Store backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored invoices (test helper).
    pub fn invoice_count(&self) -> usize {
        self.inner.lock().unwrap().invoices.len()
    }
}

fn matches_invoice(invoice: &Invoice, customer: &Customer, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    customer.name.to_lowercase().contains(&needle)
        || customer.email.to_lowercase().contains(&needle)
        || invoice.amount.get().to_string().contains(&needle)
        || invoice.date.to_string().contains(&needle)
        || invoice.status.as_str().contains(&needle)
}

fn matches_customer(customer: &Customer, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    customer.name.to_lowercase().contains(&needle)
        || customer.email.to_lowercase().contains(&needle)
}

impl Inner {
    fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Invoices joined with their customer, filtered and newest-first.
    fn filtered_invoices(&self, query: &str) -> Vec<(&Invoice, &Customer)> {
        let mut rows: Vec<(&Invoice, &Customer)> = self
            .invoices
            .iter()
            .filter_map(|inv| self.customer(inv.customer_id).map(|c| (inv, c)))
            .filter(|(inv, c)| matches_invoice(inv, c, query))
            .collect();
        rows.sort_by(|(a, _), (b, _)| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
        rows
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn create_invoice(&self, invoice: NewInvoice) -> Result<InvoiceId, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.customer(invoice.customer_id).is_none() {
            // Same failure the foreign key produces in Postgres.
            return Err(StoreError::Constraint(
                "invoices_customer_id_fkey".to_string(),
            ));
        }
        let id = InvoiceId::new();
        inner.invoices.push(Invoice {
            id,
            customer_id: invoice.customer_id,
            amount: invoice.amount,
            status: invoice.status,
            date: invoice.date,
        });
        Ok(id)
    }

    async fn update_invoice(&self, id: InvoiceId, update: InvoiceUpdate) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.customer(update.customer_id).is_none() {
            return Err(StoreError::Constraint(
                "invoices_customer_id_fkey".to_string(),
            ));
        }
        if let Some(invoice) = inner.invoices.iter_mut().find(|i| i.id == id) {
            invoice.customer_id = update.customer_id;
            invoice.amount = update.amount;
            invoice.status = update.status;
        }
        Ok(())
    }

    async fn delete_invoice(&self, id: InvoiceId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.invoices.retain(|i| i.id != id);
        Ok(())
    }

    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, StoreError> {
        let inner = self.inner.lock().unwrap();
        inner
            .invoices
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_invoices(&self, query: &str, page: u32) -> Result<Vec<InvoiceListRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let offset = page.saturating_sub(1) as usize * ITEMS_PER_PAGE as usize;
        Ok(inner
            .filtered_invoices(query)
            .into_iter()
            .skip(offset)
            .take(ITEMS_PER_PAGE as usize)
            .map(|(inv, c)| InvoiceListRow {
                id: inv.id,
                customer_id: inv.customer_id,
                name: c.name.clone(),
                email: c.email.clone(),
                image_url: c.image_url.clone(),
                amount: inv.amount,
                status: inv.status,
                date: inv.date,
            })
            .collect())
    }

    async fn invoice_pages(&self, query: &str) -> Result<u64, StoreError> {
        let inner = self.inner.lock().unwrap();
        let total = inner.filtered_invoices(query).len() as u64;
        Ok(total.div_ceil(u64::from(ITEMS_PER_PAGE)))
    }

    async fn latest_invoices(&self, limit: u32) -> Result<Vec<LatestInvoiceRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .filtered_invoices("")
            .into_iter()
            .take(limit as usize)
            .map(|(inv, c)| LatestInvoiceRow {
                id: inv.id,
                name: c.name.clone(),
                email: c.email.clone(),
                image_url: c.image_url.clone(),
                amount: inv.amount,
            })
            .collect())
    }

    async fn card_data(&self) -> Result<CardData, StoreError> {
        let inner = self.inner.lock().unwrap();
        let sum_by = |status: InvoiceStatus| {
            inner
                .invoices
                .iter()
                .filter(|i| i.status == status)
                .map(|i| i.amount.get())
                .sum()
        };
        Ok(CardData {
            invoice_count: inner.invoices.len() as i64,
            customer_count: inner.customers.len() as i64,
            paid_cents: sum_by(InvoiceStatus::Paid),
            pending_cents: sum_by(InvoiceStatus::Pending),
        })
    }

    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerId, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = CustomerId::new();
        inner.customers.push(Customer {
            id,
            name: customer.name,
            email: customer.email,
            image_url: customer.image_url,
        });
        Ok(id)
    }

    async fn update_customer(&self, id: CustomerId, update: CustomerUpdate) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(customer) = inner.customers.iter_mut().find(|c| c.id == id) {
            customer.name = update.name;
            customer.email = update.email;
        }
        Ok(())
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.invoices.iter().any(|i| i.customer_id == id) {
            // Postgres would refuse the delete while invoices still reference
            // the customer.
            return Err(StoreError::Constraint(
                "invoices_customer_id_fkey".to_string(),
            ));
        }
        inner.customers.retain(|c| c.id != id);
        Ok(())
    }

    async fn get_customer(&self, id: CustomerId) -> Result<Customer, StoreError> {
        let inner = self.inner.lock().unwrap();
        inner.customer(id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRef>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut refs: Vec<CustomerRef> = inner
            .customers
            .iter()
            .map(|c| CustomerRef {
                id: c.id,
                name: c.name.clone(),
            })
            .collect();
        refs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(refs)
    }

    async fn customers_table(&self, query: &str) -> Result<Vec<CustomerTableRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<CustomerTableRow> = inner
            .customers
            .iter()
            .filter(|c| matches_customer(c, query))
            .map(|c| {
                let invoices = inner.invoices.iter().filter(|i| i.customer_id == c.id);
                let (mut total, mut pending, mut paid) = (0i64, 0i64, 0i64);
                for invoice in invoices {
                    total += 1;
                    match invoice.status {
                        InvoiceStatus::Pending => pending += invoice.amount.get(),
                        InvoiceStatus::Paid => paid += invoice.amount.get(),
                    }
                }
                CustomerTableRow {
                    id: c.id,
                    name: c.name.clone(),
                    email: c.email.clone(),
                    image_url: c.image_url.clone(),
                    total_invoices: total,
                    total_pending_cents: pending,
                    total_paid_cents: paid,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<UserId, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Constraint("users_email_key".to_string()));
        }
        let id = UserId::new();
        inner.users.push(UserRecord {
            id,
            name: user.name,
            email: user.email,
            password_digest: user.password_digest,
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tallydesk_core::{Cents, PLACEHOLDER_IMAGE};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn seed_customer(store: &InMemoryStore, name: &str, email: &str) -> CustomerId {
        store
            .create_customer(NewCustomer {
                name: name.to_string(),
                email: email.to_string(),
                image_url: PLACEHOLDER_IMAGE.to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn invoice_referencing_missing_customer_is_a_constraint_error() {
        let store = InMemoryStore::new();
        let err = store
            .create_invoice(NewInvoice {
                customer_id: CustomerId::new(),
                amount: Cents::new(1000).unwrap(),
                status: InvoiceStatus::Pending,
                date: date("2026-08-07"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.invoice_count(), 0);
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_paginated() {
        let store = InMemoryStore::new();
        let customer = seed_customer(&store, "Ada Lovelace", "ada@example.com").await;
        for day in 1..=8u32 {
            store
                .create_invoice(NewInvoice {
                    customer_id: customer,
                    amount: Cents::new(i64::from(day) * 100).unwrap(),
                    status: InvoiceStatus::Pending,
                    date: date(&format!("2026-07-{day:02}")),
                })
                .await
                .unwrap();
        }

        let first = store.list_invoices("", 1).await.unwrap();
        assert_eq!(first.len(), ITEMS_PER_PAGE as usize);
        assert_eq!(first[0].date, date("2026-07-08"));

        let second = store.list_invoices("", 2).await.unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(store.invoice_pages("").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn filter_matches_customer_and_status_columns() {
        let store = InMemoryStore::new();
        let ada = seed_customer(&store, "Ada Lovelace", "ada@example.com").await;
        let grace = seed_customer(&store, "Grace Hopper", "grace@example.com").await;
        for (customer, status) in [(ada, InvoiceStatus::Paid), (grace, InvoiceStatus::Pending)] {
            store
                .create_invoice(NewInvoice {
                    customer_id: customer,
                    amount: Cents::new(500).unwrap(),
                    status,
                    date: date("2026-08-01"),
                })
                .await
                .unwrap();
        }

        let by_name = store.list_invoices("lovelace", 1).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Ada Lovelace");

        let by_status = store.list_invoices("paid", 1).await.unwrap();
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn card_data_totals_split_by_status() {
        let store = InMemoryStore::new();
        let customer = seed_customer(&store, "Ada Lovelace", "ada@example.com").await;
        for (cents, status) in [(1000, InvoiceStatus::Paid), (250, InvoiceStatus::Pending), (750, InvoiceStatus::Paid)] {
            store
                .create_invoice(NewInvoice {
                    customer_id: customer,
                    amount: Cents::new(cents).unwrap(),
                    status,
                    date: date("2026-08-01"),
                })
                .await
                .unwrap();
        }

        let cards = store.card_data().await.unwrap();
        assert_eq!(cards.invoice_count, 3);
        assert_eq!(cards.customer_count, 1);
        assert_eq!(cards.paid_cents, 1750);
        assert_eq!(cards.pending_cents, 250);
    }

    #[tokio::test]
    async fn deleting_a_referenced_customer_is_refused() {
        let store = InMemoryStore::new();
        let customer = seed_customer(&store, "Ada Lovelace", "ada@example.com").await;
        store
            .create_invoice(NewInvoice {
                customer_id: customer,
                amount: Cents::new(100).unwrap(),
                status: InvoiceStatus::Pending,
                date: date("2026-08-01"),
            })
            .await
            .unwrap();

        let err = store.delete_customer(customer).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert!(store.get_customer(customer).await.is_ok());
    }

    #[tokio::test]
    async fn customers_table_aggregates_per_customer() {
        let store = InMemoryStore::new();
        let ada = seed_customer(&store, "Ada Lovelace", "ada@example.com").await;
        seed_customer(&store, "Grace Hopper", "grace@example.com").await;
        store
            .create_invoice(NewInvoice {
                customer_id: ada,
                amount: Cents::new(300).unwrap(),
                status: InvoiceStatus::Pending,
                date: date("2026-08-01"),
            })
            .await
            .unwrap();

        let rows = store.customers_table("").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ada Lovelace");
        assert_eq!(rows[0].total_invoices, 1);
        assert_eq!(rows[0].total_pending_cents, 300);
        assert_eq!(rows[1].total_invoices, 0);
    }
}

//! Postgres-backed store implementation.
//!
//! Every mutation is a single parameterized statement; every read binds its
//! filter values. Nothing from the form boundary is ever spliced into SQL
//! text.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | Database (foreign key violation) | `23503` | `Constraint` | Invoice references a missing customer |
//! | Database (unique violation) | `23505` | `Constraint` | Duplicate user email |
//! | Database (check constraint violation) | `23514` | `Constraint` | Non-positive amount rejected at the schema level |
//! | Database (other) | Any other | `Query` | Other statement failures |
//! | RowNotFound | N/A | `NotFound` | Single-row fetch of a missing id |
//! | ColumnDecode / Decode | N/A | `Decode` | Row shape drifted from the record type |
//! | PoolClosed / Io | N/A | `Unavailable` | Pool shut down, connection refused |
//! | Other | N/A | `Query` | Anything else |

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use tallydesk_core::{Cents, Customer, CustomerId, Invoice, InvoiceId, InvoiceStatus, UserId};

use crate::error::StoreError;
use crate::r#trait::{
    CardData, CustomerRef, CustomerTableRow, CustomerUpdate, InvoiceListRow, InvoiceUpdate,
    LatestInvoiceRow, NewCustomer, NewInvoice, NewUser, Store, UserRecord, ITEMS_PER_PAGE,
};

/// Postgres-backed store.
///
/// Holds the process-wide `PgPool`; constructed once at startup and shared
/// via `Arc<dyn Store>`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect a small pool to `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests, callers managing their own lifecycle).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    #[instrument(skip(self, invoice), err)]
    async fn create_invoice(&self, invoice: NewInvoice) -> Result<InvoiceId, StoreError> {
        let id = InvoiceId::new();
        sqlx::query(
            r#"
            INSERT INTO invoices (id, customer_id, amount, status, date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id.as_uuid())
        .bind(invoice.customer_id.as_uuid())
        .bind(invoice.amount.get())
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(id)
    }

    #[instrument(skip(self, update), err)]
    async fn update_invoice(&self, id: InvoiceId, update: InvoiceUpdate) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE invoices
            SET customer_id = $1, amount = $2, status = $3
            WHERE id = $4
            "#,
        )
        .bind(update.customer_id.as_uuid())
        .bind(update.amount.get())
        .bind(update.status.as_str())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn delete_invoice(&self, id: InvoiceId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, StoreError> {
        let row = sqlx::query(
            "SELECT id, customer_id, amount, status, date FROM invoices WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(StoreError::NotFound)?;
        decode_invoice(&row)
    }

    #[instrument(skip(self), err)]
    async fn list_invoices(&self, query: &str, page: u32) -> Result<Vec<InvoiceListRow>, StoreError> {
        let pattern = like_pattern(query);
        let offset = i64::from(page.saturating_sub(1)) * i64::from(ITEMS_PER_PAGE);
        let rows = sqlx::query(
            r#"
            SELECT
                invoices.id,
                invoices.customer_id,
                invoices.amount,
                invoices.status,
                invoices.date,
                customers.name,
                customers.email,
                customers.image_url
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE
                customers.name ILIKE $1 OR
                customers.email ILIKE $1 OR
                invoices.amount::text ILIKE $1 OR
                invoices.date::text ILIKE $1 OR
                invoices.status ILIKE $1
            ORDER BY invoices.date DESC, invoices.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(i64::from(ITEMS_PER_PAGE))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(decode_invoice_list_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn invoice_pages(&self, query: &str) -> Result<u64, StoreError> {
        let pattern = like_pattern(query);
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE
                customers.name ILIKE $1 OR
                customers.email ILIKE $1 OR
                invoices.amount::text ILIKE $1 OR
                invoices.date::text ILIKE $1 OR
                invoices.status ILIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let total: i64 = row.try_get("total").map_err(decode_err)?;
        Ok((total as u64).div_ceil(u64::from(ITEMS_PER_PAGE)))
    }

    #[instrument(skip(self), err)]
    async fn latest_invoices(&self, limit: u32) -> Result<Vec<LatestInvoiceRow>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT invoices.id, invoices.amount, customers.name, customers.email, customers.image_url
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            ORDER BY invoices.date DESC, invoices.id DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| {
                Ok(LatestInvoiceRow {
                    id: InvoiceId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode_err)?),
                    name: row.try_get("name").map_err(decode_err)?,
                    email: row.try_get("email").map_err(decode_err)?,
                    image_url: row.try_get("image_url").map_err(decode_err)?,
                    amount: decode_cents(row.try_get("amount").map_err(decode_err)?)?,
                })
            })
            .collect()
    }

    #[instrument(skip(self), err)]
    async fn card_data(&self) -> Result<CardData, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM invoices) AS invoice_count,
                (SELECT COUNT(*) FROM customers) AS customer_count,
                (SELECT COALESCE(SUM(amount), 0) FROM invoices WHERE status = 'paid')::BIGINT AS paid_cents,
                (SELECT COALESCE(SUM(amount), 0) FROM invoices WHERE status = 'pending')::BIGINT AS pending_cents
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(CardData {
            invoice_count: row.try_get("invoice_count").map_err(decode_err)?,
            customer_count: row.try_get("customer_count").map_err(decode_err)?,
            paid_cents: row.try_get("paid_cents").map_err(decode_err)?,
            pending_cents: row.try_get("pending_cents").map_err(decode_err)?,
        })
    }

    #[instrument(skip(self, customer), err)]
    async fn create_customer(&self, customer: NewCustomer) -> Result<CustomerId, StoreError> {
        let id = CustomerId::new();
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, image_url)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.image_url)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(id)
    }

    #[instrument(skip(self, update), err)]
    async fn update_customer(&self, id: CustomerId, update: CustomerUpdate) -> Result<(), StoreError> {
        sqlx::query("UPDATE customers SET name = $1, email = $2 WHERE id = $3")
            .bind(&update.name)
            .bind(&update.email)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn delete_customer(&self, id: CustomerId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, StoreError> {
        let row = sqlx::query("SELECT id, name, email, image_url FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(StoreError::NotFound)?;

        Ok(Customer {
            id: CustomerId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode_err)?),
            name: row.try_get("name").map_err(decode_err)?,
            email: row.try_get("email").map_err(decode_err)?,
            image_url: row.try_get("image_url").map_err(decode_err)?,
        })
    }

    #[instrument(skip(self), err)]
    async fn list_customers(&self) -> Result<Vec<CustomerRef>, StoreError> {
        let rows = sqlx::query("SELECT id, name FROM customers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| {
                Ok(CustomerRef {
                    id: CustomerId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode_err)?),
                    name: row.try_get("name").map_err(decode_err)?,
                })
            })
            .collect()
    }

    #[instrument(skip(self), err)]
    async fn customers_table(&self, query: &str) -> Result<Vec<CustomerTableRow>, StoreError> {
        let pattern = like_pattern(query);
        let rows = sqlx::query(
            r#"
            SELECT
                customers.id,
                customers.name,
                customers.email,
                customers.image_url,
                COUNT(invoices.id) AS total_invoices,
                COALESCE(SUM(CASE WHEN invoices.status = 'pending' THEN invoices.amount ELSE 0 END), 0)::BIGINT AS total_pending,
                COALESCE(SUM(CASE WHEN invoices.status = 'paid' THEN invoices.amount ELSE 0 END), 0)::BIGINT AS total_paid
            FROM customers
            LEFT JOIN invoices ON customers.id = invoices.customer_id
            WHERE customers.name ILIKE $1 OR customers.email ILIKE $1
            GROUP BY customers.id, customers.name, customers.email, customers.image_url
            ORDER BY customers.name ASC
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(|row| {
                Ok(CustomerTableRow {
                    id: CustomerId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode_err)?),
                    name: row.try_get("name").map_err(decode_err)?,
                    email: row.try_get("email").map_err(decode_err)?,
                    image_url: row.try_get("image_url").map_err(decode_err)?,
                    total_invoices: row.try_get("total_invoices").map_err(decode_err)?,
                    total_pending_cents: row.try_get("total_pending").map_err(decode_err)?,
                    total_paid_cents: row.try_get("total_paid").map_err(decode_err)?,
                })
            })
            .collect()
    }

    #[instrument(skip(self), err)]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query("SELECT id, name, email, password FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(|row| {
            Ok(UserRecord {
                id: UserId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode_err)?),
                name: row.try_get("name").map_err(decode_err)?,
                email: row.try_get("email").map_err(decode_err)?,
                password_digest: row.try_get("password").map_err(decode_err)?,
            })
        })
        .transpose()
    }

    #[instrument(skip(self, user), err)]
    async fn create_user(&self, user: NewUser) -> Result<UserId, StoreError> {
        let id = UserId::new();
        sqlx::query("INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4)")
            .bind(id.as_uuid())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_digest)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(id)
    }
}

fn like_pattern(query: &str) -> String {
    format!("%{query}%")
}

fn decode_invoice(row: &PgRow) -> Result<Invoice, StoreError> {
    Ok(Invoice {
        id: InvoiceId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode_err)?),
        customer_id: CustomerId::from_uuid(row.try_get::<Uuid, _>("customer_id").map_err(decode_err)?),
        amount: decode_cents(row.try_get("amount").map_err(decode_err)?)?,
        status: decode_status(row.try_get::<String, _>("status").map_err(decode_err)?)?,
        date: row.try_get("date").map_err(decode_err)?,
    })
}

fn decode_invoice_list_row(row: &PgRow) -> Result<InvoiceListRow, StoreError> {
    Ok(InvoiceListRow {
        id: InvoiceId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode_err)?),
        customer_id: CustomerId::from_uuid(row.try_get::<Uuid, _>("customer_id").map_err(decode_err)?),
        name: row.try_get("name").map_err(decode_err)?,
        email: row.try_get("email").map_err(decode_err)?,
        image_url: row.try_get("image_url").map_err(decode_err)?,
        amount: decode_cents(row.try_get("amount").map_err(decode_err)?)?,
        status: decode_status(row.try_get::<String, _>("status").map_err(decode_err)?)?,
        date: row.try_get("date").map_err(decode_err)?,
    })
}

fn decode_cents(raw: i64) -> Result<Cents, StoreError> {
    Cents::new(raw).map_err(|e| StoreError::Decode(e.to_string()))
}

fn decode_status(raw: String) -> Result<InvoiceStatus, StoreError> {
    InvoiceStatus::from_str(&raw).map_err(|e| StoreError::Decode(e.to_string()))
}

fn decode_err(e: sqlx::Error) -> StoreError {
    StoreError::Decode(e.to_string())
}

/// Map a sqlx error per the table in the module docs.
fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::Decode(e.to_string())
        }
        sqlx::Error::PoolClosed | sqlx::Error::Io(_) => StoreError::Unavailable(e.to_string()),
        sqlx::Error::Database(db) => match db.code().as_deref() {
            Some("23503") | Some("23505") | Some("23514") => {
                StoreError::Constraint(db.message().to_string())
            }
            _ => StoreError::Query(db.message().to_string()),
        },
        _ => StoreError::Query(e.to_string()),
    }
}

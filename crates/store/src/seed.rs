//! Schema bootstrap and demo data.
//!
//! Both entry points are idempotent so they can run on every startup. The
//! foreign key from `invoices` to `customers` is the deferred referential
//! check for invoice submissions: nothing validates customer existence
//! before the insert reaches it.

use chrono::NaiveDate;
use uuid::{uuid, Uuid};

use crate::error::StoreError;
use crate::postgres::PgStore;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
)
"#;

const CREATE_CUSTOMERS: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    image_url TEXT NOT NULL
)
"#;

const CREATE_INVOICES: &str = r#"
CREATE TABLE IF NOT EXISTS invoices (
    id UUID PRIMARY KEY,
    customer_id UUID NOT NULL REFERENCES customers(id),
    amount BIGINT NOT NULL CHECK (amount > 0),
    status TEXT NOT NULL CHECK (status IN ('pending', 'paid')),
    date DATE NOT NULL
)
"#;

const DEMO_USER_ID: Uuid = uuid!("018f0000-0000-7000-8000-000000000001");
const DEMO_USER_EMAIL: &str = "user@tallydesk.dev";

const DEMO_CUSTOMERS: [(Uuid, &str, &str); 3] = [
    (
        uuid!("018f0000-0000-7000-8000-0000000000a1"),
        "Ada Lovelace",
        "ada@tallydesk.dev",
    ),
    (
        uuid!("018f0000-0000-7000-8000-0000000000a2"),
        "Grace Hopper",
        "grace@tallydesk.dev",
    ),
    (
        uuid!("018f0000-0000-7000-8000-0000000000a3"),
        "Alan Turing",
        "alan@tallydesk.dev",
    ),
];

const DEMO_INVOICES: [(Uuid, Uuid, i64, &str, &str); 4] = [
    (
        uuid!("018f0000-0000-7000-8000-0000000000b1"),
        uuid!("018f0000-0000-7000-8000-0000000000a1"),
        15795,
        "pending",
        "2026-06-05",
    ),
    (
        uuid!("018f0000-0000-7000-8000-0000000000b2"),
        uuid!("018f0000-0000-7000-8000-0000000000a2"),
        20348,
        "paid",
        "2026-06-14",
    ),
    (
        uuid!("018f0000-0000-7000-8000-0000000000b3"),
        uuid!("018f0000-0000-7000-8000-0000000000a3"),
        44800,
        "paid",
        "2026-07-03",
    ),
    (
        uuid!("018f0000-0000-7000-8000-0000000000b4"),
        uuid!("018f0000-0000-7000-8000-0000000000a1"),
        3040,
        "pending",
        "2026-07-21",
    ),
];

impl PgStore {
    /// Create the three tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in [CREATE_USERS, CREATE_CUSTOMERS, CREATE_INVOICES] {
            sqlx::query(statement)
                .execute(self.pool())
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?;
        }
        Ok(())
    }

    /// Insert the demo user, customers, and invoices; existing rows are left
    /// alone. `password_digest` is the demo user's already-hashed password
    /// (hashing lives behind the authentication boundary, not here).
    pub async fn seed_demo(&self, password_digest: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4) ON CONFLICT DO NOTHING",
        )
        .bind(DEMO_USER_ID)
        .bind("Demo User")
        .bind(DEMO_USER_EMAIL)
        .bind(password_digest)
        .execute(self.pool())
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        for (id, name, email) in DEMO_CUSTOMERS {
            sqlx::query(
                "INSERT INTO customers (id, name, email, image_url) VALUES ($1, $2, $3, $4) ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(name)
            .bind(email)
            .bind(tallydesk_core::PLACEHOLDER_IMAGE)
            .execute(self.pool())
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        }

        for (id, customer_id, amount, status, day) in DEMO_INVOICES {
            let date: NaiveDate = day
                .parse()
                .map_err(|_| StoreError::Query(format!("bad seed date: {day}")))?;
            sqlx::query(
                "INSERT INTO invoices (id, customer_id, amount, status, date) VALUES ($1, $2, $3, $4, $5) ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(customer_id)
            .bind(amount)
            .bind(status)
            .bind(date)
            .execute(self.pool())
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        }

        Ok(())
    }
}

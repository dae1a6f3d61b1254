//! Environment-derived configuration, read once at startup.

/// Process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Absent means the in-memory store.
    pub database_url: Option<String>,

    /// HS256 secret for session tokens.
    pub session_secret: String,

    /// Listen address.
    pub bind_addr: String,

    /// Whether to insert demo rows after schema bootstrap.
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").ok();

        let session_secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
            tracing::warn!("SESSION_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let seed_demo = std::env::var("SEED_DEMO")
            .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        Self {
            database_url,
            session_secret,
            bind_addr,
            seed_demo,
        }
    }
}

use std::sync::Arc;

use tallydesk_store::{InMemoryStore, PgStore, Store};
use tallydesk_web::app::services::AppServices;
use tallydesk_web::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tallydesk_observability::init();

    let config = Config::from_env();

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url).await?;
            store.ensure_schema().await?;
            if config.seed_demo {
                store
                    .seed_demo(&tallydesk_auth::hash_password("123456"))
                    .await?;
                tracing::info!("seeded demo data");
            }
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            Arc::new(InMemoryStore::new())
        }
    };

    let services = Arc::new(AppServices::new(store, config.session_secret.as_bytes()));
    let app = tallydesk_web::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

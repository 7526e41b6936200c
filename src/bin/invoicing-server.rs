//! Invoicing server
//!
//! Reads `INVOICING_CONFIG` (YAML) when set; `RUST_LOG` controls logging.

use anyhow::Result;
use invoicing::config::AppConfig;
use invoicing::server::ServerBuilder;
use invoicing::storage::InMemoryInvoiceStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let builder = ServerBuilder::new().with_config(config.clone());

    let builder = match config.database.url.as_deref() {
        Some(url) => with_database(builder, url).await?,
        None => {
            tracing::info!("No database configured, using the in-memory store");
            builder.with_store(InMemoryInvoiceStore::new())
        }
    };

    builder.serve().await
}

#[cfg(feature = "postgres")]
async fn with_database(builder: ServerBuilder, url: &str) -> Result<ServerBuilder> {
    use invoicing::storage::postgres::{PostgresInvoiceStore, ensure_schema};

    let pool = sqlx::PgPool::connect(url).await?;
    ensure_schema(&pool).await?;
    tracing::info!("Connected to PostgreSQL");
    Ok(builder.with_store(PostgresInvoiceStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn with_database(_builder: ServerBuilder, _url: &str) -> Result<ServerBuilder> {
    Err(invoicing::core::error::StorageError::Unavailable {
        backend: "postgres".to_string(),
    }
    .into())
}

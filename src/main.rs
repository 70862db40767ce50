use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use agenda::config::{AppConfig, StoreBackend};
use agenda::db;
use agenda::state::AppState;
use agenda::store::{BookingStore, MemoryBookingStore, SqliteBookingStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let store: Box<dyn BookingStore> = match config.store {
        StoreBackend::Sqlite => {
            tracing::info!("using SQLite booking store (path: {})", config.database_url);
            let conn = db::init_db(&config.database_url)?;
            Box::new(SqliteBookingStore::new(conn))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory booking store, bookings are lost on restart");
            Box::new(MemoryBookingStore::new())
        }
    };

    let state = Arc::new(AppState { store });
    let app = agenda::build_router(state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(static_dir = %config.static_dir.display(), "starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

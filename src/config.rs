use std::env;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl StoreBackend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Some(StoreBackend::Sqlite),
            "memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }

    fn from_env_value(value: Option<String>) -> Self {
        let Some(value) = value else {
            return StoreBackend::Sqlite;
        };
        StoreBackend::parse(&value).unwrap_or_else(|| {
            tracing::warn!(
                value = %value,
                "unrecognised BOOKING_STORE (expected sqlite or memory), falling back to sqlite"
            );
            StoreBackend::Sqlite
        })
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub static_dir: PathBuf,
    pub store: StoreBackend,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "agenda.db".to_string()),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
            store: StoreBackend::from_env_value(env::var("BOOKING_STORE").ok()),
        }
    }
}

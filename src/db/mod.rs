use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

pub mod kv;

pub use kv::{MemoryStore, SqlKeyValueStore};

/// Open the SQLite database at `database_url` and create tables
pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    // One connection keeps `sqlite::memory:` a single shared database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    create_tables(&pool).await?;
    info!("Database ready at {}", database_url);

    Ok(pool)
}

async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS kv_store (\
            key TEXT PRIMARY KEY NOT NULL, \
            value TEXT NOT NULL, \
            date_updated TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP\
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

use anyhow::{Context, Result};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

/// Schema for the `clipboard_entries` table, compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const IN_MEMORY_URL: &str = ":memory:";

/// Open the history database at `database_url` and bring its schema up to date.
///
/// Every SQLite connection to `:memory:` opens its own database, so an
/// in-memory pool is limited to a single connection.
pub fn init_db_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    let mut builder = Pool::builder();
    if database_url == IN_MEMORY_URL {
        builder = builder.max_size(1);
    }
    let pool = builder
        .build(manager)
        .with_context(|| format!("failed to create database pool for {}", database_url))?;

    run_migrations(&pool)?;

    Ok(pool)
}

fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get()?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("history schema migration failed: {}", e))?;
    if !applied.is_empty() {
        info!("Applied {} history schema migration(s)", applied.len());
    }

    Ok(())
}

use diesel::SqliteConnection;

/// Runs a unit of work on a pooled SQLite connection.
///
/// Repositories only see this seam, so tests can swap the pool for an
/// in-memory database.
pub trait DbExecutor: Send + Sync {
    fn run<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> anyhow::Result<T>,
    ) -> anyhow::Result<T>;
}

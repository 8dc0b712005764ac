use diesel::SqliteConnection;

use crate::db::error::DbError;

/// Runs a closure against a pooled SQLite connection.
///
/// Closures use `?` on diesel errors directly; the executor adds pool
/// failures on top.
pub trait DbExecutor: Send + Sync {
    fn run<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> Result<T, DbError>,
    ) -> Result<T, DbError>;
}

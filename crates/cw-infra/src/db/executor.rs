use diesel::SqliteConnection;
use tracing::warn;

use crate::db::error::DbError;
use crate::db::pool::DbPool;
use crate::db::ports::DbExecutor;

/// [`DbExecutor`] over the r2d2 pool. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct DieselSqliteExecutor {
    pool: DbPool,
}

impl DieselSqliteExecutor {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl DbExecutor for DieselSqliteExecutor {
    fn run<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> Result<T, DbError>,
    ) -> Result<T, DbError> {
        let mut conn = self.pool.get().map_err(|e| {
            warn!(error = %e, "no database connection available");
            DbError::Pool(e)
        })?;
        f(&mut conn)
    }
}

use crate::db::error::DbError;

/// Domain value to insertable row.
pub trait InsertMapper<D, R>: Sync + Send {
    fn to_row(&self, domain: &D) -> R;
}

/// Stored row back to domain value. Fails on values the domain rejects.
pub trait RowMapper<R, D>: Sync + Send {
    fn to_domain(&self, row: &R) -> Result<D, DbError>;
}

use diesel::r2d2::PoolError;
use thiserror::Error;

use cw_core::ports::CredentialStoreError;

/// Failures inside the SQLite layer.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    /// A stored value that cannot be turned back into a domain value.
    #[error("invalid {field} in stored row: {detail}")]
    Mapping { field: &'static str, detail: String },
}

impl From<DbError> for CredentialStoreError {
    fn from(err: DbError) -> Self {
        CredentialStoreError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_error_names_the_field() {
        let err: CredentialStoreError = DbError::Mapping {
            field: "last_login",
            detail: "out of range".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "storage error: invalid last_login in stored row: out of range"
        );
    }
}

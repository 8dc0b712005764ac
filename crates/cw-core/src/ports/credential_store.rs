use async_trait::async_trait;

use crate::credential::Credential;

use super::errors::CredentialStoreError;

/// Durable storage for cached login credentials.
///
/// 登录凭证的持久化存储。
#[async_trait]
pub trait CredentialStorePort: Send + Sync {
    /// Insert or replace the row keyed by telephone. The stored `last_login`
    /// is the current time, whatever the argument carries; the stored
    /// credential is returned.
    async fn upsert(&self, credential: Credential) -> Result<Credential, CredentialStoreError>;

    /// Row with the greatest `last_login`, or `None` when the store is empty.
    async fn most_recent(&self) -> Result<Option<Credential>, CredentialStoreError>;

    /// Delete every row.
    async fn clear(&self) -> Result<(), CredentialStoreError>;
}

use cw_core::ports::{BackendError, CredentialStoreError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Missing user input; never reaches the backend.
    #[error("{0}")]
    Validation(String),

    #[error("another operation is in progress")]
    Busy,

    #[error("not logged in")]
    NotLoggedIn,

    #[error("already logged in as {0}, log out first")]
    AlreadyLoggedIn(String),

    #[error(transparent)]
    Remote(#[from] BackendError),

    /// The stored credential was rejected during the startup check.
    #[error("stored credentials expired, please log in again")]
    ExpiredCredential(#[source] BackendError),

    /// Stop requested but the backend reported no running order.
    #[error("valve is not open")]
    ValveNotOpen,

    #[error("credential storage failed: {0}")]
    Storage(#[from] CredentialStoreError),
}

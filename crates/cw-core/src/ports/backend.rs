use async_trait::async_trait;

use crate::auth::LoginToken;
use crate::credential::{Credential, LoginProfile};
use crate::session::Balance;
use crate::valve::{OrderNo, StartOutcome};

use super::errors::BackendError;

/// The metering backend's four remote calls.
///
/// Implementations hold no session state: every authenticated call takes the
/// credential explicitly.
#[async_trait]
pub trait BackendPort: Send + Sync {
    async fn login(&self, telephone: &str, token: &LoginToken)
        -> Result<LoginProfile, BackendError>;

    /// `Ok(None)` when the backend accepts the call but sends no readable amount.
    async fn balance(&self, credential: &Credential) -> Result<Option<Balance>, BackendError>;

    /// `errorCode=307` is reported as [`StartOutcome::AlreadyRunning`], not as an error.
    async fn start_valve(&self, credential: &Credential) -> Result<StartOutcome, BackendError>;

    async fn stop_valve(
        &self,
        credential: &Credential,
        order_no: &OrderNo,
    ) -> Result<(), BackendError>;
}

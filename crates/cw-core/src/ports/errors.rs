use std::fmt::{Display, Formatter};

use thiserror::Error;

/// The four remote calls of the metering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Balance,
    StartValve,
    StopValve,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Login => "/user/login",
            Endpoint::Balance => "/account/wallet",
            Endpoint::StartValve => "/order/tcpDevice/downRate/rateOrder",
            Endpoint::StopValve => "/order/tcpDevice/closeOrder",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::Balance => "balance",
            Endpoint::StartValve => "start-valve",
            Endpoint::StopValve => "stop-valve",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Transport failure, non-2xx status, non-JSON body or `success=false`.
    #[error("{endpoint} failed: {message}")]
    RemoteCallFailed { endpoint: Endpoint, message: String },
}

impl BackendError {
    pub fn remote(endpoint: Endpoint, message: impl Into<String>) -> Self {
        BackendError::RemoteCallFailed {
            endpoint,
            message: message.into(),
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            BackendError::RemoteCallFailed { endpoint, .. } => *endpoint,
        }
    }

    /// Message suitable for a notification, without the endpoint prefix.
    pub fn message(&self) -> &str {
        match self {
            BackendError::RemoteCallFailed { message, .. } => message,
        }
    }
}

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}

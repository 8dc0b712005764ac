//! Valve order types.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Backend identifier of the order backing a running valve session.
///
/// Only obtainable from a start-valve call answering `errorCode=307`;
/// required by the close call. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderNo(String);

impl OrderNo {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderNo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderNo {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderNo {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Result of a start-valve call that the caller may treat as success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StartOutcome {
    /// `success=true`: the valve was opened by this call.
    Opened,
    /// `errorCode=307`: the valve is already running under this account.
    AlreadyRunning { order_no: OrderNo },
}

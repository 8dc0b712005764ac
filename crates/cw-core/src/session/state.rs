use serde::Serialize;

use super::Balance;
use crate::credential::Credential;

/// Controller state as seen by a front-end.
///
/// 控制器状态（供前端渲染）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Login view.
    LoggedOut,
    /// Login request in flight.
    Authenticating,
    /// Startup check of a stored credential.
    Validating,
    /// Credential held, controls enabled.
    Ready,
    /// Valve or refresh operation in flight, controls locked.
    Busy,
}

/// The single login session owned by the controller.
///
/// Empty at startup; populated from a login response or the credential
/// store; cleared on logout and on failed startup validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub credential: Option<Credential>,
    pub balance: Option<Balance>,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Some(credential),
            balance: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.credential.is_some()
    }

    pub fn clear(&mut self) {
        self.credential = None;
        self.balance = None;
    }

    /// State to fall back to once no operation is in flight.
    pub fn resting_state(&self) -> SessionState {
        if self.is_logged_in() {
            SessionState::Ready
        } else {
            SessionState::LoggedOut
        }
    }
}

/// What observers receive on every state change. Contains no secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub telephone: Option<String>,
    pub balance: Option<Balance>,
}

impl SessionSnapshot {
    pub fn logged_out() -> Self {
        Self {
            state: SessionState::LoggedOut,
            telephone: None,
            balance: None,
        }
    }

    pub fn of(session: &Session, state: SessionState) -> Self {
        Self {
            state,
            telephone: session.credential.as_ref().map(|c| c.telephone.clone()),
            balance: session.balance.clone(),
        }
    }
}

use cw_app::SessionError;
use cw_core::{Balance, SessionSnapshot, SessionState};

/// One status line: `13800000000  ¥ 12.50  [ready]`.
pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    match &snapshot.telephone {
        None => "not logged in".to_string(),
        Some(phone) => format!(
            "{}  {}  [{}]",
            phone,
            Balance::render(snapshot.balance.as_ref()),
            state_label(snapshot.state)
        ),
    }
}

pub fn render_json(snapshot: &SessionSnapshot) -> String {
    serde_json::to_string_pretty(snapshot).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::LoggedOut => "logged out",
        SessionState::Authenticating => "logging in",
        SessionState::Validating => "checking",
        SessionState::Ready => "ready",
        SessionState::Busy => "busy",
    }
}

/// Errors the controller rejects without sending a notification.
pub fn needs_report(err: &SessionError) -> bool {
    matches!(
        err,
        SessionError::Busy | SessionError::NotLoggedIn | SessionError::AlreadyLoggedIn(_)
    )
}

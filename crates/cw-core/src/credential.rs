//! Cached login credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity fields returned by a successful login.
///
/// 登录成功后后端返回的身份信息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginProfile {
    pub telephone: String,
    pub user_id: i64,
    /// Opaque token sent instead of the password on every authenticated call.
    pub login_code: String,
    pub account_id: i64,
    pub project_id: i64,
}

/// One persisted credential row, unique per telephone.
///
/// 持久化的凭证记录，每个手机号唯一。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub telephone: String,
    pub user_id: i64,
    pub login_code: String,
    pub account_id: i64,
    pub project_id: i64,
    pub last_login: DateTime<Utc>,
}

impl Credential {
    pub fn from_profile(profile: LoginProfile, last_login: DateTime<Utc>) -> Self {
        Self {
            telephone: profile.telephone,
            user_id: profile.user_id,
            login_code: profile.login_code,
            account_id: profile.account_id,
            project_id: profile.project_id,
            last_login,
        }
    }
}

// login_code is a bearer token
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("telephone", &self.telephone)
            .field("user_id", &self.user_id)
            .field("login_code", &"***")
            .field("account_id", &self.account_id)
            .field("project_id", &self.project_id)
            .field("last_login", &self.last_login)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_login_code() {
        let credential = Credential::from_profile(
            LoginProfile {
                telephone: "13800000000".to_string(),
                user_id: 1,
                login_code: "secret-code".to_string(),
                account_id: 2,
                project_id: 30,
            },
            Utc::now(),
        );

        let debug = format!("{:?}", credential);
        assert!(!debug.contains("secret-code"));
        assert!(debug.contains("13800000000"));
    }
}

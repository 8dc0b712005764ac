//! Wire shapes of backend responses.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Error code the start-valve call returns while the valve is already running.
pub const ERROR_CODE_DEVICE_IN_USE: i64 = 307;

/// Envelope shared by every endpoint: `{success, errorCode?, errorMessage?, data?}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error_code: Option<Value>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiEnvelope {
    /// `errorCode` may arrive as a number or a numeric string.
    pub fn has_error_code(&self, code: i64) -> bool {
        match &self.error_code {
            Some(Value::Number(n)) => n.as_i64() == Some(code),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok() == Some(code),
            _ => false,
        }
    }

    /// Backend message, ignoring blank strings.
    pub fn message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    pub fn data_field(&self, key: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|d| d.get(key))
    }
}

/// `data` of a successful login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(deserialize_with = "lenient_i64")]
    pub user_id: i64,
    pub login_code: String,
    pub user_account: UserAccount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(deserialize_with = "lenient_i64")]
    pub account_id: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub project_id: i64,
}

/// Ids are numbers in practice, but tolerate numeric strings.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom(format!("expected integer, got {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("expected integer, got {:?}", s))),
        other => Err(serde::de::Error::custom(format!(
            "expected integer, got {}",
            other
        ))),
    }
}

/// Order numbers are opaque; render numbers without quotes.
pub fn value_to_order_no(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Account balance exactly as the backend reported it in `data.money`.
///
/// 余额按后端返回的十进制文本保存，不做浮点转换。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(String);

impl Balance {
    /// Accepts a JSON number or a numeric string; anything else is `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            serde_json::Value::String(s) if is_decimal(s.trim()) => Some(Self(s.trim().to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `¥ 12.34`, or the placeholder when unknown.
    pub fn render(balance: Option<&Balance>) -> String {
        match balance {
            Some(b) => format!("¥ {}", b),
            None => "¥ --.--".to_string(),
        }
    }
}

impl Display for Balance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_decimal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut parts = digits.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next();
    !int_part.is_empty()
        && int_part.chars().all(|c| c.is_ascii_digit())
        && frac_part.map_or(true, |f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_keeps_decimal_text() {
        assert_eq!(Balance::from_json(&json!(12.5)).unwrap().as_str(), "12.5");
        assert_eq!(Balance::from_json(&json!(3)).unwrap().as_str(), "3");
        assert_eq!(Balance::from_json(&json!("7.80")).unwrap().as_str(), "7.80");
        assert_eq!(Balance::from_json(&json!("-0.20")).unwrap().as_str(), "-0.20");
    }

    #[test]
    fn from_json_rejects_non_amounts() {
        assert!(Balance::from_json(&json!(null)).is_none());
        assert!(Balance::from_json(&json!("abc")).is_none());
        assert!(Balance::from_json(&json!("1.")).is_none());
        assert!(Balance::from_json(&json!({"money": 1})).is_none());
    }

    #[test]
    fn render_uses_placeholder_when_unknown() {
        assert_eq!(Balance::render(None), "¥ --.--");
        let b = Balance::from_json(&json!("7.80")).unwrap();
        assert_eq!(Balance::render(Some(&b)), "¥ 7.80");
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::error::LoginError;

#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// 密碼不得出現在日誌中
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// 頁面元素定位方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locator {
    Id(String),
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn id(value: impl Into<String>) -> Self {
        Locator::Id(value.into())
    }

    pub fn css(value: impl Into<String>) -> Self {
        Locator::Css(value.into())
    }

    pub fn value(&self) -> &str {
        match self {
            Locator::Id(v) | Locator::Css(v) | Locator::XPath(v) => v,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(v) => write!(f, "id:{}", v),
            Locator::Css(v) => write!(f, "css:{}", v),
            Locator::XPath(v) => write!(f, "xpath:{}", v),
        }
    }
}

impl FromStr for Locator {
    type Err = LoginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let locator = if let Some(rest) = s.strip_prefix("id:") {
            Locator::Id(rest.trim().to_string())
        } else if let Some(rest) = s.strip_prefix("xpath:") {
            Locator::XPath(rest.trim().to_string())
        } else if let Some(rest) = s.strip_prefix("css:") {
            Locator::Css(rest.trim().to_string())
        } else {
            Locator::Css(s.to_string())
        };

        if locator.value().is_empty() {
            return Err(LoginError::InvalidConfigValueError {
                field: "selector".to_string(),
                value: s.to_string(),
                reason: "Selector cannot be empty".to_string(),
            });
        }
        Ok(locator)
    }
}

impl TryFrom<String> for Locator {
    type Error = LoginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locator> for String {
    fn from(locator: Locator) -> Self {
        locator.to_string()
    }
}

/// 有界輪詢：最多等 `timeout`，每 `interval` 重試一次
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSpec {
    pub timeout: Duration,
    pub interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// 找到成功指示元素但不可見
    NotDisplayed,
    /// 等待成功指示元素逾時
    Timeout,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NotDisplayed => write!(f, "Success indicator found but not visible."),
            FailureReason::Timeout => write!(
                f,
                "Timeout waiting for login success. Check credentials or network."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Passed,
    Failed {
        reason: FailureReason,
        alert: Option<String>,
    },
}

impl LoginOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, LoginOutcome::Passed)
    }

    pub fn alert(&self) -> Option<&str> {
        match self {
            LoginOutcome::Passed => None,
            LoginOutcome::Failed { alert, .. } => alert.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locator_prefixes() {
        assert_eq!("id:login-email".parse::<Locator>().unwrap(), Locator::id("login-email"));
        assert_eq!(
            "css:#login-form button[type='submit']".parse::<Locator>().unwrap(),
            Locator::css("#login-form button[type='submit']")
        );
        assert_eq!(
            "xpath://button[text()='Log in']".parse::<Locator>().unwrap(),
            Locator::XPath("//button[text()='Log in']".to_string())
        );
        // 無前綴視為 CSS
        assert_eq!("#user-actions".parse::<Locator>().unwrap(), Locator::css("#user-actions"));
    }

    #[test]
    fn test_empty_locator_is_rejected() {
        assert!("id:".parse::<Locator>().is_err());
        assert!("   ".parse::<Locator>().is_err());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("user@example.com", "wrongpass");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("wrongpass"));
    }

    #[test]
    fn test_locator_serde_uses_prefixed_strings() {
        let json = serde_json::to_string(&Locator::id("user-actions")).unwrap();
        assert_eq!(json, "\"id:user-actions\"");
        let back: Locator = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Locator::id("user-actions"));
    }
}

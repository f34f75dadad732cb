use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Timed out after {after:?} waiting for {what}")]
    Timeout { what: String, after: Duration },

    #[error("WebDriver command '{command}' failed: {error}: {message}")]
    WebDriverError {
        command: String,
        error: String,
        message: String,
    },

    /// 頁面開著原生對話框時，驅動程式拒絕執行命令
    #[error("WebDriver command '{command}' blocked by an open alert")]
    AlertOpen {
        command: String,
        text: Option<String>,
    },

    #[error("Failed to launch browser driver: {message}")]
    DriverLaunchError { message: String },

    #[error("WebDriver endpoint {url} is unavailable: {message}")]
    DriverUnavailable { url: String, message: String },
}

pub type Result<T> = std::result::Result<T, LoginError>;

/// 兩種錯誤性質：等待逾時與其他非預期錯誤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    UnexpectedFault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Configuration,
    Driver,
    Browser,
    Timeout,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

// WebDriver 標準錯誤碼
pub const NO_SUCH_ELEMENT: &str = "no such element";
pub const STALE_ELEMENT_REFERENCE: &str = "stale element reference";
pub const NO_SUCH_ALERT: &str = "no such alert";
pub const SESSION_NOT_CREATED: &str = "session not created";

impl LoginError {
    pub fn config(message: impl Into<String>) -> Self {
        LoginError::ConfigError {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LoginError::Timeout { .. } => ErrorKind::Timeout,
            _ => ErrorKind::UnexpectedFault,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LoginError::ConfigError { .. }
            | LoginError::MissingConfigError { .. }
            | LoginError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LoginError::HttpError(_)
            | LoginError::DriverLaunchError { .. }
            | LoginError::DriverUnavailable { .. } => ErrorCategory::Driver,
            LoginError::WebDriverError { .. } | LoginError::AlertOpen { .. } => {
                ErrorCategory::Browser
            }
            LoginError::Timeout { .. } => ErrorCategory::Timeout,
            LoginError::IoError(_) | LoginError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Timeout => ErrorSeverity::Medium,
            ErrorCategory::Browser => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Driver | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// WebDriver 回報的錯誤碼是否為指定值
    pub fn is_webdriver_error(&self, code: &str) -> bool {
        matches!(self, LoginError::WebDriverError { error, .. } if error == code)
    }

    /// 輪詢等待時可忽略的暫時性錯誤（元素尚未出現或已過期）
    pub fn is_transient_lookup(&self) -> bool {
        self.is_webdriver_error(NO_SUCH_ELEMENT) || self.is_webdriver_error(STALE_ELEMENT_REFERENCE)
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the config file and command-line flags; run with --dry-run to see the resolved settings".to_string()
            }
            ErrorCategory::Driver => {
                "Make sure chromedriver/geckodriver is running at the driver URL, or pass --driver-path so it can be started".to_string()
            }
            ErrorCategory::Browser => {
                "Verify the selectors still match the page and that the browser version matches the driver".to_string()
            }
            ErrorCategory::Timeout => {
                "Check the target URL and network, or raise --timeout-seconds".to_string()
            }
            ErrorCategory::System => "Check file permissions and available disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LoginError::Timeout { what, after } => {
                format!("Gave up waiting for {} after {}s", what, after.as_secs_f32())
            }
            LoginError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            LoginError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            LoginError::HttpError(e) if e.is_connect() => {
                "Could not connect to the browser driver".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match (self.kind(), self.category()) {
            (_, ErrorCategory::Configuration) => 2,
            (ErrorKind::Timeout, _) => 3,
            _ => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn webdriver(code: &str) -> LoginError {
        LoginError::WebDriverError {
            command: "find element".to_string(),
            error: code.to_string(),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_timeout_is_its_own_kind() {
        let err = LoginError::Timeout {
            what: "email field".to_string(),
            after: Duration::from_secs(10),
        };
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("email field"));
    }

    #[test]
    fn test_everything_else_is_unexpected() {
        assert_eq!(webdriver("unknown error").kind(), ErrorKind::UnexpectedFault);
        assert_eq!(LoginError::config("bad").kind(), ErrorKind::UnexpectedFault);
        assert_eq!(webdriver("unknown error").exit_code(), 4);
        assert_eq!(LoginError::config("bad").exit_code(), 2);
    }

    #[test]
    fn test_transient_lookup_errors() {
        assert!(webdriver(NO_SUCH_ELEMENT).is_transient_lookup());
        assert!(webdriver(STALE_ELEMENT_REFERENCE).is_transient_lookup());
        assert!(!webdriver("invalid selector").is_transient_lookup());
        assert!(!LoginError::AlertOpen {
            command: "is displayed".to_string(),
            text: None,
        }
        .is_transient_lookup());
    }

    #[test]
    fn test_unreachable_driver_is_driver_category() {
        let err = LoginError::DriverUnavailable {
            url: "http://127.0.0.1:1".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Driver);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 4);
    }
}

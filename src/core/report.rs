use crate::config::LoginConfig;
use crate::domain::model::{FailureReason, LoginOutcome};
use crate::utils::error::{ErrorCategory, ErrorKind, LoginError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Passed,
    Failed,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub category: ErrorCategory,
    pub message: String,
    pub suggestion: String,
    pub exit_code: i32,
}

impl From<&LoginError> for ErrorDetail {
    fn from(e: &LoginError) -> Self {
        Self {
            kind: e.kind(),
            category: e.category(),
            message: e.user_friendly_message(),
            suggestion: e.recovery_suggestion(),
            exit_code: e.exit_code(),
        }
    }
}

/// 單次執行結果，可寫成 JSON 供 CI 使用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub target_url: String,
    pub email: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl RunReport {
    pub fn new(
        config: &LoginConfig,
        started_at: DateTime<Utc>,
        elapsed: Duration,
        result: &Result<LoginOutcome>,
    ) -> Self {
        let (status, reason, error) = match result {
            Ok(LoginOutcome::Passed) => (RunStatus::Passed, None, None),
            Ok(LoginOutcome::Failed { reason, .. }) => (RunStatus::Failed, Some(*reason), None),
            Err(e) => (RunStatus::Error, None, Some(ErrorDetail::from(e))),
        };
        let alert = result
            .as_ref()
            .ok()
            .and_then(LoginOutcome::alert)
            .map(str::to_string);

        Self {
            target_url: config.target.url.clone(),
            email: config.credentials.email.clone(),
            started_at,
            duration_ms: elapsed.as_millis() as u64,
            status,
            reason,
            alert,
            error,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == RunStatus::Passed
    }

    pub fn exit_code(&self) -> i32 {
        match (&self.status, &self.error) {
            (RunStatus::Passed, _) => 0,
            (RunStatus::Failed, _) => 1,
            (RunStatus::Error, Some(detail)) => detail.exit_code,
            (RunStatus::Error, None) => 4,
        }
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

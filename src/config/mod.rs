#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::{Credentials, Locator, PollSpec};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TARGET_URL: &str = "https://indidict.netlify.app/";
pub const DEFAULT_DRIVER_URL: &str = "http://localhost:9515";

/// 解析完成的執行設定（預設值 → TOML 檔 → 命令列）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoginConfig {
    pub target: TargetConfig,
    pub credentials: Credentials,
    pub wait: WaitConfig,
    pub selectors: Selectors,
    pub driver: DriverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TargetConfig {
    pub url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TARGET_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaitConfig {
    pub timeout_seconds: u64,
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            poll_interval_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Selectors {
    pub email: Locator,
    pub password: Locator,
    pub submit: Locator,
    pub success: Locator,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            email: Locator::id("login-email"),
            password: Locator::id("login-password"),
            submit: Locator::css("#login-form button[type='submit']"),
            success: Locator::id("user-actions"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    /// WebDriver 端點
    pub url: String,
    /// 驅動程式執行檔；設定後由本程式啟動並在結束時關閉
    pub path: Option<String>,
    pub browser: BrowserKind,
    pub headless: bool,
    pub args: Vec<String>,
    pub startup_timeout_seconds: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DRIVER_URL.to_string(),
            path: None,
            browser: BrowserKind::Chrome,
            headless: false,
            args: Vec::new(),
            startup_timeout_seconds: 10,
        }
    }
}

impl DriverConfig {
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub report_path: Option<String>,
    pub screenshot_on_failure: bool,
    pub screenshot_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: None,
            screenshot_on_failure: false,
            screenshot_path: "login-failure.png".to_string(),
        }
    }
}

impl LoginConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.wait.timeout_seconds)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.wait.poll_interval_ms)
    }

    pub fn poll_spec(&self) -> PollSpec {
        PollSpec {
            timeout: self.timeout(),
            interval: self.poll_interval(),
        }
    }

    /// 可安全輸出的副本（密碼遮蔽）
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.credentials.password.is_empty() {
            copy.credentials.password = "***".to_string();
        }
        copy
    }
}

impl Validate for LoginConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("target.url", &self.target.url)?;
        validation::validate_non_empty_string("credentials.email", &self.credentials.email, false)?;
        validation::validate_non_empty_string(
            "credentials.password",
            &self.credentials.password,
            true,
        )?;

        validation::validate_range("wait.timeout_seconds", self.wait.timeout_seconds, 1, 300)?;
        validation::validate_range("wait.poll_interval_ms", self.wait.poll_interval_ms, 10, 10_000)?;
        if self.poll_interval() > self.timeout() {
            return Err(crate::utils::error::LoginError::InvalidConfigValueError {
                field: "wait.poll_interval_ms".to_string(),
                value: self.wait.poll_interval_ms.to_string(),
                reason: "Poll interval cannot exceed the timeout".to_string(),
            });
        }

        for (field, locator) in [
            ("selectors.email", &self.selectors.email),
            ("selectors.password", &self.selectors.password),
            ("selectors.submit", &self.selectors.submit),
            ("selectors.success", &self.selectors.success),
        ] {
            validation::validate_non_empty_string(field, locator.value(), false)?;
        }

        validation::validate_url("driver.url", &self.driver.url)?;
        if let Some(path) = &self.driver.path {
            validation::validate_path("driver.path", path)?;
        }
        validation::validate_range(
            "driver.startup_timeout_seconds",
            self.driver.startup_timeout_seconds,
            1,
            300,
        )?;

        if let Some(report) = &self.output.report_path {
            validation::validate_path("output.report_path", report)?;
        }
        if self.output.screenshot_on_failure {
            validation::validate_path("output.screenshot_path", &self.output.screenshot_path)?;
        }

        Ok(())
    }
}

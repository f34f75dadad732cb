use crate::config::{BrowserKind, LoginConfig};
use crate::domain::model::Locator;
use crate::utils::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "login-probe")]
#[command(about = "Drive a browser through a login form and verify the signed-in state")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub url: Option<String>,

    #[arg(long, env = "LOGIN_PROBE_EMAIL")]
    pub email: Option<String>,

    #[arg(long, env = "LOGIN_PROBE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Selector for the email input (prefix with id:, css: or xpath:)
    #[arg(long)]
    pub email_selector: Option<Locator>,

    #[arg(long)]
    pub password_selector: Option<Locator>,

    #[arg(long)]
    pub submit_selector: Option<Locator>,

    /// Element that becomes visible once signed in
    #[arg(long)]
    pub success_selector: Option<Locator>,

    #[arg(long)]
    pub driver_url: Option<String>,

    /// Start this driver executable instead of connecting to a running one
    #[arg(long)]
    pub driver_path: Option<String>,

    #[arg(long, value_enum)]
    pub browser: Option<BrowserKind>,

    #[arg(long)]
    pub headless: bool,

    /// Write a JSON report of the run to this path
    #[arg(long)]
    pub report: Option<String>,

    #[arg(long)]
    pub screenshot_on_failure: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Print the resolved configuration without launching a browser
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// 載入設定檔（若有）並套用命令列覆蓋
    pub fn resolve(&self) -> Result<LoginConfig> {
        let mut config = match &self.config {
            Some(path) => LoginConfig::from_file(path)?,
            None => LoginConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut LoginConfig) {
        if let Some(url) = &self.url {
            config.target.url = url.clone();
        }
        if let Some(email) = &self.email {
            config.credentials.email = email.clone();
        }
        if let Some(password) = &self.password {
            config.credentials.password = password.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.wait.timeout_seconds = timeout;
        }
        if let Some(interval) = self.poll_interval_ms {
            config.wait.poll_interval_ms = interval;
        }
        if let Some(locator) = &self.email_selector {
            config.selectors.email = locator.clone();
        }
        if let Some(locator) = &self.password_selector {
            config.selectors.password = locator.clone();
        }
        if let Some(locator) = &self.submit_selector {
            config.selectors.submit = locator.clone();
        }
        if let Some(locator) = &self.success_selector {
            config.selectors.success = locator.clone();
        }
        if let Some(driver_url) = &self.driver_url {
            config.driver.url = driver_url.clone();
        }
        if let Some(driver_path) = &self.driver_path {
            config.driver.path = Some(driver_path.clone());
        }
        if let Some(browser) = self.browser {
            config.driver.browser = browser;
        }
        // 布林旗標只能開啟，不會覆蓋設定檔中的 true
        if self.headless {
            config.driver.headless = true;
        }
        if let Some(report) = &self.report {
            config.output.report_path = Some(report.clone());
        }
        if self.screenshot_on_failure {
            config.output.screenshot_on_failure = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let mut full = vec!["login-probe"];
        full.extend_from_slice(args);
        CliArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&[
            "--url",
            "https://staging.example.com/",
            "--email",
            "user@example.com",
            "--password",
            "wrongpass",
            "--timeout-seconds",
            "3",
            "--success-selector",
            "id:dashboard",
            "--browser",
            "firefox",
            "--headless",
        ]);

        let config = args.resolve().unwrap();
        assert_eq!(config.target.url, "https://staging.example.com/");
        assert_eq!(config.credentials.email, "user@example.com");
        assert_eq!(config.credentials.password, "wrongpass");
        assert_eq!(config.wait.timeout_seconds, 3);
        assert_eq!(config.selectors.success, Locator::id("dashboard"));
        assert_eq!(config.driver.browser, BrowserKind::Firefox);
        assert!(config.driver.headless);
    }

    #[test]
    fn test_no_flags_keeps_config_values() {
        let args = parse(&[]);
        let mut config = LoginConfig::default();
        config.driver.headless = true;
        config.wait.timeout_seconds = 42;

        args.apply_overrides(&mut config);

        assert!(config.driver.headless);
        assert_eq!(config.wait.timeout_seconds, 42);
    }

    #[test]
    fn test_bad_selector_rejected_at_parse_time() {
        let result = CliArgs::try_parse_from(["login-probe", "--email-selector", "id:"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_format_flag() {
        assert_eq!(parse(&[]).log_format, LogFormat::Compact);
        assert_eq!(parse(&["--log-format", "json"]).log_format, LogFormat::Json);
    }
}

use crate::config::{BrowserKind, DriverConfig};
use crate::utils::error::{LoginError, Result};
use serde_json::json;
use thirtyfour::{Capabilities, ChromiumLikeCapabilities, DesiredCapabilities};

/// 保留原生 alert，讓失敗時仍能讀取並關閉它
const UNHANDLED_PROMPT_BEHAVIOR: &str = "unhandledPromptBehavior";

fn invalid_arg(arg: &str, e: impl std::fmt::Display) -> LoginError {
    LoginError::InvalidConfigValueError {
        field: "driver.args".to_string(),
        value: arg.to_string(),
        reason: e.to_string(),
    }
}

/// 依設定組出建立 session 用的 capabilities
pub fn session_capabilities(driver: &DriverConfig) -> Result<Capabilities> {
    let mut caps: Capabilities = match driver.browser {
        BrowserKind::Chrome => {
            let mut chrome = DesiredCapabilities::chrome();
            if driver.headless {
                chrome
                    .set_headless()
                    .map_err(|e| invalid_arg("headless", e))?;
            }
            for arg in &driver.args {
                chrome.add_arg(arg).map_err(|e| invalid_arg(arg, e))?;
            }
            chrome.into()
        }
        BrowserKind::Firefox => {
            let mut firefox = DesiredCapabilities::firefox();
            if driver.headless {
                firefox
                    .set_headless()
                    .map_err(|e| invalid_arg("headless", e))?;
            }
            for arg in &driver.args {
                firefox.add_arg(arg).map_err(|e| invalid_arg(arg, e))?;
            }
            firefox.into()
        }
    };

    caps.insert(UNHANDLED_PROMPT_BEHAVIOR.to_string(), json!("ignore"));
    Ok(caps)
}

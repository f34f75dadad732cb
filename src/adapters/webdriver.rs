//! Browser sessions driven through thirtyfour.

use crate::adapters::capabilities::session_capabilities;
use crate::adapters::driver_process::DriverProcess;
use crate::config::DriverConfig;
use crate::domain::model::{Locator, PollSpec};
use crate::domain::ports::{BrowserSession, SessionLauncher};
use crate::utils::error::{
    LoginError, Result, NO_SUCH_ALERT, NO_SUCH_ELEMENT, SESSION_NOT_CREATED,
    STALE_ELEMENT_REFERENCE,
};
use async_trait::async_trait;
use thirtyfour::error::{WebDriverError, WebDriverErrorInfo, WebDriverErrorInner};
use thirtyfour::prelude::*;

fn by(locator: &Locator) -> By {
    match locator {
        Locator::Id(id) => By::Id(id.as_str()),
        Locator::Css(css) => By::Css(css.as_str()),
        Locator::XPath(xpath) => By::XPath(xpath.as_str()),
    }
}

/// `unexpected alert open` 的錯誤內容中，驅動程式會附上對話框文字
fn alert_text_hint(info: &WebDriverErrorInfo) -> Option<String> {
    info.value
        .data
        .as_ref()
        .and_then(|data| data.get("text"))
        .and_then(|text| text.as_str())
        .map(str::to_string)
}

fn driver_error(command: &str, err: WebDriverError) -> LoginError {
    let code = match err.as_inner() {
        WebDriverErrorInner::UnexpectedAlertOpen(info) => {
            return LoginError::AlertOpen {
                command: command.to_string(),
                text: alert_text_hint(info),
            };
        }
        WebDriverErrorInner::NoSuchElement(_) => NO_SUCH_ELEMENT,
        WebDriverErrorInner::StaleElementReference(_) => STALE_ELEMENT_REFERENCE,
        WebDriverErrorInner::NoSuchAlert(_) => NO_SUCH_ALERT,
        WebDriverErrorInner::SessionNotCreated(_) => SESSION_NOT_CREATED,
        _ => "unknown error",
    };
    LoginError::WebDriverError {
        command: command.to_string(),
        error: code.to_string(),
        message: err.to_string(),
    }
}

pub struct WebDriverSession {
    driver: WebDriver,
    process: Option<DriverProcess>,
}

impl std::fmt::Debug for WebDriverSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebDriverSession")
            .field("driver_pid", &self.process.as_ref().and_then(DriverProcess::id))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    type Element = WebElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| driver_error("navigate", e))
    }

    async fn maximize_window(&self) -> Result<()> {
        self.driver
            .maximize_window()
            .await
            .map_err(|e| driver_error("maximize window", e))
    }

    async fn wait_for_displayed(
        &self,
        locator: &Locator,
        what: &str,
        poll: PollSpec,
    ) -> Result<WebElement> {
        tracing::debug!("waiting up to {:?} for {} ({})", poll.timeout, what, locator);
        let found = self
            .driver
            .query(by(locator))
            .wait(poll.timeout, poll.interval)
            .and_displayed()
            .first()
            .await;

        match found {
            Ok(element) => Ok(element),
            // query 逾時以 no such element 回報
            Err(e) if matches!(e.as_inner(), WebDriverErrorInner::NoSuchElement(_)) => {
                Err(LoginError::Timeout {
                    what: what.to_string(),
                    after: poll.timeout,
                })
            }
            Err(e) => Err(driver_error("wait for element", e)),
        }
    }

    async fn find_element(&self, locator: &Locator) -> Result<WebElement> {
        self.driver
            .find(by(locator))
            .await
            .map_err(|e| driver_error("find element", e))
    }

    async fn is_displayed(&self, element: &WebElement) -> Result<bool> {
        element
            .is_displayed()
            .await
            .map_err(|e| driver_error("is displayed", e))
    }

    async fn clear(&self, element: &WebElement) -> Result<()> {
        element.clear().await.map_err(|e| driver_error("clear", e))
    }

    async fn send_keys(&self, element: &WebElement, text: &str) -> Result<()> {
        element
            .send_keys(text)
            .await
            .map_err(|e| driver_error("send keys", e))
    }

    async fn click(&self, element: &WebElement) -> Result<()> {
        element.click().await.map_err(|e| driver_error("click", e))
    }

    async fn alert_text(&self) -> Result<Option<String>> {
        match self.driver.get_alert_text().await {
            Ok(text) => Ok(Some(text)),
            Err(e) if matches!(e.as_inner(), WebDriverErrorInner::NoSuchAlert(_)) => Ok(None),
            Err(e) => Err(driver_error("get alert text", e)),
        }
    }

    async fn accept_alert(&self) -> Result<()> {
        self.driver
            .accept_alert()
            .await
            .map_err(|e| driver_error("accept alert", e))
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.driver
            .screenshot_as_png()
            .await
            .map_err(|e| driver_error("take screenshot", e))
    }

    async fn quit(self) -> Result<()> {
        let closed = self
            .driver
            .quit()
            .await
            .map_err(|e| driver_error("delete session", e));

        if let Some(process) = self.process {
            process.shutdown().await;
        }
        closed
    }
}

/// 依設定連線（或先啟動）驅動程式並開啟工作階段
#[derive(Debug, Clone)]
pub struct WebDriverLauncher {
    driver: DriverConfig,
}

impl WebDriverLauncher {
    pub fn new(driver: DriverConfig) -> Self {
        Self { driver }
    }

    fn session_error(&self, err: WebDriverError) -> LoginError {
        match err.as_inner() {
            WebDriverErrorInner::SessionNotCreated(_) => driver_error("new session", err),
            // 連線失敗等非 W3C 錯誤都視為驅動程式不可用
            _ => LoginError::DriverUnavailable {
                url: self.driver.url.clone(),
                message: err.to_string(),
            },
        }
    }
}

#[async_trait]
impl SessionLauncher for WebDriverLauncher {
    type Session = WebDriverSession;

    async fn launch(&self) -> Result<WebDriverSession> {
        let capabilities = session_capabilities(&self.driver)?;

        let process = match &self.driver.path {
            Some(path) => Some(DriverProcess::spawn(path, &self.driver).await?),
            None => None,
        };

        match WebDriver::new(self.driver.url.as_str(), capabilities).await {
            Ok(driver) => {
                tracing::info!(
                    "🌐 Opened {} session via {}",
                    self.driver.browser.as_str(),
                    self.driver.url
                );
                Ok(WebDriverSession { driver, process })
            }
            Err(e) => {
                if let Some(process) = process {
                    process.shutdown().await;
                }
                Err(self.session_error(e))
            }
        }
    }
}

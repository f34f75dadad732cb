use crate::config::LoginConfig;
use crate::domain::model::{FailureReason, Locator, LoginOutcome};
use crate::domain::ports::BrowserSession;
use crate::utils::error::{ErrorKind, LoginError, Result};

/// 登入驗證流程：開頁、填表、送出、等待成功指示元素
pub struct LoginFlow<'a> {
    config: &'a LoginConfig,
}

impl<'a> LoginFlow<'a> {
    pub fn new(config: &'a LoginConfig) -> Self {
        Self { config }
    }

    /// Runs the whole sequence against an open session.
    ///
    /// A success indicator that never shows up is a `Failed` outcome, not an
    /// error. Errors are reserved for everything before verification, e.g. the
    /// email field timing out, in which case nothing is submitted.
    pub async fn run<S: BrowserSession>(&self, session: &S) -> Result<LoginOutcome> {
        let url = &self.config.target.url;
        let selectors = &self.config.selectors;
        let credentials = &self.config.credentials;

        tracing::info!("🌐 Navigating to {}", url);
        session.navigate(url).await?;

        // headless 瀏覽器可能不支援最大化
        if let Err(e) = session.maximize_window().await {
            tracing::warn!("⚠️ Could not maximize window: {}", e);
        }

        println!("Attempting login with: {}", credentials.email);
        tracing::info!("🔑 Attempting login with: {}", credentials.email);

        let email_input = self
            .wait_for_visible(session, &selectors.email, "email field")
            .await?;
        session.clear(&email_input).await?;
        session.send_keys(&email_input, &credentials.email).await?;

        let password_input = session.find_element(&selectors.password).await?;
        session.clear(&password_input).await?;
        session.send_keys(&password_input, &credentials.password).await?;

        let submit = session.find_element(&selectors.submit).await?;
        session.click(&submit).await?;
        tracing::info!("📨 Login form submitted");

        self.verify_signed_in(session).await
    }

    async fn wait_for_visible<S: BrowserSession>(
        &self,
        session: &S,
        locator: &Locator,
        what: &str,
    ) -> Result<S::Element> {
        session
            .wait_for_displayed(locator, what, self.config.poll_spec())
            .await
    }

    async fn verify_signed_in<S: BrowserSession>(&self, session: &S) -> Result<LoginOutcome> {
        let waited = self
            .wait_for_visible(session, &self.config.selectors.success, "success indicator")
            .await;

        // 登入失敗的頁面常以 alert() 回報，驅動程式會以 unexpected alert open 拒絕命令
        let mut alert_hint = None;
        let reason = match waited {
            Ok(indicator) => match session.is_displayed(&indicator).await {
                Ok(true) => {
                    println!("✔ TEST PASSED: Successfully logged in!");
                    tracing::info!("✅ Success indicator visible, login verified");
                    return Ok(LoginOutcome::Passed);
                }
                Ok(false) => FailureReason::NotDisplayed,
                Err(e) if e.is_transient_lookup() => FailureReason::NotDisplayed,
                Err(LoginError::AlertOpen { text, .. }) => {
                    alert_hint = text;
                    FailureReason::NotDisplayed
                }
                Err(e) => return Err(e),
            },
            Err(e) if e.kind() == ErrorKind::Timeout => FailureReason::Timeout,
            Err(LoginError::AlertOpen { text, .. }) => {
                alert_hint = text;
                FailureReason::Timeout
            }
            Err(e) => return Err(e),
        };

        println!("✘ TEST FAILED: {}", reason);
        tracing::warn!("❌ Login not verified: {}", reason);

        // 驅動程式可能已自行關閉對話框，此時沿用錯誤內容中的文字
        let alert = match take_alert(session).await {
            Some(text) => Some(text),
            None => alert_hint.map(|text| {
                println!("Alert message: {}", text);
                text
            }),
        };

        if self.config.output.screenshot_on_failure {
            capture_screenshot(session, &self.config.output.screenshot_path).await;
        }

        Ok(LoginOutcome::Failed { reason, alert })
    }
}

/// 讀取並關閉原生 alert 對話框；沒有對話框或讀取失敗都回傳 `None`
pub async fn take_alert<S: BrowserSession>(session: &S) -> Option<String> {
    match session.alert_text().await {
        Ok(Some(text)) => {
            println!("Alert message: {}", text);
            tracing::info!("💬 Alert message: {}", text);
            if let Err(e) = session.accept_alert().await {
                tracing::debug!("could not dismiss alert: {}", e);
            }
            Some(text)
        }
        Ok(None) => {
            tracing::debug!("no alert present");
            None
        }
        Err(e) => {
            tracing::debug!("alert probe failed: {}", e);
            None
        }
    }
}

async fn capture_screenshot<S: BrowserSession>(session: &S, path: &str) {
    let png = match session.screenshot().await {
        Ok(png) => png,
        Err(e) => {
            tracing::warn!("⚠️ Could not take screenshot: {}", e);
            return;
        }
    };

    match tokio::fs::write(path, &png).await {
        Ok(()) => tracing::info!("📸 Screenshot saved to {}", path),
        Err(e) => tracing::warn!("⚠️ Could not write screenshot to {}: {}", path, e),
    }
}

use crate::domain::model::{Locator, PollSpec};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 一個已開啟的瀏覽器自動化工作階段
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// 頁面元素的控制代碼
    type Element: Send + Sync;

    async fn navigate(&self, url: &str) -> Result<()>;
    async fn maximize_window(&self) -> Result<()>;

    /// 輪詢直到元素存在且可見；逾時回傳 `LoginError::Timeout`，以 `what` 描述等待對象
    async fn wait_for_displayed(
        &self,
        locator: &Locator,
        what: &str,
        poll: PollSpec,
    ) -> Result<Self::Element>;

    async fn find_element(&self, locator: &Locator) -> Result<Self::Element>;
    async fn is_displayed(&self, element: &Self::Element) -> Result<bool>;
    async fn clear(&self, element: &Self::Element) -> Result<()>;
    async fn send_keys(&self, element: &Self::Element, text: &str) -> Result<()>;
    async fn click(&self, element: &Self::Element) -> Result<()>;

    /// 沒有原生對話框時回傳 `None`
    async fn alert_text(&self) -> Result<Option<String>>;
    async fn accept_alert(&self) -> Result<()>;

    /// PNG bytes
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// 結束工作階段；取用 `self` 確保只會釋放一次
    async fn quit(self) -> Result<()>
    where
        Self: Sized;
}

#[async_trait]
pub trait SessionLauncher: Send + Sync {
    type Session: BrowserSession;

    async fn launch(&self) -> Result<Self::Session>;
}

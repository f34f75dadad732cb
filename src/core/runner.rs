use crate::config::LoginConfig;
use crate::core::login_flow::LoginFlow;
use crate::core::report::RunReport;
use crate::domain::model::LoginOutcome;
use crate::domain::ports::{BrowserSession, SessionLauncher};
use crate::utils::error::Result;
use chrono::Utc;
use std::time::Instant;

pub struct LoginCheck<L: SessionLauncher> {
    launcher: L,
    config: LoginConfig,
}

impl<L: SessionLauncher> LoginCheck<L> {
    pub fn new(launcher: L, config: LoginConfig) -> Self {
        Self { launcher, config }
    }

    /// 執行一次完整檢查；任何錯誤都在此記錄並轉成報告，不會往外拋
    pub async fn run(&self) -> RunReport {
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!("🚀 Starting login check against {}", self.config.target.url);
        let result = self.run_session().await;

        if let Err(e) = &result {
            tracing::error!(
                "❌ Login check aborted: {} (Kind: {:?}, Category: {:?}, Severity: {:?})",
                e,
                e.kind(),
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        }

        let report = RunReport::new(&self.config, started_at, start.elapsed(), &result);
        tracing::info!(
            "🏁 Finished in {}ms with status {:?}",
            report.duration_ms,
            report.status
        );
        report
    }

    async fn run_session(&self) -> Result<LoginOutcome> {
        let session = self.launcher.launch().await?;

        let result = LoginFlow::new(&self.config).run(&session).await;

        // 不論成功與否都要關閉 session
        match session.quit().await {
            Ok(()) => tracing::info!("🧹 Browser session closed"),
            Err(e) => tracing::warn!("⚠️ Failed to close browser session cleanly: {}", e),
        }

        result
    }
}

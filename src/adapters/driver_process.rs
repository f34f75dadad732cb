use crate::adapters::status::StatusClient;
use crate::config::DriverConfig;
use crate::utils::error::{LoginError, Result};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::{Child, Command};
use tokio::time::sleep;
use url::Url;

const READINESS_POLL: Duration = Duration::from_millis(200);

/// 由本程式啟動的 chromedriver / geckodriver 行程
#[derive(Debug)]
pub struct DriverProcess {
    child: Child,
    path: String,
}

impl DriverProcess {
    /// 以 `driver.url` 的埠號啟動驅動程式，並等待 `/status` 回報 ready
    pub async fn spawn(path: &str, driver: &DriverConfig) -> Result<Self> {
        let port = driver_port(&driver.url)?;

        let child = Command::new(path)
            .arg(format!("--port={}", port))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| LoginError::DriverLaunchError {
                message: format!("{}: {}", path, e),
            })?;

        let mut process = Self {
            child,
            path: path.to_string(),
        };
        tracing::info!(
            "🚗 Started driver {} on port {} (pid {:?})",
            path,
            port,
            process.id()
        );

        match process.wait_until_ready(driver).await {
            Ok(()) => Ok(process),
            Err(e) => {
                process.shutdown().await;
                Err(e)
            }
        }
    }

    async fn wait_until_ready(&mut self, driver: &DriverConfig) -> Result<()> {
        let client = StatusClient::new(&driver.url)?;
        let timeout = driver.startup_timeout();
        let start = Instant::now();
        let mut attempts = 0u32;

        while start.elapsed() < timeout {
            attempts += 1;

            match client.status().await {
                Ok(status) if status.ready => {
                    tracing::debug!("driver {} ready after {} attempt(s)", self.path, attempts);
                    return Ok(());
                }
                Ok(status) => tracing::debug!("driver not ready: {}", status.message),
                Err(LoginError::HttpError(e)) if e.is_connect() => {
                    if attempts == 1 {
                        tracing::info!("⏳ Waiting for driver to start...");
                    }
                }
                Err(e) => tracing::warn!("⚠️ Driver status check failed: {}", e),
            }

            if let Ok(Some(status)) = self.child.try_wait() {
                return Err(LoginError::DriverLaunchError {
                    message: format!("{} exited early with {}", self.path, status),
                });
            }

            sleep(READINESS_POLL).await;
        }

        Err(LoginError::DriverLaunchError {
            message: format!(
                "{} not ready after {}s ({} status checks)",
                self.path,
                timeout.as_secs(),
                attempts
            ),
        })
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// 終止行程並回收；失敗只記錄警告
    pub async fn shutdown(mut self) {
        let pid = self.id();
        if let Err(e) = self.child.kill().await {
            tracing::warn!("⚠️ Failed to stop driver {}: {}", self.path, e);
        } else {
            tracing::debug!("driver {} stopped (pid {:?})", self.path, pid);
        }
    }
}

fn driver_port(driver_url: &str) -> Result<u16> {
    let url = Url::parse(driver_url).map_err(|e| LoginError::InvalidConfigValueError {
        field: "driver.url".to_string(),
        value: driver_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;
    url.port_or_known_default()
        .ok_or_else(|| LoginError::InvalidConfigValueError {
            field: "driver.url".to_string(),
            value: driver_url.to_string(),
            reason: "URL has no port".to_string(),
        })
}

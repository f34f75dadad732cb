// Scripted in-memory browser shared by the core unit tests.

use crate::config::Selectors;
use crate::domain::model::{Locator, PollSpec};
use crate::domain::ports::{BrowserSession, SessionLauncher};
use crate::utils::error::{LoginError, Result, NO_SUCH_ELEMENT};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
pub(crate) struct FakeState {
    pub calls: Vec<String>,
    /// Lookups of the email field that fail before it shows up; `None` = never.
    pub email_appears_after: Option<u32>,
    pub email_lookups: u32,
    pub accept_login: bool,
    /// Scripted answers for the success indicator's displayed check.
    pub success_displayed: VecDeque<bool>,
    pub alert: Option<String>,
    /// While an alert is open the success indicator check is refused.
    pub alert_blocks_commands: bool,
    /// Driver closes the alert itself when refusing ("dismiss and notify").
    pub driver_dismisses_alert: bool,
    pub fail_command: Option<&'static str>,
    pub fail_launch: bool,
    pub launches: u32,
    pub quits: u32,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeBrowser {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        let state = FakeState {
            email_appears_after: Some(0),
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn accepting_login(self) -> Self {
        self.lock().accept_login = true;
        self
    }

    pub fn with_alert(self, text: &str) -> Self {
        self.lock().alert = Some(text.to_string());
        self
    }

    /// Rejected login whose alert makes the driver refuse element commands.
    pub fn with_blocking_alert(self, text: &str, driver_dismisses: bool) -> Self {
        {
            let mut state = self.lock();
            state.alert = Some(text.to_string());
            state.alert_blocks_commands = true;
            state.driver_dismisses_alert = driver_dismisses;
        }
        self
    }

    pub fn email_appears_after(self, misses: Option<u32>) -> Self {
        self.lock().email_appears_after = misses;
        self
    }

    pub fn success_displayed(self, answers: &[bool]) -> Self {
        self.lock().success_displayed = answers.iter().copied().collect();
        self
    }

    pub fn failing_on(self, command: &'static str) -> Self {
        self.lock().fail_command = Some(command);
        self
    }

    pub fn failing_launch(self) -> Self {
        self.lock().fail_launch = true;
        self
    }

    pub fn session(&self) -> FakeSession {
        FakeSession {
            state: Arc::clone(&self.state),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.lock().calls.iter().any(|c| c.starts_with(prefix))
    }

    pub fn launches(&self) -> u32 {
        self.lock().launches
    }

    pub fn quits(&self) -> u32 {
        self.lock().quits
    }

    pub fn alert_pending(&self) -> bool {
        self.lock().alert.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl SessionLauncher for FakeBrowser {
    type Session = FakeSession;

    async fn launch(&self) -> Result<FakeSession> {
        let mut state = self.lock();
        if state.fail_launch {
            return Err(LoginError::DriverLaunchError {
                message: "scripted launch failure".to_string(),
            });
        }
        state.launches += 1;
        drop(state);
        Ok(self.session())
    }
}

pub(crate) struct FakeSession {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSession {
    fn record(&self, call: String) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        let failing = matches!(state.fail_command, Some(cmd) if call.starts_with(cmd));
        state.calls.push(call.clone());
        if failing {
            return Err(LoginError::WebDriverError {
                command: call,
                error: "unknown error".to_string(),
                message: "scripted failure".to_string(),
            });
        }
        Ok(state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FakeElement(String);

fn element(locator: &Locator) -> FakeElement {
    FakeElement(locator.to_string())
}

#[async_trait]
impl BrowserSession for FakeSession {
    type Element = FakeElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.record(format!("navigate {}", url))?;
        Ok(())
    }

    async fn maximize_window(&self) -> Result<()> {
        self.record("maximize".to_string())?;
        Ok(())
    }

    // 不實際睡眠，只依輪詢次數模擬逾時
    async fn wait_for_displayed(
        &self,
        locator: &Locator,
        what: &str,
        poll: PollSpec,
    ) -> Result<FakeElement> {
        drop(self.record(format!("wait {}", locator))?);
        let interval = poll.interval.as_millis().max(1);
        let attempts = poll.timeout.as_millis() / interval + 1;

        for _ in 0..attempts {
            match self.find_element(locator).await {
                Ok(el) => {
                    if self.is_displayed(&el).await? {
                        return Ok(el);
                    }
                }
                Err(e) if e.is_transient_lookup() => {}
                Err(e) => return Err(e),
            }
        }
        Err(LoginError::Timeout {
            what: what.to_string(),
            after: poll.timeout,
        })
    }

    async fn find_element(&self, locator: &Locator) -> Result<FakeElement> {
        let mut state = self.record(format!("find {}", locator))?;
        if *locator == Selectors::default().email {
            let ready = match state.email_appears_after {
                Some(misses) => state.email_lookups >= misses,
                None => false,
            };
            state.email_lookups += 1;
            if !ready {
                return Err(LoginError::WebDriverError {
                    command: "find element".to_string(),
                    error: NO_SUCH_ELEMENT.to_string(),
                    message: locator.to_string(),
                });
            }
        }
        Ok(element(locator))
    }

    async fn is_displayed(&self, el: &FakeElement) -> Result<bool> {
        let mut state = self.record(format!("displayed {}", el.0))?;
        if *el == element(&Selectors::default().success) {
            if state.alert_blocks_commands && state.alert.is_some() {
                let text = if state.driver_dismisses_alert {
                    state.alert.take()
                } else {
                    state.alert.clone()
                };
                return Err(LoginError::AlertOpen {
                    command: "is displayed".to_string(),
                    text,
                });
            }
            if let Some(answer) = state.success_displayed.pop_front() {
                return Ok(answer);
            }
            let submitted = state.calls.iter().any(|c| c.starts_with("click"));
            return Ok(state.accept_login && submitted);
        }
        Ok(true)
    }

    async fn clear(&self, el: &FakeElement) -> Result<()> {
        self.record(format!("clear {}", el.0))?;
        Ok(())
    }

    async fn send_keys(&self, el: &FakeElement, text: &str) -> Result<()> {
        self.record(format!("type {} {}", el.0, text))?;
        Ok(())
    }

    async fn click(&self, el: &FakeElement) -> Result<()> {
        self.record(format!("click {}", el.0))?;
        Ok(())
    }

    async fn alert_text(&self) -> Result<Option<String>> {
        let state = self.record("alert text".to_string())?;
        Ok(state.alert.clone())
    }

    async fn accept_alert(&self) -> Result<()> {
        let mut state = self.record("accept alert".to_string())?;
        state.alert = None;
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.record("screenshot".to_string())?;
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn quit(self) -> Result<()> {
        let mut state = self.record("quit".to_string())?;
        state.quits += 1;
        Ok(())
    }
}

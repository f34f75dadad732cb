pub mod login_flow;
pub mod report;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{Credentials, FailureReason, Locator, LoginOutcome};
pub use crate::domain::ports::{BrowserSession, SessionLauncher};
pub use crate::utils::error::Result;

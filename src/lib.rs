pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::status::StatusClient;
pub use adapters::webdriver::{WebDriverLauncher, WebDriverSession};
pub use config::LoginConfig;
pub use crate::core::{login_flow::LoginFlow, report::RunReport, runner::LoginCheck};
pub use utils::error::{LoginError, Result};

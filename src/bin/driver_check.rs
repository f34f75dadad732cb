use clap::Parser;
use login_probe::adapters::driver_process::DriverProcess;
use login_probe::config::{BrowserKind, DriverConfig, DEFAULT_DRIVER_URL};
use login_probe::utils::logger;
use login_probe::utils::validation::{self, validate_required_field};
use login_probe::StatusClient;

#[derive(Parser)]
#[command(name = "driver-check")]
#[command(about = "Check that a WebDriver endpoint is reachable and ready")]
struct Args {
    /// WebDriver endpoint
    #[arg(long, default_value = DEFAULT_DRIVER_URL)]
    driver_url: String,

    /// Start this driver executable first, then check it
    #[arg(long)]
    driver_path: Option<String>,

    /// Require --driver-path (fail instead of probing an existing driver)
    #[arg(long)]
    spawn: bool,

    #[arg(long, default_value = "10")]
    startup_timeout_seconds: u64,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    validation::validate_url("driver_url", &args.driver_url)?;

    let driver = DriverConfig {
        url: args.driver_url.clone(),
        path: args.driver_path.clone(),
        browser: BrowserKind::Chrome,
        startup_timeout_seconds: args.startup_timeout_seconds,
        ..Default::default()
    };

    let process = if args.spawn {
        let path = validate_required_field("driver_path", &args.driver_path)?;
        Some(DriverProcess::spawn(path, &driver).await?)
    } else {
        match &args.driver_path {
            Some(path) => Some(DriverProcess::spawn(path, &driver).await?),
            None => None,
        }
    };

    let client = StatusClient::new(&args.driver_url)?;
    let status = client.status().await;

    if let Some(process) = process {
        process.shutdown().await;
    }

    match status {
        Ok(status) if status.ready => {
            println!("✅ Driver at {} is ready: {}", args.driver_url, status.message);
            Ok(())
        }
        Ok(status) => {
            println!("⏳ Driver at {} is not ready: {}", args.driver_url, status.message);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

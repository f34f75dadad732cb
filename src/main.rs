use clap::Parser;
use login_probe::config::cli::LogFormat;
use login_probe::utils::{logger, validation::Validate};
use login_probe::{CliArgs, LoginCheck, LoginConfig, WebDriverLauncher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 初始化日誌
    match args.log_format {
        LogFormat::Compact => logger::init_cli_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(args.verbose),
    }

    tracing::info!("Starting login-probe");

    // 載入設定並套用命令列覆蓋
    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };
    if args.verbose {
        tracing::debug!("Resolved config: {:?}", config.redacted());
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if args.dry_run {
        display_config_summary(&config)?;
        return Ok(());
    }

    let report_path = config.output.report_path.clone();
    let launcher = WebDriverLauncher::new(config.driver.clone());
    let check = LoginCheck::new(launcher, config);

    let report = check.run().await;

    if let Some(error) = &report.error {
        eprintln!("❌ {}", error.message);
        eprintln!("💡 Suggestion: {}", error.suggestion);
    }

    if let Some(path) = report_path {
        match report.write_to(&path) {
            Ok(()) => tracing::info!("📁 Report saved to: {}", path),
            Err(e) => tracing::warn!("⚠️ Could not write report to {}: {}", path, e),
        }
    }

    let exit_code = report.exit_code();
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn display_config_summary(config: &LoginConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("📋 Configuration Summary (dry run, no browser launched):");
    println!("  Target: {}", config.target.url);
    println!("  Email: {}", config.credentials.email);
    println!(
        "  Wait: {}s timeout, {}ms poll interval",
        config.wait.timeout_seconds, config.wait.poll_interval_ms
    );
    println!(
        "  Driver: {} at {}{}",
        config.driver.browser.as_str(),
        config.driver.url,
        if config.driver.headless { " (headless)" } else { "" }
    );
    if let Some(path) = &config.driver.path {
        println!("  Driver binary: {}", path);
    }
    println!();
    println!("{}", toml::to_string_pretty(&config.redacted())?);
    Ok(())
}

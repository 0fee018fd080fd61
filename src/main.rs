use clap::Parser;
use hn_checks::utils::{logger, validation::Validate};
use hn_checks::{CheckRunner, CheckStatus, CliConfig, HackerNewsClient, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting hn-checks CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match &config.settings_file {
        Some(path) => Some(Settings::from_file(path)?),
        None => None,
    };

    let validation = match &settings {
        Some(settings) => settings.validate(),
        None => config.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let client = match &settings {
        Some(settings) => HackerNewsClient::new(settings),
        None => HackerNewsClient::new(&config),
    };
    let runner = CheckRunner::new(client);
    let report = runner.run().await;

    for outcome in &report.outcomes {
        let marker = match outcome.status {
            CheckStatus::Passed => "✅",
            CheckStatus::Failed => "❌",
            CheckStatus::Skipped => "⚠️",
        };
        match &outcome.detail {
            Some(detail) => println!(
                "{} {} ({:.2?}): {}",
                marker, outcome.name, outcome.elapsed, detail
            ),
            None => println!("{} {} ({:.2?})", marker, outcome.name, outcome.elapsed),
        }
    }

    println!(
        "{} checks: {} passed, {} failed, {} skipped (started {})",
        report.outcomes.len(),
        report.passed(),
        report.failed(),
        report.skipped(),
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if !report.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}

//! ahsmoke - AgreementHub API smoke-test CLI
//!
//! Runs the full smoke suite against a live deployment and exits 0 iff
//! every assertion passed.

use ah_smoke::{HarnessConfig, SmokeRunner, BASE_URL_ENV, DEFAULT_BASE_URL};
use clap::Parser;
use colored::Colorize;

#[derive(Parser)]
#[command(name = "ahsmoke")]
#[command(version)]
#[command(about = "AgreementHub backend API smoke tests", long_about = None)]
struct Cli {
    /// Base URL of the AgreementHub API
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let config = HarnessConfig::new(cli.base_url);

    println!("{}", "Starting AgreementHub backend API tests".bold());
    println!("Base URL: {}", config.base_url);
    println!("Started at: {}", chrono::Local::now().to_rfc3339());

    let mut runner = SmokeRunner::new(&config)?;
    let ok = runner.run_all().await;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

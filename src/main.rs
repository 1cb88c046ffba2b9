use clap::Parser;
use selfcare_dump::SiteDump;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.target_url.is_empty() {
        ::log::error!("No target URL given (pass it as an argument or in the config file)");
        return ExitCode::FAILURE;
    }

    ::log::info!(
        "Dumping {} into {}",
        config.target_url,
        config.destination_root.display()
    );
    println!("Note: dumping requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    let start_time = std::time::Instant::now();
    match SiteDump::from_config(config).run().await {
        Ok(summary) => {
            ::log::info!(
                "Dump complete in {:.2} seconds: {} categories, {} sections, {} pages written, {} already present, {} non-web links skipped",
                start_time.elapsed().as_secs_f64(),
                summary.categories,
                summary.sections,
                summary.written,
                summary.skipped_existing,
                summary.skipped_scheme
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Dump failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

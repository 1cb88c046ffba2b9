use clap::Parser;
use selfcare_dump::DumpConfig;
use selfcare_dump::error::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "selfcare-dump")]
#[command(about = "Dumps the question pages of a self-service site as cleaned HTML")]
#[command(version)]
pub struct Args {
    /// Landing page of the self-service site (optional when --config sets it)
    pub target_url: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory receiving the Selfcare and FAQ folders
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Wait after each navigation, in milliseconds
    #[arg(long)]
    pub settle_delay_ms: Option<u64>,

    /// Maximum length of sanitized file name parts
    #[arg(long)]
    pub max_filename_length: Option<usize>,

    /// Also capture the landing page and its most asked questions
    #[arg(long)]
    pub faq: bool,

    /// URL of the WebDriver server
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Do not draw the category progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// Loads the config file (if any) and applies command line overrides
    pub fn into_config(self) -> Result<DumpConfig> {
        let mut config = match &self.config {
            Some(path) => DumpConfig::from_file(path)?,
            None => DumpConfig::new(""),
        };

        if let Some(target_url) = self.target_url {
            config.target_url = target_url;
        }
        if let Some(output) = self.output {
            config.destination_root = output;
        }
        if let Some(settle_delay_ms) = self.settle_delay_ms {
            config.settle_delay_ms = settle_delay_ms;
        }
        if let Some(max_filename_length) = self.max_filename_length {
            config.max_filename_length = max_filename_length;
        }
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }
        if let Some(webdriver_url) = self.webdriver_url {
            config.webdriver_url = webdriver_url;
        }
        if self.faq {
            config.extract_faq = true;
        }
        if self.no_progress {
            config.show_progress = false;
        }
        Ok(config)
    }
}

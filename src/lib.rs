// Re-export modules
pub mod capture;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod testing;
pub mod utils;
pub mod walker;

#[cfg(test)]
mod tests;

// Re-export commonly used types for convenience
pub use capture::PageCapturer;
pub use config::DumpConfig;
pub use crawlers::{PageFetcher, WebDriverFetcher};
pub use error::{DumpError, FetchError};
pub use results::{CaptureOutcome, DumpSummary, Link};
pub use walker::HierarchyWalker;

use std::path::{Path, PathBuf};
use url::Url;

/// Main builder for dumping a self-service site to disk
pub struct SiteDump {
    config: DumpConfig,
}

impl SiteDump {
    /// Create a new SiteDump builder for the given landing page
    pub fn new(target_url: &str) -> Self {
        Self {
            config: DumpConfig::new(target_url),
        }
    }

    /// Start from a full configuration
    pub fn from_config(config: DumpConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a file
    pub fn from_config_file(path: impl AsRef<Path>) -> error::Result<Self> {
        Ok(Self::from_config(DumpConfig::from_file(path)?))
    }

    /// Set the landing page
    pub fn with_target_url(mut self, target_url: &str) -> Self {
        self.config.target_url = target_url.to_string();
        self
    }

    /// Set the directory receiving the `Selfcare` and `FAQ` folders
    pub fn with_destination(mut self, destination_root: impl Into<PathBuf>) -> Self {
        self.config.destination_root = destination_root.into();
        self
    }

    /// Set the wait after each navigation, in milliseconds
    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u64) -> Self {
        self.config.settle_delay_ms = settle_delay_ms;
        self
    }

    /// Set the maximum length of sanitized name parts
    pub fn with_max_filename_length(mut self, max_filename_length: usize) -> Self {
        self.config.max_filename_length = max_filename_length;
        self
    }

    /// Enable or disable the FAQ routine
    pub fn with_faq(mut self, extract_faq: bool) -> Self {
        self.config.extract_faq = extract_faq;
        self
    }

    /// Set the WebDriver server URL
    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.config.webdriver_url = webdriver_url.to_string();
        self
    }

    /// Enable or disable the category progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.config.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// Walk the site with an already connected fetcher
    pub async fn run_with<F: PageFetcher + ?Sized>(
        &self,
        fetcher: &mut F,
    ) -> error::Result<DumpSummary> {
        Url::parse(&self.config.target_url).map_err(|source| DumpError::InvalidUrl {
            url: self.config.target_url.clone(),
            source,
        })?;

        HierarchyWalker::from_config(&self.config)
            .run(
                fetcher,
                &self.config.target_url,
                &self.config.destination_root,
                self.config.extract_faq,
            )
            .await
    }

    /// Open a WebDriver session, walk the site and close the session
    pub async fn run(self) -> error::Result<DumpSummary> {
        let mut fetcher = WebDriverFetcher::connect(&self.config).await?;
        let result = self.run_with(&mut fetcher).await;

        if let Err(e) = fetcher.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }
        result
    }
}

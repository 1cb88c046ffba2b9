use crate::crawlers::PageFetcher;
use crate::error::{DumpError, Result};
use crate::filter::is_capturable;
use crate::parsers;
use crate::results::{CaptureOutcome, Link};
use crate::utils::{self, sanitize_filename};
use std::path::Path;
use std::time::Duration;

/// File name shared by every capture whose link has no display text
pub const UNTITLED_PAGE_NAME: &str = "Page_Title_Unavailable.html";

/// Fetches, cleans and writes single pages
#[derive(Debug, Clone)]
pub struct PageCapturer {
    settle_delay: Duration,
    max_filename_length: usize,
}

impl PageCapturer {
    pub fn new(settle_delay: Duration, max_filename_length: usize) -> Self {
        Self {
            settle_delay,
            max_filename_length,
        }
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn max_filename_length(&self) -> usize {
        self.max_filename_length
    }

    /// File name a link is captured under
    pub fn page_file_name(&self, display_title: &str, category: &str, section: &str) -> String {
        if display_title.is_empty() {
            return UNTITLED_PAGE_NAME.to_string();
        }
        format!(
            "{}_{}_{}.html",
            category,
            section,
            sanitize_filename(display_title, self.max_filename_length)
        )
    }

    /// Captures `link` into `folder`
    ///
    /// Links without an http(s) URL and pages already on disk are skipped
    /// without touching the fetcher. Navigation and write failures abort.
    pub async fn capture<F: PageFetcher + ?Sized>(
        &self,
        fetcher: &mut F,
        link: &Link,
        folder: &Path,
        category: &str,
        section: &str,
    ) -> Result<CaptureOutcome> {
        let href = match link.href.as_deref() {
            Some(href) if is_capturable(Some(href)) => href,
            _ => {
                ::log::debug!("Skipping non-web link {:?} ({:?})", link.href, link.text);
                return Ok(CaptureOutcome::SkippedScheme);
            }
        };

        let page_name = self.page_file_name(&link.text, category, section);
        if page_name == UNTITLED_PAGE_NAME {
            ::log::warn!("Link {} has no title, capturing as {}", href, UNTITLED_PAGE_NAME);
        }
        let path = folder.join(page_name);

        if page_exists(&path).await? {
            ::log::info!("Skipping existing file: {}", path.display());
            return Ok(CaptureOutcome::SkippedExisting(path));
        }

        fetcher.navigate(href).await?;
        utils::settle(self.settle_delay).await;
        let markup = fetcher.current_markup().await?;
        let cleaned = parsers::clean(&markup);

        write_page(&path, &cleaned).await?;
        ::log::info!("Captured {} -> {}", href, path.display());
        Ok(CaptureOutcome::Written(path))
    }
}

async fn page_exists(path: &Path) -> Result<bool> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|e| DumpError::io(path, e))
}

/// Writes cleaned markup as UTF-8
pub(crate) async fn write_page(path: &Path, markup: &str) -> Result<()> {
    tokio::fs::write(path, markup)
        .await
        .map_err(|e| DumpError::io(path, e))
}

/// Creates `folder` and its parents if missing
pub(crate) async fn ensure_folder(folder: &Path) -> Result<()> {
    tokio::fs::create_dir_all(folder)
        .await
        .map_err(|e| DumpError::io(folder, e))
}

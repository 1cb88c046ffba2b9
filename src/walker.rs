use crate::capture::{self, PageCapturer};
use crate::config::{DumpConfig, FAQ_FOLDER, SELFCARE_FOLDER, SiteSelectors};
use crate::crawlers::PageFetcher;
use crate::error::Result;
use crate::filter::is_capturable;
use crate::parsers;
use crate::results::{DumpSummary, Link};
use crate::utils::{self, sanitize_filename};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Category name used for pages captured by the FAQ routine
pub const FAQ_CATEGORY: &str = "FAQ";

/// File the cleaned landing page is written to inside the FAQ folder
pub const FAQ_INDEX_FILE: &str = "index.html";

/// Walks home → categories → optional sections → question pages
///
/// Every step runs to completion on the single fetcher before the next one
/// starts. Category pages with direct question links are captured straight
/// away; the others fan out over their subject sections.
#[derive(Debug, Clone)]
pub struct HierarchyWalker {
    capturer: PageCapturer,
    selectors: SiteSelectors,
    show_progress: bool,
}

impl HierarchyWalker {
    pub fn new(capturer: PageCapturer, selectors: SiteSelectors) -> Self {
        Self {
            capturer,
            selectors,
            show_progress: false,
        }
    }

    pub fn from_config(config: &DumpConfig) -> Self {
        let capturer = PageCapturer::new(config.settle_delay(), config.max_filename_length);
        Self::new(capturer, config.selectors.clone()).with_progress(config.show_progress)
    }

    /// Draw a progress bar over categories
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Full run: land on `target_url`, optionally capture the FAQ, then walk
    /// every category into `destination_root`
    pub async fn run<F: PageFetcher + ?Sized>(
        &self,
        fetcher: &mut F,
        target_url: &str,
        destination_root: &Path,
        extract_faq: bool,
    ) -> Result<DumpSummary> {
        ::log::info!("Landing on {}", target_url);
        fetcher.navigate(target_url).await?;
        utils::settle(self.capturer.settle_delay()).await;

        // Categories are read before the FAQ routine moves the fetcher away
        // from the landing page.
        let categories = self.discover_categories(fetcher).await?;

        let mut summary = DumpSummary::default();
        if extract_faq {
            summary.merge(&self.extract_faq(fetcher, destination_root).await?);
        }
        summary.merge(
            &self
                .walk_categories(fetcher, &categories, destination_root)
                .await?,
        );
        Ok(summary)
    }

    /// Category links of the current (landing) page, in page order
    pub async fn discover_categories<F: PageFetcher + ?Sized>(
        &self,
        fetcher: &mut F,
    ) -> Result<Vec<Link>> {
        let categories = fetcher
            .find_links(&self.selectors.categories)
            .await?
            .into_iter()
            .map(Link::trimmed)
            .collect::<Vec<_>>();
        ::log::info!("Found {} categories", categories.len());
        Ok(categories)
    }

    /// Captures the question pages of every category into
    /// `<destination_root>/Selfcare`
    pub async fn walk_categories<F: PageFetcher + ?Sized>(
        &self,
        fetcher: &mut F,
        categories: &[Link],
        destination_root: &Path,
    ) -> Result<DumpSummary> {
        let folder = destination_root.join(SELFCARE_FOLDER);
        capture::ensure_folder(&folder).await?;

        let pb = self.progress_bar(categories.len())?;
        let mut summary = DumpSummary::default();

        for category in categories {
            pb.set_message(category.text.clone());
            summary.merge(&self.walk_category(fetcher, category, &folder).await?);
            pb.inc(1);
        }

        pb.finish_and_clear();
        ::log::info!(
            "Walked {} categories and {} sections",
            summary.categories,
            summary.sections
        );
        Ok(summary)
    }

    async fn walk_category<F: PageFetcher + ?Sized>(
        &self,
        fetcher: &mut F,
        category: &Link,
        folder: &Path,
    ) -> Result<DumpSummary> {
        let mut summary = DumpSummary::default();
        let category_name =
            sanitize_filename(category.text.trim(), self.capturer.max_filename_length());

        let Some(href) = category.href.as_deref().filter(|h| is_capturable(Some(*h))) else {
            ::log::warn!("Category {:?} has no web link, skipping", category.text);
            return Ok(summary);
        };

        ::log::info!("Category: {}", category_name);
        summary.categories += 1;
        fetcher.navigate(href).await?;
        utils::settle(self.capturer.settle_delay()).await;
        let markup = fetcher.current_markup().await?;
        ::log::debug!("Category page {} is {} bytes", href, markup.len());

        let questions = fetcher.find_links(&self.selectors.questions).await?;
        if !questions.is_empty() {
            ::log::debug!("{} direct questions in {}", questions.len(), category_name);
            self.capture_all(fetcher, questions, folder, &category_name, "", &mut summary)
                .await?;
            return Ok(summary);
        }

        let sections = fetcher
            .find_nested_links(&self.selectors.sections, &self.selectors.section_link)
            .await?;
        ::log::debug!("{} sections in {}", sections.len(), category_name);

        for section in &sections {
            self.walk_section(fetcher, section, folder, &category_name, &mut summary)
                .await?;
        }
        Ok(summary)
    }

    async fn walk_section<F: PageFetcher + ?Sized>(
        &self,
        fetcher: &mut F,
        section: &Link,
        folder: &Path,
        category_name: &str,
        summary: &mut DumpSummary,
    ) -> Result<()> {
        let section_name =
            sanitize_filename(section.text.trim(), self.capturer.max_filename_length());

        let Some(href) = section.href.as_deref().filter(|h| is_capturable(Some(*h))) else {
            ::log::warn!(
                "Section {:?} of {} has no web link, skipping",
                section.text,
                category_name
            );
            return Ok(());
        };

        ::log::info!("Section: {} / {}", category_name, section_name);
        summary.sections += 1;
        fetcher.navigate(href).await?;
        utils::settle(self.capturer.settle_delay()).await;

        let questions = fetcher.find_links(&self.selectors.questions).await?;
        self.capture_all(fetcher, questions, folder, category_name, &section_name, summary)
            .await
    }

    /// Writes the cleaned current page to `<destination_root>/FAQ/index.html`
    /// and captures its "most asked" questions next to it
    ///
    /// Must run while the fetcher is on the landing page.
    pub async fn extract_faq<F: PageFetcher + ?Sized>(
        &self,
        fetcher: &mut F,
        destination_root: &Path,
    ) -> Result<DumpSummary> {
        let folder = destination_root.join(FAQ_FOLDER);
        capture::ensure_folder(&folder).await?;

        let home = parsers::clean(&fetcher.current_markup().await?);
        let index = folder.join(FAQ_INDEX_FILE);
        capture::write_page(&index, &home).await?;
        ::log::info!("Wrote landing page to {}", index.display());

        let questions = fetcher
            .find_nested_links(&self.selectors.faq, &self.selectors.faq_link)
            .await?;
        ::log::info!("Found {} frequently asked questions", questions.len());

        let mut summary = DumpSummary::default();
        self.capture_all(fetcher, questions, &folder, FAQ_CATEGORY, "", &mut summary)
            .await?;
        Ok(summary)
    }

    async fn capture_all<F: PageFetcher + ?Sized>(
        &self,
        fetcher: &mut F,
        links: Vec<Link>,
        folder: &Path,
        category_name: &str,
        section_name: &str,
        summary: &mut DumpSummary,
    ) -> Result<()> {
        for link in links.into_iter().map(Link::trimmed) {
            let outcome = self
                .capturer
                .capture(fetcher, &link, folder, category_name, section_name)
                .await?;
            summary.record(&outcome);
        }
        Ok(())
    }

    fn progress_bar(&self, len: usize) -> Result<ProgressBar> {
        if !self.show_progress {
            return Ok(ProgressBar::hidden());
        }
        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("Categories [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );
        Ok(pb)
    }
}

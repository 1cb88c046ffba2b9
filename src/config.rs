use crate::error::{DumpError, Result};
use crate::utils::DEFAULT_MAX_FILENAME_LENGTH;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Subfolder holding category and section captures
pub const SELFCARE_FOLDER: &str = "Selfcare";

/// Subfolder holding the landing page and its frequently asked questions
pub const FAQ_FOLDER: &str = "FAQ";

/// CSS selectors describing the site's navigation structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSelectors {
    /// Category links on the landing page
    #[serde(default = "default_categories_selector")]
    pub categories: String,

    /// Question links on a category or section page
    #[serde(default = "default_questions_selector")]
    pub questions: String,

    /// Subject sections on a category page without direct questions
    #[serde(default = "default_sections_selector")]
    pub sections: String,

    /// Heading anchor inside a subject section
    #[serde(default = "default_section_link_selector")]
    pub section_link: String,

    /// Highlighted "most asked" blocks on the landing page
    #[serde(default = "default_faq_selector")]
    pub faq: String,

    /// Anchor inside a "most asked" block
    #[serde(default = "default_faq_link_selector")]
    pub faq_link: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            categories: default_categories_selector(),
            questions: default_questions_selector(),
            sections: default_sections_selector(),
            section_link: default_section_link_selector(),
            faq: default_faq_selector(),
            faq_link: default_faq_link_selector(),
        }
    }
}

/// Configuration for a dump run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Landing page of the self-service site
    #[serde(default)]
    pub target_url: String,

    /// Directory receiving the `Selfcare` and `FAQ` folders
    #[serde(default = "default_destination_root")]
    pub destination_root: PathBuf,

    /// Time given to client-side rendering after each navigation
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Upper bound on sanitized name parts, in characters
    #[serde(default = "default_max_filename_length")]
    pub max_filename_length: usize,

    /// Capture the landing page and its "most asked" questions
    #[serde(default)]
    pub extract_faq: bool,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Command line flags handed to the browser
    #[serde(default = "default_browser_args")]
    pub browser_args: Vec<String>,

    /// Refuse all cookies in the browser profile
    #[serde(default = "default_true")]
    pub block_cookies: bool,

    /// Draw a progress bar over categories
    #[serde(default = "default_true")]
    pub show_progress: bool,

    #[serde(default)]
    pub selectors: SiteSelectors,
}

impl DumpConfig {
    /// Create a new configuration with default values
    pub fn new(target_url: &str) -> Self {
        Self {
            target_url: target_url.to_string(),
            destination_root: default_destination_root(),
            settle_delay_ms: default_settle_delay_ms(),
            max_filename_length: default_max_filename_length(),
            extract_faq: false,
            webdriver_url: default_webdriver_url(),
            browser_args: default_browser_args(),
            block_cookies: true,
            show_progress: true,
            selectors: SiteSelectors::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path).map_err(DumpError::ConfigRead)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(DumpError::ConfigRead)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Folder receiving category and section captures
    pub fn selfcare_folder(&self) -> PathBuf {
        self.destination_root.join(SELFCARE_FOLDER)
    }

    /// Folder receiving the FAQ captures
    pub fn faq_folder(&self) -> PathBuf {
        self.destination_root.join(FAQ_FOLDER)
    }
}

fn default_destination_root() -> PathBuf {
    PathBuf::from("selfcare_dump")
}

fn default_settle_delay_ms() -> u64 {
    5000
}

fn default_max_filename_length() -> usize {
    DEFAULT_MAX_FILENAME_LENGTH
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Headless, private, low-footprint Chrome
fn default_browser_args() -> Vec<String> {
    [
        "--disable-extensions",
        "--disable-dev-shm-usage",
        "--no-sandbox",
        "--disable-gpu",
        "--headless",
        "--incognito",
        "--disable-plugins-discovery",
        "--disable-blink-features=AutomationControlled",
        "--disable-popup-blocking",
        "--ignore-certificate-errors",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_true() -> bool {
    true
}

fn default_categories_selector() -> String {
    "ul.linkList.categories a".to_string()
}

fn default_questions_selector() -> String {
    "div.sublevel a".to_string()
}

fn default_sections_selector() -> String {
    "section.subject.ng-scope".to_string()
}

fn default_section_link_selector() -> String {
    "h2 a".to_string()
}

fn default_faq_selector() -> String {
    "div.most-asked-question.ng-scope".to_string()
}

fn default_faq_link_selector() -> String {
    "a".to_string()
}

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by a page fetcher
#[derive(Debug, Error)]
pub enum FetchError {
    /// A WebDriver command (navigation, query, property read) failed
    #[error("webdriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    /// No WebDriver session could be opened
    #[error("could not start a webdriver session: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// A CSS selector could not be parsed
    #[error("invalid selector: {selector}")]
    InvalidSelector { selector: String },

    /// The fetcher has no page for this URL
    #[error("no page available at {url}")]
    PageNotFound { url: String },
}

/// Errors that abort a dump run
#[derive(Debug, Error)]
pub enum DumpError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read config: {0}")]
    ConfigRead(#[source] std::io::Error),

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid target url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("progress bar template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}

impl DumpError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = DumpError> = std::result::Result<T, E>;

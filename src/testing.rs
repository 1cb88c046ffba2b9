//! Testing utilities including a scripted page fetcher.
//!
//! Useful for exercising traversal and capture logic without a browser.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::crawlers::PageFetcher;
use crate::error::FetchError;
use crate::parsers::html;
use crate::results::Link;

/// A fetcher serving fixed markup per URL.
///
/// Selector queries run against the markup of the current page, so a test
/// describes a site as plain HTML. Every navigation and query is recorded.
#[derive(Debug, Default)]
pub struct MockFetcher {
    /// Markup served per URL
    pages: HashMap<String, String>,

    /// URL of the current page
    current: Option<String>,

    /// Call tracking for assertions
    calls: Vec<MockFetcherCall>,
}

/// Record of a call made to the mock fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFetcherCall {
    Navigate { url: String },
    CurrentMarkup { url: String },
    FindLinks { url: String, selector: String },
    FindNestedLinks { url: String, container_selector: String },
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `markup` at `url`.
    pub fn with_page(mut self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.pages.insert(url.into(), markup.into());
        self
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> &[MockFetcherCall] {
        &self.calls
    }

    /// Every navigated URL, in order.
    pub fn navigations(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                MockFetcherCall::Navigate { url } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    /// How many times `url` was navigated to.
    pub fn navigation_count(&self, url: &str) -> usize {
        self.navigations().iter().filter(|u| **u == url).count()
    }

    /// How many link queries used `selector` (directly or as a container)
    /// while `page_url` was current.
    pub fn query_count(&self, page_url: &str, selector: &str) -> usize {
        self.calls
            .iter()
            .filter(|call| match call {
                MockFetcherCall::FindLinks { url, selector: s } => url == page_url && s == selector,
                MockFetcherCall::FindNestedLinks {
                    url,
                    container_selector,
                } => url == page_url && container_selector == selector,
                _ => false,
            })
            .count()
    }

    /// URL of the current page, if any.
    pub fn current_url(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn current_page(&self) -> Result<(&str, &str), FetchError> {
        let url = self.current.as_deref().unwrap_or("about:blank");
        self.pages
            .get(url)
            .map(|markup| (url, markup.as_str()))
            .ok_or_else(|| FetchError::PageNotFound {
                url: url.to_string(),
            })
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn navigate(&mut self, url: &str) -> Result<(), FetchError> {
        self.calls.push(MockFetcherCall::Navigate {
            url: url.to_string(),
        });
        if !self.pages.contains_key(url) {
            return Err(FetchError::PageNotFound {
                url: url.to_string(),
            });
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn current_markup(&mut self) -> Result<String, FetchError> {
        let (url, markup) = self.current_page()?;
        let call = MockFetcherCall::CurrentMarkup {
            url: url.to_string(),
        };
        let markup = markup.to_string();
        self.calls.push(call);
        Ok(markup)
    }

    async fn find_links(&mut self, selector: &str) -> Result<Vec<Link>, FetchError> {
        let (url, markup) = self.current_page()?;
        let call = MockFetcherCall::FindLinks {
            url: url.to_string(),
            selector: selector.to_string(),
        };
        let links = html::select_links(markup, selector)?;
        self.calls.push(call);
        Ok(links)
    }

    async fn find_nested_links(
        &mut self,
        container_selector: &str,
        link_selector: &str,
    ) -> Result<Vec<Link>, FetchError> {
        let (url, markup) = self.current_page()?;
        let call = MockFetcherCall::FindNestedLinks {
            url: url.to_string(),
            container_selector: container_selector.to_string(),
        };
        let links = html::select_nested_links(markup, container_selector, link_selector)?;
        self.calls.push(call);
        Ok(links)
    }
}

use crate::error::FetchError;
use crate::results::Link;
use async_trait::async_trait;

/// Browser capability the traversal runs on
///
/// A fetcher holds a single "current page": every query reads whatever the
/// last `navigate` rendered. Callers drive it strictly one step at a time.
#[async_trait]
pub trait PageFetcher: Send {
    /// Load `url` as the current page
    async fn navigate(&mut self, url: &str) -> Result<(), FetchError>;

    /// Rendered markup of the current page
    async fn current_markup(&mut self) -> Result<String, FetchError>;

    /// Every element of the current page matching `selector`, read as a link
    async fn find_links(&mut self, selector: &str) -> Result<Vec<Link>, FetchError>;

    /// For every element matching `container_selector`, the link read from
    /// its first descendant matching `link_selector`
    async fn find_nested_links(
        &mut self,
        container_selector: &str,
        link_selector: &str,
    ) -> Result<Vec<Link>, FetchError>;
}

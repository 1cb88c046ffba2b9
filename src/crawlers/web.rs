use crate::config::DumpConfig;
use crate::crawlers::PageFetcher;
use crate::error::FetchError;
use crate::results::Link;
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;

/// WebDriver ports tried when the configured one refuses the session
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Page fetcher backed by a live WebDriver session
pub struct WebDriverFetcher {
    client: Client,
}

impl WebDriverFetcher {
    /// Opens a browser session configured from `config`
    pub async fn connect(config: &DumpConfig) -> Result<Self, FetchError> {
        let capabilities = chrome_capabilities(&config.browser_args, config.block_cookies);
        let client = connect_to_webdriver(&config.webdriver_url, capabilities).await?;
        Ok(Self { client })
    }

    /// Ends the browser session
    pub async fn close(self) -> Result<(), FetchError> {
        self.client.close().await?;
        ::log::debug!("WebDriver session closed");
        Ok(())
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn navigate(&mut self, url: &str) -> Result<(), FetchError> {
        ::log::debug!("GOTO: {}", url);
        self.client.goto(url).await?;
        Ok(())
    }

    async fn current_markup(&mut self) -> Result<String, FetchError> {
        Ok(self.client.source().await?)
    }

    async fn find_links(&mut self, selector: &str) -> Result<Vec<Link>, FetchError> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;
        ::log::debug!("{} elements match {:?}", elements.len(), selector);

        let mut links = Vec::with_capacity(elements.len());
        for element in elements {
            links.push(read_link(&element).await?);
        }
        Ok(links)
    }

    async fn find_nested_links(
        &mut self,
        container_selector: &str,
        link_selector: &str,
    ) -> Result<Vec<Link>, FetchError> {
        let containers = self.client.find_all(Locator::Css(container_selector)).await?;
        ::log::debug!(
            "{} containers match {:?}",
            containers.len(),
            container_selector
        );

        let mut links = Vec::with_capacity(containers.len());
        for container in containers {
            let nested = container.find_all(Locator::Css(link_selector)).await?;
            match nested.first() {
                Some(element) => links.push(read_link(element).await?),
                None => ::log::debug!("Container without {:?}, skipping", link_selector),
            }
        }
        Ok(links)
    }
}

/// Reads the resolved href property and visible text of an element
async fn read_link(element: &Element) -> Result<Link, FetchError> {
    let href = element.prop("href").await?;
    let text = element.text().await?;
    Ok(Link { href, text })
}

/// Builds Chrome capabilities carrying the browser flags and cookie policy
pub fn chrome_capabilities(browser_args: &[String], block_cookies: bool) -> Capabilities {
    let mut chrome_options = json!({ "args": browser_args });
    if block_cookies {
        chrome_options["prefs"] = json!({ "profile.default_content_setting_values.cookies": 2 });
    }

    let mut capabilities = Capabilities::new();
    capabilities.insert("browserName".to_string(), json!("chrome"));
    capabilities.insert("goog:chromeOptions".to_string(), chrome_options);
    capabilities
}

/// Connects to the WebDriver instance, then to the usual local fallbacks
async fn connect_to_webdriver(
    webdriver_url: &str,
    capabilities: Capabilities,
) -> Result<Client, FetchError> {
    let first_error = match ClientBuilder::native()
        .capabilities(capabilities.clone())
        .connect(webdriver_url)
        .await
    {
        Ok(client) => {
            ::log::info!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e
        }
    };

    for url in FALLBACK_WEBDRIVER_URLS.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native()
            .capabilities(capabilities.clone())
            .connect(url)
            .await
        {
            ::log::info!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(first_error.into())
}

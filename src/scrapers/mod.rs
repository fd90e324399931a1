use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{ListedPrice, Price, ScrapeResult};
use crate::parsers::{normalize_price, PageExtractor};
use crate::utils::http::fetch_html;

/// Anything that can hand back the markup of a product page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        fetch_html(&self.client, url).await
    }
}

pub struct ProductScraper<S> {
    source: S,
    extractor: PageExtractor,
}

impl<S: PageSource> ProductScraper<S> {
    pub fn new(source: S, extractor: PageExtractor) -> Self {
        Self { source, extractor }
    }

    /// Fetch one product page and resolve its title and normalized price.
    pub async fn scrape(&self, url: &str) -> Result<ScrapeResult> {
        info!("Fetching product page {}", url);
        let html = self.source.fetch_page(url).await?;

        let details = self.extractor.extract(&html)?;
        let price = match details.price_text {
            Some(text) => Price::Available(ListedPrice {
                amount: normalize_price(&text)?,
                display: text,
            }),
            None => {
                debug!("No price listed on {}", url);
                Price::Unavailable
            }
        };

        info!("{} -> {}", details.title, price);
        Ok(ScrapeResult {
            title: details.title,
            price,
        })
    }
}

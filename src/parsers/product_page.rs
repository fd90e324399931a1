use scraper::{Html, Selector};
use serde::Deserialize;

use crate::error::{Result, TrackerError};

pub const DEFAULT_TITLE_SELECTOR: &str = "#productTitle";
pub const DEFAULT_PRICE_SELECTOR: &str = "#priceblock_ourprice";

/// CSS anchors locating the two fields on a product page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub title: String,
    pub price: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE_SELECTOR.to_string(),
            price: DEFAULT_PRICE_SELECTOR.to_string(),
        }
    }
}

/// Title and raw price text pulled from one product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDetails {
    pub title: String,
    /// `None` when the page lists no price, i.e. the product is out of stock.
    pub price_text: Option<String>,
}

pub struct PageExtractor {
    title_anchor: String,
    title: Selector,
    price: Selector,
}

impl PageExtractor {
    pub fn new(selectors: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            title_anchor: selectors.title.clone(),
            title: parse_selector(&selectors.title)?,
            price: parse_selector(&selectors.price)?,
        })
    }

    pub fn extract(&self, html: &str) -> Result<PageDetails> {
        let document = Html::parse_document(html);

        let title = document
            .select(&self.title)
            .next()
            .map(|elem| elem.text().collect::<String>().trim().to_string())
            .ok_or_else(|| TrackerError::Parse {
                anchor: self.title_anchor.clone(),
            })?;

        let price_text = document
            .select(&self.price)
            .next()
            .map(|elem| elem.text().collect::<String>().trim().to_string());

        Ok(PageDetails { title, price_text })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| TrackerError::Config(format!("invalid selector {:?}: {:?}", selector, e)))
}

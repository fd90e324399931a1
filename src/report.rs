use tracing::{info, warn};

use crate::config::ProductConfig;
use crate::discord::message::{error_fragment, product_fragment};
use crate::error::Result;
use crate::scrapers::{PageSource, ProductScraper};

/// What to do when a single product cannot be fetched or read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Report the product as an error fragment and carry on.
    #[default]
    Isolate,
    /// Abort the whole run on the first failure.
    FailFast,
}

pub struct ReportAssembler<S> {
    scraper: ProductScraper<S>,
    failure_mode: FailureMode,
}

impl<S: PageSource> ReportAssembler<S> {
    pub fn new(scraper: ProductScraper<S>, failure_mode: FailureMode) -> Self {
        Self {
            scraper,
            failure_mode,
        }
    }

    /// Walk the products in order and concatenate their fragments into one body.
    pub async fn assemble(&self, products: &[ProductConfig]) -> Result<String> {
        let mut report = String::new();
        let mut reported = 0;

        for product in products {
            let fragment = match self.scraper.scrape(&product.url).await {
                Ok(result) => product_fragment(&result, product.budget, product.policy),
                Err(e) if self.failure_mode == FailureMode::Isolate => {
                    warn!("Skipping {}: {}", product.url, e);
                    error_fragment(&product.url)
                }
                Err(e) => return Err(e),
            };

            if fragment.is_empty() {
                info!("{} filtered out by {} policy", product.url, product.policy);
            } else {
                reported += 1;
                report.push_str(&fragment);
            }
        }

        info!("{} of {} products reported", reported, products.len());
        Ok(report)
    }
}

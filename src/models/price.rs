use std::fmt;

use super::OUT_OF_STOCK;

/// A price as listed on a product page, kept next to its normalized amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedPrice {
    pub amount: u64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Price {
    Available(ListedPrice),
    Unavailable,
}

impl Price {
    pub fn amount(&self) -> Option<u64> {
        match self {
            Price::Available(listed) => Some(listed.amount),
            Price::Unavailable => None,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Available(listed) => write!(f, "{}", listed.display),
            Price::Unavailable => write!(f, "{}", OUT_OF_STOCK),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeResult {
    pub title: String,
    pub price: Price,
}
